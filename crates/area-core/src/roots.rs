//! Closed-form real-root solvers for polynomials of degree 1 to 3.
//!
//! Coefficients are given highest power first. Every solver returns the
//! real roots sorted ascending, with repeated roots reported once. A
//! leading coefficient that is negligible next to the others drops the
//! problem to the next lower degree.

use std::f64::consts::PI;

/// Relative size below which a leading coefficient is treated as zero.
const LEADING_EPSILON: f64 = 1e-12;

/// Relative size below which a discriminant is treated as zero.
const DISCRIMINANT_EPSILON: f64 = 1e-14;

/// Root of `b*t + c = 0`.
pub fn solve_linear(b: f64, c: f64) -> Vec<f64> {
    if b == 0.0 || !b.is_finite() || !c.is_finite() {
        return Vec::new();
    }
    vec![-c / b]
}

/// Real roots of `a*t^2 + b*t + c = 0`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let magnitude = b.abs().max(c.abs());
    if a.abs() <= LEADING_EPSILON * magnitude || a == 0.0 {
        return solve_linear(b, c);
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        // Tangent roots can come out marginally negative.
        if disc.abs() <= DISCRIMINANT_EPSILON * b * b {
            return vec![-b / (2.0 * a)];
        }
        return Vec::new();
    }
    if disc == 0.0 {
        return vec![-b / (2.0 * a)];
    }

    // Avoids cancellation between -b and sqrt(disc).
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let mut roots = if q == 0.0 {
        vec![0.0]
    } else {
        vec![q / a, c / q]
    };
    sort_dedup(&mut roots);
    roots
}

/// Real roots of `a*t^3 + b*t^2 + c*t + d = 0`.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    let magnitude = b.abs().max(c.abs()).max(d.abs());
    if a.abs() <= LEADING_EPSILON * magnitude || a == 0.0 {
        return solve_quadratic(b, c, d);
    }

    // Monic form t^3 + A t^2 + B t + C, then depress with t = u - A/3.
    let (aa, bb, cc) = (b / a, c / a, d / a);
    let shift = aa / 3.0;
    let p = bb - aa * aa / 3.0;
    let q = 2.0 * aa * aa * aa / 27.0 - aa * bb / 3.0 + cc;

    let half_q = q / 2.0;
    let third_p = p / 3.0;
    let disc = half_q * half_q + third_p * third_p * third_p;
    let disc_scale = (half_q * half_q).max((third_p * third_p * third_p).abs());

    let mut roots = if disc.abs() <= DISCRIMINANT_EPSILON * disc_scale {
        if p.abs() <= LEADING_EPSILON * (1.0 + aa.abs() * aa.abs()) {
            // Triple root.
            vec![-shift]
        } else {
            // One simple and one double root.
            vec![3.0 * q / p - shift, -1.5 * q / p - shift]
        }
    } else if disc > 0.0 {
        let sqrt_disc = disc.sqrt();
        let u = (-half_q + sqrt_disc).cbrt() + (-half_q - sqrt_disc).cbrt();
        vec![u - shift]
    } else {
        // Three distinct real roots: trigonometric form.
        let r = 2.0 * (-third_p).sqrt();
        let cos_arg = ((3.0 * q) / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let phi = cos_arg.acos() / 3.0;
        (0..3)
            .map(|k| r * (phi - 2.0 * PI * k as f64 / 3.0).cos() - shift)
            .collect()
    };

    for root in &mut roots {
        *root = polish_cubic_root(a, b, c, d, *root);
    }
    sort_dedup(&mut roots);
    roots
}

/// Two Newton steps against the original coefficients. A step that would
/// worsen the residual is discarded.
fn polish_cubic_root(a: f64, b: f64, c: f64, d: f64, mut t: f64) -> f64 {
    let eval = |t: f64| ((a * t + b) * t + c) * t + d;
    let slope = |t: f64| (3.0 * a * t + 2.0 * b) * t + c;
    for _ in 0..2 {
        let f = eval(t);
        let df = slope(t);
        if f == 0.0 || df == 0.0 || !df.is_finite() {
            break;
        }
        let next = t - f / df;
        if !next.is_finite() || eval(next).abs() > f.abs() {
            break;
        }
        t = next;
    }
    t
}

fn sort_dedup(roots: &mut Vec<f64>) {
    roots.retain(|t| t.is_finite());
    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|later, earlier| (*later - *earlier).abs() <= 1e-12 * (1.0 + earlier.abs()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "roots: {actual:?}, expected: {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "roots: {actual:?}, expected: {expected:?}");
        }
    }

    #[test]
    fn test_linear() {
        assert_roots(&solve_linear(2.0, -1.0), &[0.5]);
        assert!(solve_linear(0.0, 1.0).is_empty());
    }

    #[test]
    fn test_quadratic_two_roots() {
        // (t - 0.25)(t - 0.75)
        assert_roots(&solve_quadratic(1.0, -1.0, 0.1875), &[0.25, 0.75]);
    }

    #[test]
    fn test_quadratic_no_real_roots() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_quadratic_double_root() {
        assert_roots(&solve_quadratic(1.0, -1.0, 0.25), &[0.5]);
    }

    #[test]
    fn test_quadratic_degrades_to_linear() {
        assert_roots(&solve_quadratic(1e-20, 2.0, -1.0), &[0.5]);
    }

    #[test]
    fn test_cubic_three_roots() {
        // (t - 0.1)(t - 0.5)(t - 0.9)
        let roots = solve_cubic(1.0, -1.5, 0.59, -0.045);
        assert_roots(&roots, &[0.1, 0.5, 0.9]);
    }

    #[test]
    fn test_cubic_one_real_root() {
        // (t - 0.5)(t^2 + 1)
        assert_roots(&solve_cubic(1.0, -0.5, 1.0, -0.5), &[0.5]);
    }

    #[test]
    fn test_cubic_double_root() {
        // (t - 0.25)^2 (t - 1)
        assert_roots(&solve_cubic(1.0, -1.5, 0.5625, -0.0625), &[0.25, 1.0]);
    }

    #[test]
    fn test_cubic_triple_root() {
        // (t - 0.5)^3
        assert_roots(&solve_cubic(1.0, -1.5, 0.75, -0.125), &[0.5]);
    }

    #[test]
    fn test_cubic_degrades_to_quadratic() {
        assert_roots(&solve_cubic(0.0, 1.0, -1.0, 0.1875), &[0.25, 0.75]);
    }

    #[test]
    fn test_arch_x_polynomial() {
        // x(t) of the arch (-1,0) (-1,1) (1,1) (1,0): -4t^3 + 6t^2 - 1
        let roots = solve_cubic(-4.0, 6.0, 0.0, -1.0);
        let half = 3f64.sqrt() / 2.0;
        assert_roots(&roots, &[0.5 - half, 0.5, 0.5 + half]);
    }
}

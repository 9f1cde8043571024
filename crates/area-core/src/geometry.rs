//! Curve geometry shared by every area family.
//!
//! The pipeline for one curve is:
//!
//! 1. **Power basis:** convert the Bezier control points to polynomial
//!    coefficients per axis.
//! 2. **Crossings:** solve `x(t) = 0` and `y(t) = 0` in closed form and
//!    keep the roots strictly inside `(0, 1)`.
//! 3. **Split:** cut the curve at every crossing with de Casteljau
//!    subdivision so each piece stays inside one quadrant.
//! 4. **Classify:** assign each piece to the quadrant of its midpoint.
//! 5. **Integrate:** the exact signed area swept from the origin to the
//!    piece (Green's theorem over the control points).
//!
//! All of it works the same for quadratics and cubics.

use mosaic_frame_model::{BezierCurve, Point2D, Quadrant};

use crate::config::GeometryConfig;
use crate::roots;

/// A coordinate axis of the active frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn component(self, point: &Point2D) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

/// A polynomial of degree at most 3, coefficients lowest power first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polynomial {
    coeffs: [f64; 4],
    order: usize,
}

impl Polynomial {
    pub fn quadratic(c0: f64, c1: f64, c2: f64) -> Self {
        Self {
            coeffs: [c0, c1, c2, 0.0],
            order: 2,
        }
    }

    pub fn cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> Self {
        Self {
            coeffs: [c0, c1, c2, c3],
            order: 3,
        }
    }

    /// Coefficients `[c0, c1, ...]` for `c0 + c1 t + ...`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs[..=self.order]
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients()
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }

    /// True when every coefficient except the constant is at or below
    /// `epsilon` in magnitude.
    pub fn is_constant(&self, epsilon: f64) -> bool {
        self.coefficients()[1..].iter().all(|c| c.abs() <= epsilon)
    }

    /// All real roots, ascending.
    pub fn real_roots(&self) -> Vec<f64> {
        let c = self.coeffs;
        match self.order {
            2 => roots::solve_quadratic(c[2], c[1], c[0]),
            _ => roots::solve_cubic(c[3], c[2], c[1], c[0]),
        }
    }
}

/// Power-basis form of a curve: one polynomial per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBasis {
    pub x: Polynomial,
    pub y: Polynomial,
}

impl PowerBasis {
    pub fn axis(&self, axis: Axis) -> &Polynomial {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

fn axis_to_power(curve: &BezierCurve, axis: Axis) -> Polynomial {
    match curve {
        BezierCurve::Quadratic(points) => {
            let [p0, p1, p2] = points.map(|p| axis.component(&p));
            Polynomial::quadratic(p0, 2.0 * (p1 - p0), p0 - 2.0 * p1 + p2)
        }
        BezierCurve::Cubic(points) => {
            let [p0, p1, p2, p3] = points.map(|p| axis.component(&p));
            Polynomial::cubic(
                p0,
                3.0 * (p1 - p0),
                3.0 * (p2 - 2.0 * p1 + p0),
                p3 - 3.0 * p2 + 3.0 * p1 - p0,
            )
        }
    }
}

/// Bernstein-to-power conversion of both axes.
pub fn to_power_basis(curve: &BezierCurve) -> PowerBasis {
    PowerBasis {
        x: axis_to_power(curve, Axis::X),
        y: axis_to_power(curve, Axis::Y),
    }
}

fn de_casteljau<const N: usize>(points: &[Point2D; N], t: f64) -> ([Point2D; N], [Point2D; N]) {
    let mut work = *points;
    let mut left = *points;
    let mut right = *points;
    for level in 1..N {
        for i in 0..N - level {
            work[i] = Point2D::lerp(&work[i], &work[i + 1], t);
        }
        left[level] = work[0];
        right[N - 1 - level] = work[N - 1 - level];
    }
    (left, right)
}

/// Split at `t` into the pieces covering `[0, t]` and `[t, 1]`, each
/// reparameterized to `[0, 1]`.
///
/// The left piece's last control point and the right piece's first are
/// the same value, so the pieces join exactly.
pub fn split(curve: &BezierCurve, t: f64) -> (BezierCurve, BezierCurve) {
    match curve {
        BezierCurve::Quadratic(points) => {
            let (left, right) = de_casteljau(points, t);
            (BezierCurve::Quadratic(left), BezierCurve::Quadratic(right))
        }
        BezierCurve::Cubic(points) => {
            let (left, right) = de_casteljau(points, t);
            (BezierCurve::Cubic(left), BezierCurve::Cubic(right))
        }
    }
}

/// Exact signed area between the origin and the curve,
/// `1/2 * integral(x dy - y dx)`, in closed form over the control points.
///
/// Summed over a closed contour this is the enclosed area, positive for
/// counter-clockwise traversal.
pub fn signed_area(curve: &BezierCurve) -> f64 {
    match curve {
        BezierCurve::Quadratic([p0, p1, p2]) => {
            (2.0 * p0.cross(p1) + p0.cross(p2) + 2.0 * p1.cross(p2)) / 6.0
        }
        BezierCurve::Cubic([p0, p1, p2, p3]) => {
            (6.0 * p0.cross(p1)
                + 3.0 * p0.cross(p2)
                + p0.cross(p3)
                + 3.0 * p1.cross(p2)
                + 3.0 * p1.cross(p3)
                + 6.0 * p2.cross(p3))
                / 20.0
        }
    }
}

/// Tolerance-aware curve operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveGeometry {
    config: GeometryConfig,
}

impl CurveGeometry {
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Parameters in `(eps, 1 - eps)` where the curve meets `axis`,
    /// ascending. A curve constant along the axis has none.
    pub fn find_axis_crossings(&self, curve: &BezierCurve, axis: Axis) -> Vec<f64> {
        let basis = to_power_basis(curve);
        let poly = basis.axis(axis);
        if poly.is_constant(self.config.degenerate_coefficient) {
            return Vec::new();
        }

        let eps = self.config.crossing_epsilon;
        poly.real_roots()
            .into_iter()
            .filter(|&t| t > eps && t < 1.0 - eps)
            .collect()
    }

    /// Crossings on both axes, sorted and with near-duplicates merged.
    pub fn all_crossings(&self, curve: &BezierCurve) -> Vec<f64> {
        let mut crossings = self.find_axis_crossings(curve, Axis::X);
        crossings.extend(self.find_axis_crossings(curve, Axis::Y));
        crossings.sort_by(f64::total_cmp);
        let tol = self.config.dedup_tolerance;
        crossings.dedup_by(|later, earlier| (*later - *earlier).abs() <= tol);
        crossings
    }

    /// Cut the curve at every axis crossing.
    ///
    /// Pieces come back in curve order. A curve with no crossings is
    /// returned whole.
    pub fn split_at_all_crossings(&self, curve: &BezierCurve) -> Vec<BezierCurve> {
        let crossings = self.all_crossings(curve);
        if crossings.is_empty() {
            return vec![*curve];
        }

        let mut pieces = Vec::with_capacity(crossings.len() + 1);
        let mut rest = *curve;
        let mut prev = 0.0;
        for t in crossings {
            // `rest` covers [prev, 1] of the original curve.
            let local = (t - prev) / (1.0 - prev);
            let (left, right) = split(&rest, local);
            pieces.push(left);
            rest = right;
            prev = t;
        }
        pieces.push(rest);
        pieces
    }

    /// Quadrant of the piece's midpoint (`t = 0.5`), or `None` when that
    /// point sits on an axis.
    pub fn classify_quadrant(&self, piece: &BezierCurve) -> Option<Quadrant> {
        Quadrant::containing(piece.evaluate(0.5), self.config.classify_epsilon)
    }
}

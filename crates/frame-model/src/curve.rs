//! Quadratic and cubic Bezier curves.
//!
//! Outer lip contours are fit as cubics, inner contours as quadratics.
//! Both are plain control-point arrays; the geometry that operates on
//! them lives in the area engine.

use serde::{Deserialize, Serialize};

use crate::point::Point2D;

/// Polynomial degree of a lip curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveDegree {
    Quadratic,
    Cubic,
}

impl CurveDegree {
    /// Polynomial order (2 or 3).
    pub fn order(self) -> usize {
        match self {
            Self::Quadratic => 2,
            Self::Cubic => 3,
        }
    }

    /// Number of control points for this degree.
    pub fn point_count(self) -> usize {
        self.order() + 1
    }
}

/// A Bezier curve of degree 2 or 3 parameterized over `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "degree", content = "points", rename_all = "lowercase")]
pub enum BezierCurve {
    Quadratic([Point2D; 3]),
    Cubic([Point2D; 4]),
}

impl BezierCurve {
    pub fn degree(&self) -> CurveDegree {
        match self {
            Self::Quadratic(_) => CurveDegree::Quadratic,
            Self::Cubic(_) => CurveDegree::Cubic,
        }
    }

    /// Control points in order, first to last.
    pub fn points(&self) -> &[Point2D] {
        match self {
            Self::Quadratic(points) => points,
            Self::Cubic(points) => points,
        }
    }

    pub fn start(&self) -> Point2D {
        self.points()[0]
    }

    pub fn end(&self) -> Point2D {
        let points = self.points();
        points[points.len() - 1]
    }

    /// Evaluate the curve at `t` using the Bernstein form.
    pub fn evaluate(&self, t: f64) -> Point2D {
        let s = 1.0 - t;
        match self {
            Self::Quadratic([p0, p1, p2]) => {
                *p0 * (s * s) + *p1 * (2.0 * s * t) + *p2 * (t * t)
            }
            Self::Cubic([p0, p1, p2, p3]) => {
                *p0 * (s * s * s)
                    + *p1 * (3.0 * s * s * t)
                    + *p2 * (3.0 * s * t * t)
                    + *p3 * (t * t * t)
            }
        }
    }

    /// Apply `f` to every control point, keeping the degree.
    ///
    /// Bezier curves are affine-invariant, so mapping the control points
    /// through an affine map maps the whole curve.
    pub fn map_points(&self, mut f: impl FnMut(Point2D) -> Point2D) -> Self {
        match self {
            Self::Quadratic(points) => Self::Quadratic(points.map(&mut f)),
            Self::Cubic(points) => Self::Cubic(points.map(&mut f)),
        }
    }
}

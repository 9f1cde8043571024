//! The bio coordinate frame.
//!
//! An oblique 2D frame spanned by two landmark-difference vectors:
//! commissure to commissure (`LC - RC`) and philtrum to lower lip
//! (`LM - PH`). Quadrants in this frame follow the subject's own mouth
//! rather than the camera axes.

use mosaic_frame_model::{BezierCurve, BioLandmarks, Point2D};
use nalgebra::{Matrix2, Vector2};

use crate::config::{BioConfig, BioOrigin};
use crate::error::{AreaError, AreaResult};

/// An affine 2D frame: `origin` plus a non-singular basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateFrame {
    origin: Point2D,
    basis: Matrix2<f64>,
    inverse: Matrix2<f64>,
    scale: f64,
}

impl CoordinateFrame {
    /// The image axes: unit basis, origin at zero.
    pub fn identity() -> Self {
        Self {
            origin: Point2D::ORIGIN,
            basis: Matrix2::identity(),
            inverse: Matrix2::identity(),
            scale: 1.0,
        }
    }

    /// Frame with basis columns `u` and `v`.
    ///
    /// Fails with [`AreaError::SingularFrame`] when the columns are
    /// (near) parallel or either has zero length.
    pub fn new(origin: Point2D, u: Point2D, v: Point2D, singular_tolerance: f64) -> AreaResult<Self> {
        let basis = Matrix2::new(u.x, v.x, u.y, v.y);
        let determinant = basis.determinant();

        if !determinant.is_finite() || determinant.abs() <= singular_tolerance * u.norm() * v.norm() {
            return Err(AreaError::SingularFrame { determinant });
        }

        let inverse = basis
            .try_inverse()
            .ok_or(AreaError::SingularFrame { determinant })?;

        Ok(Self {
            origin,
            basis,
            inverse,
            scale: determinant.abs(),
        })
    }

    pub fn origin(&self) -> Point2D {
        self.origin
    }

    pub fn determinant(&self) -> f64 {
        self.basis.determinant()
    }

    /// `|det(basis)|`: image-plane area of one unit square of this frame.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Image point to frame coordinates: `basis^-1 * (p - origin)`.
    pub fn to_frame(&self, point: Point2D) -> Point2D {
        let local = self.inverse * Vector2::new(point.x - self.origin.x, point.y - self.origin.y);
        Point2D::new(local.x, local.y)
    }

    /// Frame coordinates back to the image: `basis * p + origin`.
    pub fn from_frame(&self, point: Point2D) -> Point2D {
        let image = self.basis * Vector2::new(point.x, point.y);
        Point2D::new(image.x + self.origin.x, image.y + self.origin.y)
    }

    /// Express a curve in this frame by mapping its control points.
    pub fn map_curve(&self, curve: &BezierCurve) -> BezierCurve {
        curve.map_points(|p| self.to_frame(p))
    }
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self::identity()
    }
}

/// Builds a [`CoordinateFrame`] per frame from the mouth landmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BioFrameTransform {
    config: BioConfig,
}

impl BioFrameTransform {
    pub fn new(config: BioConfig) -> Self {
        Self { config }
    }

    pub fn from_landmarks(&self, landmarks: &BioLandmarks) -> AreaResult<CoordinateFrame> {
        let u = landmarks.left_commissure - landmarks.right_commissure;
        let v = landmarks.lower_lip - landmarks.philtrum;
        let origin = match self.config.origin {
            BioOrigin::ImageOrigin => Point2D::ORIGIN,
            BioOrigin::CommissureMidpoint => {
                Point2D::midpoint(&landmarks.left_commissure, &landmarks.right_commissure)
            }
        };
        CoordinateFrame::new(origin, u, v, self.config.singular_tolerance)
    }
}

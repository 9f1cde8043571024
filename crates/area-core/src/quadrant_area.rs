//! Quadrant area accumulation for one contour.
//!
//! The axis-aligned and bio families share one engine. The bio entry point
//! first re-expresses every control point in the frame, runs the same
//! split/classify/integrate pass, then rescales by the frame's Jacobian.

use mosaic_frame_model::{BezierCurve, FrameAreaResult, LipSegment, Quadrant, QuadrantAreas};
use serde::Serialize;

use crate::bio_frame::CoordinateFrame;
use crate::config::GeometryConfig;
use crate::geometry::{signed_area, CurveGeometry};

/// One split piece of a contour curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePiece {
    pub curve: BezierCurve,
    /// `None` when the piece's midpoint sits on an axis. Such pieces are
    /// dropped from the totals.
    pub quadrant: Option<Quadrant>,
    pub signed_area: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuadrantAreaEngine {
    geometry: CurveGeometry,
}

impl QuadrantAreaEngine {
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            geometry: CurveGeometry::new(config),
        }
    }

    /// Split `curve` at its axis crossings and classify every piece.
    pub fn pieces(&self, curve: &BezierCurve) -> Vec<CurvePiece> {
        self.geometry
            .split_at_all_crossings(curve)
            .into_iter()
            .map(|piece| CurvePiece {
                curve: piece,
                quadrant: self.geometry.classify_quadrant(&piece),
                signed_area: signed_area(&piece),
            })
            .collect()
    }

    /// Signed area per quadrant, summed algebraically over all curves.
    pub fn accumulate<I>(&self, curves: I) -> QuadrantAreas
    where
        I: IntoIterator<Item = BezierCurve>,
    {
        let mut areas = QuadrantAreas::new();
        for curve in curves {
            for piece in self.pieces(&curve) {
                if let Some(quadrant) = piece.quadrant {
                    areas.add(quadrant, piece.signed_area);
                }
            }
        }
        areas
    }

    /// Areas in image coordinates.
    pub fn axis_aligned(&self, segments: &[LipSegment]) -> FrameAreaResult {
        self.accumulate(segments.iter().map(|segment| segment.curve))
            .finish()
    }

    /// Areas in `frame`, rescaled to image-plane units.
    ///
    /// The scale is applied to the signed sums, before absolute values are
    /// taken.
    pub fn bio(&self, segments: &[LipSegment], frame: &CoordinateFrame) -> FrameAreaResult {
        self.accumulate(segments.iter().map(|segment| frame.map_curve(&segment.curve)))
            .scaled(frame.scale())
            .finish()
    }
}

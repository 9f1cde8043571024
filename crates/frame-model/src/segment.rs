//! Lip contour segments.

use serde::{Deserialize, Serialize};

use crate::curve::{BezierCurve, CurveDegree};

/// Which lip contour a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contour {
    /// Outer vermilion border, fit with cubics.
    Outer,
    /// Inner lip opening, fit with quadratics.
    Inner,
}

impl Contour {
    /// Curve degree the upstream fitter produces for this contour.
    pub fn default_degree(self) -> CurveDegree {
        match self {
            Self::Outer => CurveDegree::Cubic,
            Self::Inner => CurveDegree::Quadratic,
        }
    }
}

/// The mouth region a fitted segment was produced for.
///
/// This is the region the fitter assigned, not the quadrant the
/// segment's pieces end up in once split against the active axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LipRegion {
    #[serde(rename = "UR")]
    UpperRight,
    #[serde(rename = "UL")]
    UpperLeft,
    #[serde(rename = "LR")]
    LowerRight,
    #[serde(rename = "LL")]
    LowerLeft,
}

impl LipRegion {
    pub const ALL: [LipRegion; 4] = [
        LipRegion::UpperRight,
        LipRegion::UpperLeft,
        LipRegion::LowerRight,
        LipRegion::LowerLeft,
    ];

    /// Short code used in column prefixes.
    pub fn code(self) -> &'static str {
        match self {
            Self::UpperRight => "UR",
            Self::UpperLeft => "UL",
            Self::LowerRight => "LR",
            Self::LowerLeft => "LL",
        }
    }
}

/// One fitted lip curve for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LipSegment {
    pub contour: Contour,
    pub region: LipRegion,
    pub curve: BezierCurve,
}

impl LipSegment {
    pub fn new(contour: Contour, region: LipRegion, curve: BezierCurve) -> Self {
        Self {
            contour,
            region,
            curve,
        }
    }

    pub fn degree(&self) -> CurveDegree {
        self.curve.degree()
    }
}

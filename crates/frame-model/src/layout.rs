//! Column layouts: how table columns map onto curves and landmarks.
//!
//! Layouts are plain configuration records handed to the engine, so a
//! table produced by a different fitter or landmark scheme only needs a
//! different layout.

use serde::{Deserialize, Serialize};

use crate::curve::{BezierCurve, CurveDegree};
use crate::error::ModelResult;
use crate::point::Point2D;
use crate::segment::{Contour, LipRegion, LipSegment};
use crate::table::{FrameRow, FrameTable};

/// Control-point letters, in curve order.
const POINT_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Columns for one fitted segment: `{prefix}_{A..}{x,y}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentColumns {
    pub region: LipRegion,
    pub prefix: String,
}

/// Columns for every segment of one contour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveLayout {
    pub contour: Contour,
    pub degree: CurveDegree,
    pub segments: Vec<SegmentColumns>,
}

impl CurveLayout {
    /// Outer contour: cubic segments `UR, UL, LR, LL`, points `A..D`.
    pub fn outer_default() -> Self {
        Self::with_prefix(Contour::Outer, "")
    }

    /// Inner contour: quadratic segments `IUR, IUL, ILR, ILL`, points `A..C`.
    pub fn inner_default() -> Self {
        Self::with_prefix(Contour::Inner, "I")
    }

    fn with_prefix(contour: Contour, lead: &str) -> Self {
        Self {
            contour,
            degree: contour.default_degree(),
            segments: LipRegion::ALL
                .iter()
                .map(|&region| SegmentColumns {
                    region,
                    prefix: format!("{lead}{}", region.code()),
                })
                .collect(),
        }
    }

    /// `(x, y)` column names for each control point of a segment.
    pub fn point_columns(&self, segment: &SegmentColumns) -> Vec<(String, String)> {
        POINT_LETTERS[..self.degree.point_count()]
            .iter()
            .map(|letter| {
                (
                    format!("{}_{letter}x", segment.prefix),
                    format!("{}_{letter}y", segment.prefix),
                )
            })
            .collect()
    }

    pub fn required_columns(&self) -> Vec<String> {
        self.segments
            .iter()
            .flat_map(|segment| self.point_columns(segment))
            .flat_map(|(x, y)| [x, y])
            .collect()
    }

    /// Read every segment of this contour from a row.
    pub fn extract(&self, row: &FrameRow<'_>) -> ModelResult<Vec<LipSegment>> {
        self.segments
            .iter()
            .map(|segment| {
                let points = self
                    .point_columns(segment)
                    .iter()
                    .map(|(x, y)| Ok(Point2D::new(row.value(x)?, row.value(y)?)))
                    .collect::<ModelResult<Vec<_>>>()?;
                let curve = match self.degree {
                    CurveDegree::Quadratic => {
                        BezierCurve::Quadratic([points[0], points[1], points[2]])
                    }
                    CurveDegree::Cubic => {
                        BezierCurve::Cubic([points[0], points[1], points[2], points[3]])
                    }
                };
                Ok(LipSegment::new(self.contour, segment.region, curve))
            })
            .collect()
    }
}

/// The four landmarks that span the bio frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BioLandmarks {
    pub left_commissure: Point2D,
    pub right_commissure: Point2D,
    pub philtrum: Point2D,
    pub lower_lip: Point2D,
}

/// Landmark indices and coordinate column prefixes (`x_48`, `y_48`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkLayout {
    pub left_commissure: u32,
    pub right_commissure: u32,
    pub philtrum: u32,
    pub lower_lip: u32,
    pub x_prefix: String,
    pub y_prefix: String,
}

impl Default for LandmarkLayout {
    fn default() -> Self {
        Self {
            left_commissure: 48,
            right_commissure: 54,
            philtrum: 51,
            lower_lip: 57,
            x_prefix: "x_".to_string(),
            y_prefix: "y_".to_string(),
        }
    }
}

impl LandmarkLayout {
    fn columns(&self, landmark: u32) -> (String, String) {
        (
            format!("{}{landmark}", self.x_prefix),
            format!("{}{landmark}", self.y_prefix),
        )
    }

    fn indices(&self) -> [u32; 4] {
        [
            self.left_commissure,
            self.right_commissure,
            self.philtrum,
            self.lower_lip,
        ]
    }

    pub fn required_columns(&self) -> Vec<String> {
        self.indices()
            .iter()
            .flat_map(|&idx| {
                let (x, y) = self.columns(idx);
                [x, y]
            })
            .collect()
    }

    fn point(&self, row: &FrameRow<'_>, landmark: u32) -> ModelResult<Point2D> {
        let (x, y) = self.columns(landmark);
        Ok(Point2D::new(row.value(&x)?, row.value(&y)?))
    }

    pub fn extract(&self, row: &FrameRow<'_>) -> ModelResult<BioLandmarks> {
        Ok(BioLandmarks {
            left_commissure: self.point(row, self.left_commissure)?,
            right_commissure: self.point(row, self.right_commissure)?,
            philtrum: self.point(row, self.philtrum)?,
            lower_lip: self.point(row, self.lower_lip)?,
        })
    }
}

/// Everything needed to read one frame's engine inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameLayout {
    pub outer: CurveLayout,
    pub inner: CurveLayout,
    pub landmarks: LandmarkLayout,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            outer: CurveLayout::outer_default(),
            inner: CurveLayout::inner_default(),
            landmarks: LandmarkLayout::default(),
        }
    }
}

impl FrameLayout {
    pub fn curves(&self, contour: Contour) -> &CurveLayout {
        match contour {
            Contour::Outer => &self.outer,
            Contour::Inner => &self.inner,
        }
    }

    /// Columns needed for a contour, plus the landmark columns when the
    /// bio frame is involved.
    pub fn required_columns(&self, contour: Contour, bio: bool) -> Vec<String> {
        let mut columns = self.curves(contour).required_columns();
        if bio {
            columns.extend(self.landmarks.required_columns());
        }
        columns
    }

    /// Required columns absent from the table header, in layout order and
    /// without duplicates.
    pub fn missing_columns(&self, table: &FrameTable) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        let all = self
            .outer
            .required_columns()
            .into_iter()
            .chain(self.inner.required_columns())
            .chain(self.landmarks.required_columns());
        for column in all {
            if !table.has_column(&column) && !missing.contains(&column) {
                missing.push(column);
            }
        }
        missing
    }
}

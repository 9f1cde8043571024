//! MOSAIC Area Core
//!
//! Computes lip areas per quadrant from fitted Bezier contours:
//! - **Geometry:** Axis crossings, de Casteljau splitting, exact signed areas
//! - **Bio Frame:** Oblique coordinate frames built from mouth landmarks
//! - **Quadrant Areas:** Per-contour accumulation in image or bio axes
//! - **Batch:** Parallel per-frame execution with skip-and-report failures
//!
//! This crate is pure computation with no I/O of its own.
//! Frames go in as table rows; areas come out as data.

pub mod batch;
pub mod bio_frame;
pub mod config;
pub mod error;
pub mod geometry;
pub mod quadrant_area;
pub mod roots;

pub use batch::{AreaBatchRunner, BatchOutput, FrameOutcome, FrameRange, SkippedFrame};
pub use bio_frame::{BioFrameTransform, CoordinateFrame};
pub use config::{AreaConfig, BioConfig, BioOrigin, GeometryConfig};
pub use error::{AreaError, AreaResult, SkipReason};
pub use geometry::CurveGeometry;
pub use quadrant_area::{CurvePiece, QuadrantAreaEngine};

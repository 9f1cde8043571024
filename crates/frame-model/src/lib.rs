//! MOSAIC Frame Model
//!
//! Defines the data contracts shared by the area engine and its callers:
//! - **Geometry:** 2D points and quadratic/cubic Bezier curves
//! - **Segments:** Lip contour curves tagged by region and contour
//! - **Quadrants:** Fixed four-slot area buckets and per-frame results
//! - **Tables:** The per-frame input table and the column layouts that
//!   map its columns onto curves and landmarks
//!
//! Every value here is scoped to a single frame. Nothing is cached or
//! carried between frames.

pub mod curve;
pub mod error;
pub mod family;
pub mod layout;
pub mod point;
pub mod quadrant;
pub mod record;
pub mod segment;
pub mod table;

pub use curve::*;
pub use error::*;
pub use family::*;
pub use layout::*;
pub use point::*;
pub use quadrant::*;
pub use record::*;
pub use segment::*;
pub use table::*;

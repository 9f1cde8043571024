//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config
//! and a partial one overrides only what it names.

use std::path::Path;

use mosaic_common::error::{MosaicError, MosaicResult};
use mosaic_frame_model::{AreaFamily, FrameLayout};
use serde::{Deserialize, Serialize};

/// Tolerances used by the curve geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Crossings closer than this to `t = 0` or `t = 1` are dropped so no
    /// zero-length pieces are produced.
    pub crossing_epsilon: f64,

    /// A piece whose midpoint has `|x|` or `|y|` at or below this value
    /// belongs to no quadrant.
    pub classify_epsilon: f64,

    /// Crossings from the two axes closer than this are merged.
    pub dedup_tolerance: f64,

    /// When every non-constant power-basis coefficient along an axis is
    /// at or below this magnitude, the curve is constant along that axis
    /// and has no crossings there.
    pub degenerate_coefficient: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            crossing_epsilon: 1e-12,
            classify_epsilon: 1e-12,
            dedup_tolerance: 1e-10,
            degenerate_coefficient: 1e-12,
        }
    }
}

/// Where the bio frame puts its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BioOrigin {
    /// The image coordinate origin. The transform is a pure linear map.
    #[default]
    ImageOrigin,
    /// Midpoint of the two commissures.
    CommissureMidpoint,
}

/// Bio frame settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BioConfig {
    pub origin: BioOrigin,

    /// A basis is singular when `|det| <= singular_tolerance * |u| * |v|`,
    /// i.e. when the sine of the angle between its columns is below this.
    pub singular_tolerance: f64,
}

impl Default for BioConfig {
    fn default() -> Self {
        Self {
            origin: BioOrigin::ImageOrigin,
            singular_tolerance: 1e-9,
        }
    }
}

/// Full area-engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    pub geometry: GeometryConfig,
    pub bio: BioConfig,
    pub layout: FrameLayout,
    /// Families computed per frame, in output order.
    pub families: Vec<AreaFamily>,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            bio: BioConfig::default(),
            layout: FrameLayout::default(),
            families: AreaFamily::ALL.to_vec(),
        }
    }
}

impl AreaConfig {
    /// Load from a JSON file.
    pub fn from_path(path: &Path) -> MosaicResult<Self> {
        if !path.exists() {
            return Err(MosaicError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> MosaicResult<()> {
        let g = &self.geometry;
        let tolerances = [
            ("crossing_epsilon", g.crossing_epsilon),
            ("classify_epsilon", g.classify_epsilon),
            ("dedup_tolerance", g.dedup_tolerance),
            ("degenerate_coefficient", g.degenerate_coefficient),
            ("singular_tolerance", self.bio.singular_tolerance),
        ];
        for (name, value) in tolerances {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MosaicError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if g.crossing_epsilon >= 0.5 {
            return Err(MosaicError::config("crossing_epsilon must be below 0.5"));
        }
        for layout in [&self.layout.outer, &self.layout.inner] {
            if layout.segments.is_empty() {
                return Err(MosaicError::config(format!(
                    "{:?} layout has no segments",
                    layout.contour
                )));
            }
        }
        if self.families.is_empty() {
            return Err(MosaicError::config("no area families selected"));
        }
        Ok(())
    }
}

//! Area families: which contour, in which coordinate system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quadrant::Quadrant;
use crate::segment::Contour;

/// One (contour, coordinate system) combination computed per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AreaFamily {
    /// Outer contour, image axes.
    #[serde(rename = "QUAD_O")]
    QuadOuter,
    /// Inner contour, image axes.
    #[serde(rename = "QUAD_I")]
    QuadInner,
    /// Outer contour, bio frame.
    #[serde(rename = "BIO_O")]
    BioOuter,
    /// Inner contour, bio frame.
    #[serde(rename = "BIO_I")]
    BioInner,
}

impl AreaFamily {
    pub const ALL: [AreaFamily; 4] = [
        AreaFamily::QuadOuter,
        AreaFamily::QuadInner,
        AreaFamily::BioOuter,
        AreaFamily::BioInner,
    ];

    /// Output column prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::QuadOuter => "QUAD_O",
            Self::QuadInner => "QUAD_I",
            Self::BioOuter => "BIO_O",
            Self::BioInner => "BIO_I",
        }
    }

    pub fn contour(self) -> Contour {
        match self {
            Self::QuadOuter | Self::BioOuter => Contour::Outer,
            Self::QuadInner | Self::BioInner => Contour::Inner,
        }
    }

    pub fn is_bio(self) -> bool {
        matches!(self, Self::BioOuter | Self::BioInner)
    }

    /// Output column names: `{prefix}_Q1..Q4`, then `{prefix}_total`.
    pub fn column_names(self) -> [String; 5] {
        let prefix = self.prefix();
        [
            format!("{prefix}_Q{}", Quadrant::Q1.number()),
            format!("{prefix}_Q{}", Quadrant::Q2.number()),
            format!("{prefix}_Q{}", Quadrant::Q3.number()),
            format!("{prefix}_Q{}", Quadrant::Q4.number()),
            format!("{prefix}_total"),
        ]
    }
}

impl fmt::Display for AreaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown area family `{0}` (expected QUAD_O, QUAD_I, BIO_O or BIO_I)")]
pub struct UnknownFamily(pub String);

impl FromStr for AreaFamily {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "QUAD_O" | "QUAD_OUTER" => Ok(Self::QuadOuter),
            "QUAD_I" | "QUAD_INNER" => Ok(Self::QuadInner),
            "BIO_O" | "BIO_OUTER" => Ok(Self::BioOuter),
            "BIO_I" | "BIO_INNER" => Ok(Self::BioInner),
            _ => Err(UnknownFamily(s.to_string())),
        }
    }
}

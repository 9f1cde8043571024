//! Per-frame failures of the area engine.
//!
//! None of these abort a batch. The runner records them against the
//! (frame, family) pair and moves on.

use mosaic_frame_model::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AreaError {
    /// Required coordinate or control-point columns are missing or
    /// unreadable for this frame.
    #[error("malformed input: {source}")]
    MalformedInput {
        #[from]
        source: ModelError,
    },

    /// The bio basis is (near) singular: the landmarks are collinear or
    /// coincide.
    #[error("singular bio frame (det = {determinant:e})")]
    SingularFrame { determinant: f64 },
}

impl AreaError {
    pub fn reason(&self) -> SkipReason {
        match self {
            Self::MalformedInput { .. } => SkipReason::MalformedInput,
            Self::SingularFrame { .. } => SkipReason::SingularFrame,
        }
    }
}

pub type AreaResult<T> = Result<T, AreaError>;

/// Why a (frame, family) pair produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MalformedInput,
    SingularFrame,
}

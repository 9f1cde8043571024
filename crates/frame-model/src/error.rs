//! Errors raised while reading frame data.

/// Failure to read a value the caller asked for.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("frame {frame}: missing value for column `{column}`")]
    MissingColumn { column: String, frame: u32 },

    #[error("frame {frame}: invalid value `{value}` in column `{column}`")]
    InvalidValue {
        column: String,
        frame: u32,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// The column that caused the failure, when there is one.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::MissingColumn { column, .. } | Self::InvalidValue { column, .. } => Some(column),
            Self::Csv(_) | Self::Io(_) => None,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

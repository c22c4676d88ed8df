//! Error types for the facade.

use enr_core::RecordError;
use enr_v4::SchemeError;
use thiserror::Error;

/// Errors that can occur when building, parsing or publishing records.
#[derive(Debug, Error)]
pub enum EnrError {
    /// Record core error.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Identity scheme error.
    #[error("scheme error: {0}")]
    Scheme(#[from] SchemeError),

    /// A locally built record exceeds the configured ceiling.
    #[error("local record is {size} bytes, limit is {max}")]
    RecordTooLarge { size: usize, max: usize },
}

impl EnrError {
    /// The underlying record core error, if any.
    pub fn record_error(&self) -> Option<&RecordError> {
        match self {
            Self::Record(err) | Self::Scheme(SchemeError::Record(err)) => Some(err),
            _ => None,
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, EnrError>;

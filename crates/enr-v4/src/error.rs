//! Error types for the v4 identity scheme.

use enr_core::RecordError;
use thiserror::Error;

/// Errors specific to v4 keys and v4 record contents.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// Failure in the record core (size, ordering, signature, codec).
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("unsupported identity scheme: {0:?}")]
    UnsupportedScheme(String),

    #[error("missing key: {0}")]
    MissingKey(&'static str),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("secret key does not match the record's public key")]
    KeyMismatch,
}

/// Result type for v4 scheme operations.
pub type Result<T> = std::result::Result<T, SchemeError>;

//! Error types for the record core.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while building or parsing a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record too large: {size} bytes exceeds maximum of {max}")]
    RecordTooLarge { size: usize, max: usize },

    #[error("keys not unique or sorted: {0}")]
    KeysNotUniqueOrSorted(KeyOrderViolation),

    #[error("signature invalid")]
    SignatureInvalid,

    #[error("rlp decoding error: {0}")]
    Rlp(#[from] rlp::DecoderError),

    #[error("malformed record: {0}")]
    Malformed(String),

    /// A value handed to the constructor is not exactly one RLP item.
    #[error("value for key {key:?} is not a single rlp item")]
    InvalidValue { key: String },

    #[error("sequence number overflow")]
    SequenceOverflow,
}

/// Which canonical-ordering rule a decoded key list broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrderViolation {
    /// `key` appears after a lexicographically greater key.
    Unsorted { previous: String, key: String },
    /// `key` appears more than once.
    Duplicate { key: String },
}

impl fmt::Display for KeyOrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsorted { previous, key } => {
                write!(f, "key {key:?} follows greater key {previous:?}")
            }
            Self::Duplicate { key } => write!(f, "key {key:?} is repeated"),
        }
    }
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

//! # ENR Core
//!
//! Scheme-agnostic primitives for Ethereum Node Records: canonical content,
//! wire encoding, and validating decode.
//!
//! This crate knows nothing about keys or curves. Signing and verification
//! are injected as plain functions, so the same core serves any identity
//! scheme. It performs no I/O and no logging.
//!
//! ## Key Types
//!
//! - [`Record`] - An immutable signed record
//! - [`Entries`] - The sorted key/value map a record carries
//! - [`RecordError`] - Every way building or parsing can fail
//!
//! ## Wire format
//!
//! RLP list `[signature, seq, k1, v1, k2, v2, ...]`, keys strictly
//! ascending, at most [`MAX_RECORD_SIZE`] bytes. See [`codec`].
//!
//! ```rust
//! use enr_core::{Entries, Record};
//!
//! let record = Record::new(1, vec![("id", rlp::encode(&b"v4".to_vec()).to_vec())], |content: &[u8]| {
//!     content.to_vec()
//! })
//! .unwrap();
//!
//! let parsed = Record::from_rlp(&record.to_rlp(), |_: &Entries, content: &[u8], sig: &[u8]| {
//!     content == sig
//! })
//! .unwrap();
//! assert_eq!(parsed, record);
//! ```

use std::collections::BTreeMap;

pub mod codec;
pub mod error;
pub mod record;
pub mod validation;

pub use codec::{content_bytes, decode_record, record_bytes, DecodedRecord};
pub use error::{KeyOrderViolation, RecordError, Result};
pub use record::Record;
pub use validation::{validate_keys_sorted, validate_size, validate_value};

/// Maximum size of an encoded record in bytes.
pub const MAX_RECORD_SIZE: usize = 300;

/// Record entries: key to raw RLP item, iterated in ascending key order.
pub type Entries = BTreeMap<String, Vec<u8>>;

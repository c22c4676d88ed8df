//! Structural checks applied to records on the parse path.
//!
//! These run before signature verification so malformed input never
//! reaches the (comparatively expensive) verify function.

use std::cmp::Ordering;

use rlp::Rlp;

use crate::error::{KeyOrderViolation, RecordError, Result};
use crate::MAX_RECORD_SIZE;

/// Reject encodings longer than the wire ceiling.
pub fn validate_size(len: usize) -> Result<()> {
    if len > MAX_RECORD_SIZE {
        return Err(RecordError::RecordTooLarge {
            size: len,
            max: MAX_RECORD_SIZE,
        });
    }
    Ok(())
}

/// Validate that `value` is exactly one well-formed RLP item.
///
/// Values are appended to the record list verbatim, so anything else would
/// shift or merge the items a parser sees.
pub fn validate_value(key: &str, value: &[u8]) -> Result<()> {
    let invalid = || RecordError::InvalidValue {
        key: key.to_string(),
    };
    let info = Rlp::new(value).payload_info().map_err(|_| invalid())?;
    if info.total() != value.len() {
        return Err(invalid());
    }
    Ok(())
}

/// Validate that keys are strictly ascending and contain no duplicates.
pub fn validate_keys_sorted<'a, I>(keys: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut previous: Option<&str> = None;
    for key in keys {
        if let Some(prev) = previous {
            match prev.as_bytes().cmp(key.as_bytes()) {
                Ordering::Greater => {
                    return Err(RecordError::KeysNotUniqueOrSorted(
                        KeyOrderViolation::Unsorted {
                            previous: prev.to_string(),
                            key: key.to_string(),
                        },
                    ))
                }
                Ordering::Equal => {
                    return Err(RecordError::KeysNotUniqueOrSorted(
                        KeyOrderViolation::Duplicate {
                            key: key.to_string(),
                        },
                    ))
                }
                Ordering::Less => {}
            }
        }
        previous = Some(key);
    }
    Ok(())
}

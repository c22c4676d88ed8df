//! Canonical RLP encoding of node records.
//!
//! Two encodings are derived from the same data:
//! - content: `[seq, k1, v1, k2, v2, ...]`, the bytes that get signed
//! - record:  `[signature, seq, k1, v1, k2, v2, ...]`, the wire form
//!
//! Keys are emitted in ascending byte order. Values are raw RLP items and
//! are appended verbatim, never re-encoded.
//!
//! **CRITICAL**: signing and verification both go through `content_bytes`.
//! Any change here breaks every existing signature.

use rlp::{DecoderError, Rlp, RlpStream};

use crate::error::{RecordError, Result};
use crate::Entries;

/// A record as it appeared on the wire, before any validation.
///
/// `pairs` keeps the wire order so the caller can check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub signature: Vec<u8>,
    pub seq: u64,
    pub pairs: Vec<(String, Vec<u8>)>,
}

/// Encode the signable content of a record.
pub fn content_bytes(seq: u64, entries: &Entries) -> Vec<u8> {
    let mut stream = RlpStream::new_list(entries.len() * 2 + 1);
    stream_content(&mut stream, seq, entries);
    stream.out().to_vec()
}

/// Encode a full record in its wire form.
pub fn record_bytes(signature: &[u8], seq: u64, entries: &Entries) -> Vec<u8> {
    let mut stream = RlpStream::new();
    stream_record(&mut stream, signature, seq, entries);
    stream.out().to_vec()
}

/// Append a full record as one list item to `stream`.
pub fn stream_record(stream: &mut RlpStream, signature: &[u8], seq: u64, entries: &Entries) {
    stream.begin_list(entries.len() * 2 + 2);
    stream.append(&signature.to_vec());
    stream_content(stream, seq, entries);
}

fn stream_content(stream: &mut RlpStream, seq: u64, entries: &Entries) {
    stream.append(&seq);
    // BTreeMap iterates in ascending byte order of the keys.
    for (key, value) in entries {
        stream.append(key);
        stream.append_raw(value, 1);
    }
}

/// Decode the wire form of a record without validating it.
///
/// Fails on anything the codec itself rejects, on trailing bytes after the
/// list, and on lists that cannot hold a signature, a sequence number and
/// complete key/value pairs.
pub fn decode_record(bytes: &[u8]) -> Result<DecodedRecord> {
    let rlp = Rlp::new(bytes);

    if !rlp.is_list() {
        return Err(RecordError::Malformed("expected list".into()));
    }

    let total = rlp.payload_info()?.total();
    if total > bytes.len() {
        return Err(DecoderError::RlpIsTooShort.into());
    }
    if total < bytes.len() {
        return Err(RecordError::Malformed(format!(
            "{} trailing bytes after record",
            bytes.len() - total
        )));
    }

    let item_count = rlp.item_count()?;
    if item_count < 2 {
        return Err(RecordError::Malformed(format!(
            "expected at least 2 items, got {}",
            item_count
        )));
    }
    if item_count % 2 != 0 {
        return Err(RecordError::Malformed("key without value".into()));
    }

    let signature: Vec<u8> = rlp.at(0)?.as_val()?;
    let seq: u64 = rlp.at(1)?.as_val()?;

    let mut pairs = Vec::with_capacity((item_count - 2) / 2);
    for index in (2..item_count).step_by(2) {
        let key: String = rlp.at(index)?.as_val()?;
        let value = rlp.at(index + 1)?.as_raw().to_vec();
        pairs.push((key, value));
    }

    Ok(DecodedRecord {
        signature,
        seq,
        pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &[u8])]) -> Entries {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect()
    }

    #[test]
    fn test_content_exact_bytes() {
        // [1, "a", "b"] with "b" already an RLP item (single byte < 0x80).
        let bytes = content_bytes(1, &entries(&[("a", b"b")]));
        assert_eq!(bytes, vec![0xc3, 0x01, 0x61, 0x62]);
    }

    #[test]
    fn test_content_empty_entries() {
        // seq 0 encodes as the empty string.
        assert_eq!(content_bytes(0, &Entries::new()), vec![0xc1, 0x80]);
    }

    #[test]
    fn test_content_key_ordering() {
        let map = entries(&[("udp", &[0x01]), ("id", &[0x02]), ("ip", &[0x03])]);
        let bytes = content_bytes(7, &map);

        let rlp = Rlp::new(&bytes);
        let keys: Vec<String> = (1..rlp.item_count().unwrap())
            .step_by(2)
            .map(|i| rlp.at(i).unwrap().as_val().unwrap())
            .collect();
        assert_eq!(keys, vec!["id", "ip", "udp"]);
    }

    #[test]
    fn test_values_appended_raw() {
        let value = rlp::encode(&b"hello".to_vec()).to_vec();
        let map = entries(&[("k", &value)]);
        let bytes = content_bytes(1, &map);

        let rlp = Rlp::new(&bytes);
        assert_eq!(rlp.at(2).unwrap().as_raw(), value.as_slice());
        assert_eq!(rlp.at(2).unwrap().data().unwrap(), b"hello");
    }

    #[test]
    fn test_record_roundtrip() {
        let map = entries(&[("a", &[0x01]), ("b", &[0xc0])]);
        let bytes = record_bytes(&[0xaa; 64], 42, &map);

        let decoded = decode_record(&bytes).unwrap();
        assert_eq!(decoded.signature, vec![0xaa; 64]);
        assert_eq!(decoded.seq, 42);
        assert_eq!(
            decoded.pairs,
            vec![("a".to_string(), vec![0x01]), ("b".to_string(), vec![0xc0])]
        );
    }

    #[test]
    fn test_record_contains_content() {
        let map = entries(&[("a", &[0x01])]);
        let content = content_bytes(3, &map);
        let record = record_bytes(b"sig", 3, &map);

        // The record list is the signature followed by the content items.
        let content_items = Rlp::new(&content);
        let record_items = Rlp::new(&record);
        assert_eq!(record_items.item_count().unwrap(), content_items.item_count().unwrap() + 1);
        assert_eq!(record_items.at(1).unwrap().as_raw(), content_items.at(0).unwrap().as_raw());
    }

    #[test]
    fn test_decode_rejects_non_list() {
        let bytes = rlp::encode(&b"not a list".to_vec()).to_vec();
        assert!(matches!(decode_record(&bytes), Err(RecordError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = record_bytes(&[], 1, &Entries::new());
        bytes.push(0x00);
        assert!(matches!(decode_record(&bytes), Err(RecordError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_missing_value() {
        let mut stream = RlpStream::new_list(3);
        stream.append(&Vec::<u8>::new());
        stream.append(&1u64);
        stream.append(&"key".to_string());
        let bytes = stream.out().to_vec();

        assert!(matches!(decode_record(&bytes), Err(RecordError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_short_list() {
        let mut stream = RlpStream::new_list(1);
        stream.append(&Vec::<u8>::new());
        let bytes = stream.out().to_vec();

        assert!(matches!(decode_record(&bytes), Err(RecordError::Malformed(_))));
    }

    #[test]
    fn test_decode_propagates_codec_errors() {
        // Declares a 5-byte payload but carries only 2.
        let bytes = vec![0xc5, 0x80, 0x01];
        assert!(matches!(decode_record(&bytes), Err(RecordError::Rlp(_))));
    }

    #[test]
    fn test_decode_rejects_list_as_key() {
        let mut stream = RlpStream::new_list(4);
        stream.append(&Vec::<u8>::new());
        stream.append(&1u64);
        stream.begin_list(0);
        stream.append(&1u8);
        let bytes = stream.out().to_vec();

        assert!(matches!(decode_record(&bytes), Err(RecordError::Rlp(_))));
    }
}

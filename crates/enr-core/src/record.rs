//! Record: a signed, versioned key/value advertisement.
//!
//! A record carries three fields:
//! - `seq`: sequence number, bumped by the owner on every re-issue
//! - `entries`: key/value pairs, keys unique and kept in byte order
//! - `signature`: produced over the canonical content by an injected signer
//!
//! Records are immutable. Changing anything means building a new record
//! with a higher sequence number.

use std::fmt;

use rlp::{Encodable, Rlp, RlpStream};

use crate::codec::{content_bytes, decode_record, record_bytes, stream_record};
use crate::error::{RecordError, Result};
use crate::validation::{validate_keys_sorted, validate_size, validate_value};
use crate::Entries;

/// A node record with a signature over its canonical content.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    seq: u64,
    entries: Entries,
    signature: Vec<u8>,
}

impl Record {
    /// Build and sign a new record.
    ///
    /// Entries may arrive in any order; they are sorted by key before the
    /// content is built. If the same key is supplied twice the later value
    /// wins. Every value must be exactly one RLP item
    /// ([`RecordError::InvalidValue`] otherwise), checked before `sign` runs.
    /// `sign` receives the canonical content and returns the signature bytes.
    ///
    /// No size check happens here. Call [`Record::check_size`] before
    /// publishing a record built from untrusted or variable-size input.
    pub fn new<I, K, V, S>(seq: u64, entries: I, sign: S) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
        S: FnOnce(&[u8]) -> Vec<u8>,
    {
        let entries: Entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (key, value) in &entries {
            validate_value(key, value)?;
        }

        let content = content_bytes(seq, &entries);
        let signature = sign(&content);

        Ok(Self {
            seq,
            entries,
            signature,
        })
    }

    /// Parse a record from its wire form and verify it.
    ///
    /// Checks run in a fixed order: size, then codec and key ordering, then
    /// `verify(entries, content, signature)`. A `false` from `verify` is
    /// reported as [`RecordError::SignatureInvalid`].
    pub fn from_rlp<V>(bytes: &[u8], verify: V) -> Result<Self>
    where
        V: FnOnce(&Entries, &[u8], &[u8]) -> bool,
    {
        validate_size(bytes.len())?;

        let decoded = decode_record(bytes)?;

        // Strict on decode: the wire order must already be canonical.
        validate_keys_sorted(decoded.pairs.iter().map(|(key, _)| key.as_str()))?;

        let entries: Entries = decoded.pairs.into_iter().collect();
        let content = content_bytes(decoded.seq, &entries);

        if !verify(&entries, &content, &decoded.signature) {
            return Err(RecordError::SignatureInvalid);
        }

        Ok(Self {
            seq: decoded.seq,
            entries,
            signature: decoded.signature,
        })
    }

    /// Re-issue this record with new entries and `seq + 1`.
    pub fn update<I, K, V, S>(&self, entries: I, sign: S) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
        S: FnOnce(&[u8]) -> Vec<u8>,
    {
        let seq = self
            .seq
            .checked_add(1)
            .ok_or(RecordError::SequenceOverflow)?;
        Self::new(seq, entries, sign)
    }

    pub fn sequence_number(&self) -> u64 {
        self.seq
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Raw RLP item stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The signable content: `[seq, k1, v1, ...]`.
    pub fn content(&self) -> Vec<u8> {
        content_bytes(self.seq, &self.entries)
    }

    /// Encode to the wire form: `[signature, seq, k1, v1, ...]`.
    pub fn to_rlp(&self) -> Vec<u8> {
        record_bytes(&self.signature, self.seq, &self.entries)
    }

    /// Length of the wire form in bytes.
    pub fn encoded_len(&self) -> usize {
        self.to_rlp().len()
    }

    /// Fail with [`RecordError::RecordTooLarge`] if the wire form would be
    /// rejected by a parser.
    pub fn check_size(&self) -> Result<()> {
        validate_size(self.encoded_len())
    }
}

impl Encodable for Record {
    fn rlp_append(&self, s: &mut RlpStream) {
        stream_record(s, &self.signature, self.seq, &self.entries);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ 0x{} seq={} ", hex::encode(&self.signature), self.seq)?;
        for (key, value) in &self.entries {
            // Show the payload of the stored item; lists fall back to raw bytes.
            let shown = Rlp::new(value).data().unwrap_or(value);
            write!(f, "{}=0x{} ", key, hex::encode(shown))?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("seq", &self.seq)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("signature_len", &self.signature.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyOrderViolation;
    use crate::MAX_RECORD_SIZE;

    fn no_signature(_: &[u8]) -> Vec<u8> {
        Vec::new()
    }

    fn accept_all(_: &Entries, _: &[u8], _: &[u8]) -> bool {
        true
    }

    // Toy scheme: the "signature" is a copy of the content.
    fn mirror_sign(content: &[u8]) -> Vec<u8> {
        content.to_vec()
    }

    fn mirror_verify(_: &Entries, content: &[u8], signature: &[u8]) -> bool {
        content == signature
    }

    fn encoded(value: &[u8]) -> Vec<u8> {
        rlp::encode(&value.to_vec()).to_vec()
    }

    /// Hand-build a wire record, bypassing the map so order is preserved.
    fn raw_record(seq: u64, pairs: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut s = RlpStream::new_list(pairs.len() * 2 + 2);
        s.append(&Vec::<u8>::new());
        s.append(&seq);
        for (key, value) in pairs {
            s.append(&key.to_string());
            s.append_raw(value, 1);
        }
        s.out().to_vec()
    }

    #[test]
    fn test_create_sorts_entries() {
        let record = Record::new(
            1,
            vec![("udp", encoded(&[0x15])), ("id", encoded(b"v4")), ("ip", encoded(&[127, 0, 0, 1]))],
            no_signature,
        )
        .unwrap();

        let keys: Vec<_> = record.entries().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "ip", "udp"]);
    }

    #[test]
    fn test_create_rejects_bare_bytes() {
        // Unencoded text would be read back as several items.
        let result = Record::new(1, vec![("k", b"hello".to_vec())], |_: &[u8]| {
            panic!("sign must not run on invalid values")
        });
        assert!(matches!(
            result,
            Err(RecordError::InvalidValue { ref key }) if key == "k"
        ));
    }

    #[test]
    fn test_create_rejects_multiple_items() {
        let result = Record::new(1, vec![("a", encoded(b"ok")), ("b", vec![0x80, 0x80])], mirror_sign);
        assert!(matches!(
            result,
            Err(RecordError::InvalidValue { ref key }) if key == "b"
        ));
    }

    #[test]
    fn test_update_rejects_invalid_value() {
        let record = Record::new(1, vec![("k", encoded(b"v"))], mirror_sign).unwrap();
        let result = record.update(vec![("k", vec![0x83, b'a'])], mirror_sign);
        assert!(matches!(result, Err(RecordError::InvalidValue { .. })));
    }

    #[test]
    fn test_sign_receives_content() {
        let record = Record::new(5, vec![("k", encoded(b"v"))], mirror_sign).unwrap();
        assert_eq!(record.signature(), record.content().as_slice());
    }

    #[test]
    fn test_roundtrip() {
        let original = Record::new(
            9,
            vec![("a", encoded(b"alpha")), ("b", encoded(&[])), ("c", vec![0xc0])],
            mirror_sign,
        )
        .unwrap();

        let decoded = Record::from_rlp(&original.to_rlp(), mirror_verify).unwrap();

        assert_eq!(original.sequence_number(), decoded.sequence_number());
        assert_eq!(original.entries(), decoded.entries());
        assert_eq!(original.signature(), decoded.signature());
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_roundtrip_no_entries() {
        let original = Record::new(0, Vec::<(String, Vec<u8>)>::new(), mirror_sign).unwrap();
        let decoded = Record::from_rlp(&original.to_rlp(), mirror_verify).unwrap();
        assert_eq!(original, decoded);
        assert!(decoded.entries().is_empty());
    }

    #[test]
    fn test_verify_receives_decoded_parts() {
        let original = Record::new(3, vec![("key", encoded(b"value"))], |_: &[u8]| b"sig".to_vec()).unwrap();
        let bytes = original.to_rlp();

        let result = Record::from_rlp(&bytes, |entries: &Entries, content: &[u8], signature: &[u8]| {
            entries.get("key").map(Vec::as_slice) == Some(encoded(b"value").as_slice())
                && content == original.content().as_slice()
                && signature == b"sig"
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_too_big() {
        let record = Record::new(0, vec![("key", encoded(&[b'a'; 300]))], no_signature).unwrap();
        let bytes = record.to_rlp();
        assert!(bytes.len() > MAX_RECORD_SIZE);

        let result = Record::from_rlp(&bytes, accept_all);
        assert!(matches!(result, Err(RecordError::RecordTooLarge { .. })));
    }

    #[test]
    fn test_size_checked_before_signature() {
        // Would verify under the mirror scheme, but is over the ceiling.
        let record = Record::new(0, vec![("key", encoded(&[b'a'; 200]))], mirror_sign).unwrap();
        let result = Record::from_rlp(&record.to_rlp(), mirror_verify);
        assert!(matches!(result, Err(RecordError::RecordTooLarge { .. })));
    }

    #[test]
    fn test_size_checked_before_decoding() {
        let garbage = vec![0xff; MAX_RECORD_SIZE + 1];
        let result = Record::from_rlp(&garbage, accept_all);
        assert!(matches!(result, Err(RecordError::RecordTooLarge { size: 301, .. })));
    }

    #[test]
    fn test_check_size() {
        let small = Record::new(1, vec![("k", encoded(b"v"))], no_signature).unwrap();
        assert!(small.check_size().is_ok());

        let big = Record::new(1, vec![("k", encoded(&[0u8; 400]))], no_signature).unwrap();
        assert!(matches!(big.check_size(), Err(RecordError::RecordTooLarge { .. })));
    }

    #[test]
    fn test_parse_keys_not_sorted() {
        let bytes = raw_record(0, &[("keyB", vec![0x80]), ("keyA", vec![0x80])]);
        let result = Record::from_rlp(&bytes, accept_all);
        assert!(matches!(
            result,
            Err(RecordError::KeysNotUniqueOrSorted(KeyOrderViolation::Unsorted { .. }))
        ));
    }

    #[test]
    fn test_parse_keys_not_unique() {
        let bytes = raw_record(0, &[("key", vec![0x80]), ("key", vec![0x80])]);
        let result = Record::from_rlp(&bytes, accept_all);
        assert!(matches!(
            result,
            Err(RecordError::KeysNotUniqueOrSorted(KeyOrderViolation::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_key_order_checked_before_signature() {
        let bytes = raw_record(0, &[("keyB", vec![0x80]), ("keyA", vec![0x80])]);
        let result = Record::from_rlp(&bytes, |_: &Entries, _: &[u8], _: &[u8]| {
            panic!("verify must not run on unsorted input")
        });
        assert!(matches!(result, Err(RecordError::KeysNotUniqueOrSorted(_))));
    }

    #[test]
    fn test_verify_false_is_signature_invalid() {
        let record = Record::new(1, vec![("k", encoded(b"v"))], no_signature).unwrap();
        let result = Record::from_rlp(&record.to_rlp(), |_: &Entries, _: &[u8], _: &[u8]| false);
        assert!(matches!(result, Err(RecordError::SignatureInvalid)));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let record = Record::new(1, vec![("k", encoded(b"value"))], mirror_sign).unwrap();
        let mut bytes = record.to_rlp();

        let rlp = Rlp::new(&bytes);
        let sig_offset = rlp.at(0).unwrap().data().unwrap().as_ptr() as usize - bytes.as_ptr() as usize;
        bytes[sig_offset] ^= 0x01;

        let result = Record::from_rlp(&bytes, mirror_verify);
        assert!(matches!(result, Err(RecordError::SignatureInvalid)));
    }

    #[test]
    fn test_tampered_value_fails() {
        let record = Record::new(1, vec![("k", encoded(b"value"))], mirror_sign).unwrap();
        let mut bytes = record.to_rlp();

        // Last byte of the wire form is the last byte of the value.
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let result = Record::from_rlp(&bytes, mirror_verify);
        assert!(matches!(result, Err(RecordError::SignatureInvalid)));
    }

    #[test]
    fn test_update_increments_seq() {
        let first = Record::new(4, vec![("k", encoded(b"old"))], mirror_sign).unwrap();
        let second = first.update(vec![("k", encoded(b"new"))], mirror_sign).unwrap();

        assert_eq!(second.sequence_number(), 5);
        assert_eq!(second.get("k"), Some(encoded(b"new").as_slice()));
        // The original is untouched.
        assert_eq!(first.sequence_number(), 4);
        assert_eq!(first.get("k"), Some(encoded(b"old").as_slice()));
        assert!(Record::from_rlp(&second.to_rlp(), mirror_verify).is_ok());
    }

    #[test]
    fn test_update_overflow() {
        let record = Record::new(u64::MAX, Vec::<(String, Vec<u8>)>::new(), no_signature).unwrap();
        let result = record.update(Vec::<(String, Vec<u8>)>::new(), no_signature);
        assert!(matches!(result, Err(RecordError::SequenceOverflow)));
    }

    #[test]
    fn test_encodable_matches_to_rlp() {
        let record = Record::new(2, vec![("k", encoded(b"v"))], mirror_sign).unwrap();
        assert_eq!(rlp::encode(&record).to_vec(), record.to_rlp());
        assert_eq!(record.encoded_len(), record.to_rlp().len());
    }

    #[test]
    fn test_display() {
        let record = Record::new(1, vec![("tcp", encoded(&[0x0c, 0xfa]))], |_: &[u8]| vec![0xab, 0xcd]).unwrap();
        assert_eq!(record.to_string(), "[ 0xabcd seq=1 tcp=0x0cfa ]");
    }

    #[test]
    fn test_get_and_contains() {
        let record = Record::new(1, vec![("k", encoded(b"v"))], no_signature).unwrap();
        assert!(record.contains_key("k"));
        assert!(!record.contains_key("missing"));
        assert_eq!(record.get("missing"), None);
    }
}

//! The v4 identity scheme: building, re-issuing and parsing records signed
//! with secp256k1 over `keccak256(content)`.

use std::net::IpAddr;

use enr_core::{Entries, Record};
use rlp::{Decodable, Rlp};
use tracing::debug;

use crate::crypto::{PublicKey, SecretKey, Signature};
use crate::error::{Result, SchemeError};
use crate::keys;

/// Sequence number of a freshly created record.
pub const INITIAL_SEQUENCE_NUMBER: u64 = 1;

/// The endpoint entries of a v4 record, each value a raw RLP item.
pub fn v4_entries(
    public_key: &PublicKey,
    ip: IpAddr,
    tcp: u16,
    udp: u16,
) -> Vec<(&'static str, Vec<u8>)> {
    let ip_bytes = match ip {
        IpAddr::V4(addr) => addr.octets().to_vec(),
        IpAddr::V6(addr) => addr.octets().to_vec(),
    };

    vec![
        (keys::ID, rlp::encode(&keys::ID_V4.as_bytes().to_vec()).to_vec()),
        (keys::SECP256K1, rlp::encode(&public_key.to_bytes().to_vec()).to_vec()),
        (keys::IP, rlp::encode(&ip_bytes).to_vec()),
        (keys::TCP, rlp::encode(&tcp).to_vec()),
        (keys::UDP, rlp::encode(&udp).to_vec()),
    ]
}

/// Sign function for the record core.
pub fn sign_v4(secret: &SecretKey, content: &[u8]) -> Vec<u8> {
    secret.sign(content).as_bytes().to_vec()
}

/// Verify function for the record core.
///
/// Fails when `sec256k1` is absent or not a valid compressed point, when the
/// signature is not 64 bytes, or when it does not match the content.
pub fn verify_v4(entries: &Entries, content: &[u8], signature: &[u8]) -> bool {
    let Some(raw) = entries.get(keys::SECP256K1) else {
        return false;
    };
    let Ok(key_bytes) = Rlp::new(raw).as_val::<Vec<u8>>() else {
        return false;
    };
    let Ok(public_key) = PublicKey::from_bytes(&key_bytes) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    public_key.verify(content, &signature).is_ok()
}

/// Create a v4 record with [`INITIAL_SEQUENCE_NUMBER`].
pub fn create_v4_record(secret: &SecretKey, ip: IpAddr, tcp: u16, udp: u16) -> Result<Record> {
    create_v4_record_with_seq(INITIAL_SEQUENCE_NUMBER, secret, ip, tcp, udp)
}

/// Create a v4 record with an explicit sequence number.
pub fn create_v4_record_with_seq(
    seq: u64,
    secret: &SecretKey,
    ip: IpAddr,
    tcp: u16,
    udp: u16,
) -> Result<Record> {
    let entries = v4_entries(&secret.public_key(), ip, tcp, udp);
    let record = Record::new(seq, entries, |content: &[u8]| sign_v4(secret, content))?;
    debug!(seq, keys = record.entries().len(), "created v4 record");
    Ok(record)
}

/// Re-issue `record` with `seq + 1` and a new endpoint.
///
/// Keys outside the v4 endpoint set are carried over unchanged. The secret
/// must belong to the key the record advertises.
pub fn update_v4_record(
    secret: &SecretKey,
    record: &Record,
    ip: IpAddr,
    tcp: u16,
    udp: u16,
) -> Result<Record> {
    if public_key(record)? != secret.public_key() {
        return Err(SchemeError::KeyMismatch);
    }

    let mut entries = record.entries().clone();
    for (key, value) in v4_entries(&secret.public_key(), ip, tcp, udp) {
        entries.insert(key.to_string(), value);
    }

    let updated = record.update(entries, |content: &[u8]| sign_v4(secret, content))?;
    debug!(
        old_seq = record.sequence_number(),
        new_seq = updated.sequence_number(),
        "re-issued v4 record"
    );
    Ok(updated)
}

/// Parse and verify a v4 record.
pub fn parse_v4_record(bytes: &[u8]) -> Result<Record> {
    Record::from_rlp(bytes, verify_v4).map_err(|err| {
        debug!(len = bytes.len(), reason = %err, "rejected v4 record");
        SchemeError::from(err)
    })
}

/// The public key a record advertises under `sec256k1`.
pub fn public_key(record: &Record) -> Result<PublicKey> {
    let bytes: Vec<u8> = decode_entry(record, keys::SECP256K1)?;
    PublicKey::from_bytes(&bytes)
}

/// Decode the RLP item stored under `key`.
pub(crate) fn decode_entry<T: Decodable>(record: &Record, key: &'static str) -> Result<T> {
    let raw = record.get(key).ok_or(SchemeError::MissingKey(key))?;
    Rlp::new(raw)
        .as_val()
        .map_err(|err| SchemeError::InvalidValue {
            key,
            reason: err.to_string(),
        })
}

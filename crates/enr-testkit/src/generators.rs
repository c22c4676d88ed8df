//! Proptest generators for property-based testing.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use proptest::prelude::*;

use enr_core::{Entries, Record};
use enr_v4::{sign_v4, v4_entries, PublicKey, SecretKey};

/// Generate a valid secret key.
pub fn secret_key() -> impl Strategy<Value = SecretKey> {
    any::<[u8; 32]>().prop_filter_map("not a valid secp256k1 scalar", |bytes| {
        SecretKey::from_bytes(&bytes).ok()
    })
}

/// Generate a public key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    secret_key().prop_map(|secret| secret.public_key())
}

/// Generate any sequence number.
pub fn seq() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate an IPv4 or IPv6 address.
pub fn ip_addr() -> impl Strategy<Value = IpAddr> {
    prop_oneof![
        any::<[u8; 4]>().prop_map(|octets| IpAddr::V4(Ipv4Addr::from(octets))),
        any::<[u8; 16]>().prop_map(|octets| IpAddr::V6(Ipv6Addr::from(octets))),
    ]
}

/// Generate a record key.
pub fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}".prop_map(String::from)
}

/// Generate a value as a raw RLP item: a byte string of at most `max_len`
/// bytes, or the empty list.
pub fn value(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        4 => prop::collection::vec(any::<u8>(), 0..=max_len)
            .prop_map(|bytes| rlp::encode(&bytes).to_vec()),
        1 => Just(vec![0xc0]),
    ]
}

/// Generate arbitrary bytes offered as a value, most of which are not a
/// single RLP item.
pub fn raw_value() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..=12),
        value(8).prop_map(|mut item| {
            item.push(0x80);
            item
        }),
    ]
}

/// Generate an entry map that keeps a record well under the size ceiling.
pub fn entries() -> impl Strategy<Value = Entries> {
    prop::collection::btree_map(key(), value(24), 0..=6)
}

/// Parameters for generating a v4 record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub secret: SecretKey,
    pub seq: u64,
    pub ip: IpAddr,
    pub tcp: u16,
    pub udp: u16,
    /// Entries besides the v4 keys. A colliding key is overwritten by the
    /// endpoint value.
    pub extra: Entries,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            secret_key(),
            seq(),
            ip_addr(),
            any::<u16>(),
            any::<u16>(),
            prop::collection::btree_map(key(), value(16), 0..=3),
        )
            .prop_map(|(secret, seq, ip, tcp, udp, extra)| RecordParams {
                secret,
                seq,
                ip,
                tcp,
                udp,
                extra,
            })
            .boxed()
    }
}

/// Build a signed v4 record from parameters.
pub fn record_from_params(params: &RecordParams) -> Record {
    let mut entries: BTreeMap<String, Vec<u8>> = params.extra.clone();
    for (key, value) in v4_entries(&params.secret.public_key(), params.ip, params.tcp, params.udp) {
        entries.insert(key.to_string(), value);
    }
    let record = Record::new(params.seq, entries, |content: &[u8]| {
        sign_v4(&params.secret, content)
    });
    match record {
        Ok(record) => record,
        Err(err) => panic!("generated params built an invalid record: {err}"),
    }
}

//! Deterministic test vectors.
//!
//! v4 signing is deterministic (RFC 6979), so a fixed secret and endpoint
//! always produce the same record bytes. Every output of every vector is
//! pinned: key, node id, content, signature and the full record.

use std::net::IpAddr;

use enr_core::Record;
use enr_v4::{create_v4_record_with_seq, SecretKey};
use serde::{Deserialize, Serialize};

/// A deterministic v4 record vector.
#[derive(Debug, Clone)]
pub struct V4Vector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Secret key bytes.
    pub secret: [u8; 32],
    pub seq: u64,
    pub ip: &'static str,
    pub tcp: u16,
    pub udp: u16,
    /// Expected compressed public key (hex).
    pub expected_public_key: &'static str,
    /// Expected node id (hex).
    pub expected_node_id: &'static str,
    /// Expected signable content (hex).
    pub expected_content: &'static str,
    /// Expected 64-byte signature (hex).
    pub expected_signature: &'static str,
    /// Expected full record (hex).
    pub expected_record: &'static str,
}

/// Secret key `1`, whose public key is the curve generator.
pub const GENERATOR_SECRET: [u8; 32] = {
    let mut bytes = [0u8; 32];
    bytes[31] = 1;
    bytes
};

/// Get all vectors.
pub fn all_vectors() -> Vec<V4Vector> {
    vec![
        V4Vector {
            name: "generator key on localhost",
            secret: GENERATOR_SECRET,
            seq: 1,
            ip: "127.0.0.1",
            tcp: 3322,
            udp: 5544,
            expected_public_key: "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            expected_content: concat!(
                "f848",
                "01",
                "826964",
                "827634",
                "826970",
                "847f000001",
                "887365633235366b31",
                "a10279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
                "83746370",
                "820cfa",
                "83756470",
                "8215a8",
            ),
            expected_node_id: "c0a6c424ac7157ae408398df7e5f4552091a69125d5dfcb7b8c2659029395bdf",
            expected_signature: concat!(
                "353644ff356382ababa5a21e699145d4b27ef70a78d372ce0a71f708c3d997e6",
                "3ddbd455612bb2cd59a933d5e71533f559fd777af49785cd497184c89dc7639c",
            ),
            expected_record: concat!(
                "f88a",
                "b840",
                "353644ff356382ababa5a21e699145d4b27ef70a78d372ce0a71f708c3d997e6",
                "3ddbd455612bb2cd59a933d5e71533f559fd777af49785cd497184c89dc7639c",
                "01826964827634826970847f000001887365633235366b31",
                "a10279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
                "83746370820cfa837564708215a8",
            ),
        },
        V4Vector {
            name: "generator key, zero ports, seq 0",
            secret: GENERATOR_SECRET,
            seq: 0,
            ip: "10.0.0.1",
            tcp: 0,
            udp: 0,
            expected_public_key: "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            expected_content: concat!(
                "f844",
                "80",
                "826964",
                "827634",
                "826970",
                "840a000001",
                "887365633235366b31",
                "a10279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
                "83746370",
                "80",
                "83756470",
                "80",
            ),
            expected_node_id: "c0a6c424ac7157ae408398df7e5f4552091a69125d5dfcb7b8c2659029395bdf",
            expected_signature: concat!(
                "5d468679f09f5c217cdc11df65e2fa32e0c439a6da4c693a5c2d79d2c42ad6a4",
                "06769d08064df795a6c85fd355dc72be8f1909dbb8a0cf0bdb971f482856f6b6",
            ),
            expected_record: concat!(
                "f886",
                "b840",
                "5d468679f09f5c217cdc11df65e2fa32e0c439a6da4c693a5c2d79d2c42ad6a4",
                "06769d08064df795a6c85fd355dc72be8f1909dbb8a0cf0bdb971f482856f6b6",
                "80826964827634826970840a000001887365633235366b31",
                "a10279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
                "83746370808375647080",
            ),
        },
        V4Vector {
            name: "IPv6 endpoint",
            secret: [0x42; 32],
            seq: 7,
            ip: "::1",
            tcp: 30303,
            udp: 30301,
            expected_public_key: "0324653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c",
            expected_content: concat!(
                "f854",
                "07",
                "826964",
                "827634",
                "826970",
                "9000000000000000000000000000000001",
                "887365633235366b31",
                "a10324653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c",
                "83746370",
                "82765f",
                "83756470",
                "82765d",
            ),
            expected_node_id: "d885744b9cb252077d755ad317c5185167401ed00cf5f5b2fc97d9bbfdb7d025",
            expected_signature: concat!(
                "47597d69584860060b14b7daaf7cdf1aff1794545b4a841c457e9042c8d4a836",
                "13147c531e4ba2129a671624ce7abba5f7e5013915f85d1445d8ebb14d631372",
            ),
            expected_record: concat!(
                "f896",
                "b840",
                "47597d69584860060b14b7daaf7cdf1aff1794545b4a841c457e9042c8d4a836",
                "13147c531e4ba2129a671624ce7abba5f7e5013915f85d1445d8ebb14d631372",
                "07826964827634826970",
                "9000000000000000000000000000000001",
                "887365633235366b31",
                "a10324653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c",
                "8374637082765f8375647082765d",
            ),
        },
        V4Vector {
            name: "large sequence number",
            secret: [0x07; 32],
            seq: u64::MAX,
            ip: "192.168.1.20",
            tcp: 65535,
            udp: 1,
            expected_public_key: "02989c0b76cb563971fdc9bef31ec06c3560f3249d6ee9e5d83c57625596e05f6f",
            expected_content: concat!(
                "f84e",
                "88ffffffffffffffff",
                "826964",
                "827634",
                "826970",
                "84c0a80114",
                "887365633235366b31",
                "a102989c0b76cb563971fdc9bef31ec06c3560f3249d6ee9e5d83c57625596e05f6f",
                "83746370",
                "82ffff",
                "83756470",
                "01",
            ),
            expected_node_id: "704f64d16f07c8f7e50973174a62316623ad457f02cdc5d997ded67a383ec569",
            expected_signature: concat!(
                "049ee67c5252189204530d308ff69cb1edb39bd8a7aec853fdb07bb2ba402194",
                "07c24fa149bb89dd6303570266ff7ba70999341dc3a6efb083ab87d90bea8891",
            ),
            expected_record: concat!(
                "f890",
                "b840",
                "049ee67c5252189204530d308ff69cb1edb39bd8a7aec853fdb07bb2ba402194",
                "07c24fa149bb89dd6303570266ff7ba70999341dc3a6efb083ab87d90bea8891",
                "88ffffffffffffffff82696482763482697084c0a80114",
                "887365633235366b31",
                "a102989c0b76cb563971fdc9bef31ec06c3560f3249d6ee9e5d83c57625596e05f6f",
                "8374637082ffff8375647001",
            ),
        },
    ]
}

/// Build the record a vector describes.
pub fn record_from_vector(vector: &V4Vector) -> Record {
    let secret = match SecretKey::from_bytes(&vector.secret) {
        Ok(secret) => secret,
        Err(err) => panic!("vector '{}' has an invalid secret: {err}", vector.name),
    };
    let ip: IpAddr = match vector.ip.parse() {
        Ok(ip) => ip,
        Err(err) => panic!("vector '{}' has an invalid ip: {err}", vector.name),
    };
    match create_v4_record_with_seq(vector.seq, &secret, ip, vector.tcp, vector.udp) {
        Ok(record) => record,
        Err(err) => panic!("vector '{}' failed to build: {err}", vector.name),
    }
}

/// Computed outputs of a vector, serializable for cross-implementation
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorOutput {
    pub name: String,
    pub public_key: String,
    pub node_id: String,
    pub content: String,
    pub signature: String,
    pub record: String,
}

/// Compute the outputs of a vector.
pub fn vector_output(vector: &V4Vector) -> VectorOutput {
    let record = record_from_vector(vector);
    let public_key = match SecretKey::from_bytes(&vector.secret) {
        Ok(secret) => secret.public_key(),
        Err(err) => panic!("vector '{}' has an invalid secret: {err}", vector.name),
    };

    VectorOutput {
        name: vector.name.to_string(),
        public_key: public_key.to_hex(),
        node_id: public_key.node_id().to_hex(),
        content: hex::encode(record.content()),
        signature: hex::encode(record.signature()),
        record: hex::encode(record.to_rlp()),
    }
}

/// Names of the outputs of `vector` that differ from its expectations.
pub fn mismatches(vector: &V4Vector) -> Vec<&'static str> {
    let output = vector_output(vector);
    let checks = [
        ("public_key", output.public_key == vector.expected_public_key),
        ("node_id", output.node_id == vector.expected_node_id),
        ("content", output.content == vector.expected_content),
        ("signature", output.signature == vector.expected_signature),
        ("record", output.record == vector.expected_record),
    ];
    checks
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(field, _)| field)
        .collect()
}

/// Check every vector against its pinned expectations.
///
/// Returns `(name, matches, record hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let output = vector_output(v);
            (output.name, mismatches(v).is_empty(), output.record)
        })
        .collect()
}

/// All vector outputs as pretty JSON.
pub fn vectors_json() -> serde_json::Result<String> {
    let outputs: Vec<VectorOutput> = all_vectors().iter().map(vector_output).collect();
    serde_json::to_string_pretty(&outputs)
}

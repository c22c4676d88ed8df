//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::net::{IpAddr, Ipv4Addr};

use enr_core::Record;
use enr_v4::{create_v4_record_with_seq, sign_v4, v4_entries, PublicKey, SecretKey};

/// A node identity plus the endpoint it advertises.
pub struct TestFixture {
    pub secret: SecretKey,
    pub ip: IpAddr,
    pub tcp: u16,
    pub udp: u16,
}

impl TestFixture {
    /// Random key, `127.0.0.1`, tcp 3322, udp 5544.
    pub fn new() -> Self {
        Self::with_secret(SecretKey::generate())
    }

    /// Deterministic key from a seed. The seed must be a valid secp256k1
    /// scalar (non-zero, below the curve order).
    pub fn with_seed(seed: [u8; 32]) -> Self {
        match SecretKey::from_bytes(&seed) {
            Ok(secret) => Self::with_secret(secret),
            Err(err) => panic!("fixture seed {} is not a valid key: {err}", hex::encode(seed)),
        }
    }

    fn with_secret(secret: SecretKey) -> Self {
        Self {
            secret,
            ip: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            tcp: 3322,
            udp: 5544,
        }
    }

    /// Replace the advertised endpoint.
    pub fn endpoint(mut self, ip: IpAddr, tcp: u16, udp: u16) -> Self {
        self.ip = ip;
        self.tcp = tcp;
        self.udp = udp;
        self
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// Signed v4 record for the fixture's endpoint.
    pub fn make_record(&self, seq: u64) -> Record {
        match create_v4_record_with_seq(seq, &self.secret, self.ip, self.tcp, self.udp) {
            Ok(record) => record,
            Err(err) => panic!("fixture record failed to build: {err}"),
        }
    }

    /// Signed v4 record carrying extra entries next to the endpoint keys.
    /// Extra values are RLP-encoded as byte strings.
    pub fn make_record_with(&self, seq: u64, extra: &[(&str, &[u8])]) -> Record {
        let mut entries: Vec<(String, Vec<u8>)> = extra
            .iter()
            .map(|(key, value)| (key.to_string(), rlp::encode(&value.to_vec()).to_vec()))
            .collect();
        entries.extend(
            v4_entries(&self.public_key(), self.ip, self.tcp, self.udp)
                .into_iter()
                .map(|(key, value)| (key.to_string(), value)),
        );
        match Record::new(seq, entries, |content: &[u8]| sign_v4(&self.secret, content)) {
            Ok(record) => record,
            Err(err) => panic!("fixture record failed to build: {err}"),
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures with distinct deterministic keys.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[24..].copy_from_slice(&(i as u64 + 1).to_be_bytes());
            TestFixture::with_seed(seed)
        })
        .collect()
}

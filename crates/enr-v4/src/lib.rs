//! # ENR v4
//!
//! The "v4" identity scheme for node records: a compressed secp256k1 public
//! key under `sec256k1`, and a 64-byte ECDSA signature over the Keccak-256
//! digest of the record content.
//!
//! ```rust
//! use std::net::{IpAddr, Ipv4Addr};
//! use enr_v4::{create_v4_record, parse_v4_record, SecretKey, V4Endpoint};
//!
//! let secret = SecretKey::generate();
//! let ip = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
//! let record = create_v4_record(&secret, ip, 30303, 30303).unwrap();
//!
//! let parsed = parse_v4_record(&record.to_rlp()).unwrap();
//! let endpoint = V4Endpoint::from_record(&parsed).unwrap();
//! assert_eq!(endpoint.public_key, secret.public_key());
//! ```

pub mod crypto;
pub mod endpoint;
pub mod error;
pub mod keys;
pub mod scheme;

pub use crypto::{Keccak256Hash, NodeId, PublicKey, SecretKey, Signature};
pub use endpoint::V4Endpoint;
pub use error::{Result, SchemeError};
pub use scheme::{
    create_v4_record, create_v4_record_with_seq, parse_v4_record, public_key, sign_v4,
    update_v4_record, v4_entries, verify_v4, INITIAL_SEQUENCE_NUMBER,
};

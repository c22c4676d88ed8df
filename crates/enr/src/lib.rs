//! # ENR
//!
//! Ethereum Node Records: compact, signed, versioned key/value records a
//! peer uses to advertise its identity and endpoints during discovery.
//!
//! ## Overview
//!
//! - **Record**: Immutable. Sorted unique keys, a sequence number, and a
//!   signature over the canonical content. At most 300 bytes on the wire.
//! - **v4 scheme**: secp256k1 key under `sec256k1`, 64-byte ECDSA signature
//!   over the Keccak-256 digest of the content.
//! - **LocalNode**: Holds this node's key and record, and re-issues the
//!   record with the next sequence number when the endpoint changes.
//!
//! ## Usage
//!
//! ```rust
//! use std::net::{IpAddr, Ipv4Addr};
//! use enr::{parse_v4_record, LocalNode, LocalNodeConfig, SecretKey, V4Endpoint};
//!
//! let ip = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
//! let mut node = LocalNode::new(SecretKey::generate(), ip, 30303, 30303, LocalNodeConfig::default())
//!     .unwrap();
//!
//! // A remote peer receives the bytes and checks them.
//! let remote = parse_v4_record(&node.to_rlp()).unwrap();
//! assert_eq!(V4Endpoint::from_record(&remote).unwrap().tcp, 30303);
//!
//! // Moving to a new port bumps the sequence number.
//! assert!(node.set_endpoint(ip, 30304, 30303).unwrap());
//! assert_eq!(node.sequence_number(), 2);
//! ```
//!
//! ## Re-exports
//!
//! - `enr::core` - Scheme-agnostic record core
//! - `enr::v4` - The v4 identity scheme

pub mod error;
pub mod node;

pub use enr_core as core;
pub use enr_v4 as v4;

pub use error::{EnrError, Result};
pub use node::{LocalNode, LocalNodeConfig};

pub use enr_core::{Entries, KeyOrderViolation, Record, RecordError, MAX_RECORD_SIZE};
pub use enr_v4::{
    create_v4_record, create_v4_record_with_seq, keys, parse_v4_record, public_key,
    update_v4_record, Keccak256Hash, NodeId, PublicKey, SchemeError, SecretKey, Signature,
    V4Endpoint, INITIAL_SEQUENCE_NUMBER,
};

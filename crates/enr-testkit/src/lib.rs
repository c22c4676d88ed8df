//! # ENR Testkit
//!
//! Testing utilities for node records.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Vectors**: Fixed-seed v4 records with pinned content bytes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A node identity plus endpoint for quick setup
//!
//! ## Vectors
//!
//! ```rust
//! use enr_testkit::vectors::{all_vectors, record_from_vector};
//!
//! for vector in all_vectors() {
//!     let record = record_from_vector(&vector);
//!     println!("{}: {}", vector.name, record);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use enr_testkit::generators::{record_from_params, RecordParams};
//!
//! proptest! {
//!     #[test]
//!     fn encoding_is_deterministic(params: RecordParams) {
//!         let r1 = record_from_params(&params);
//!         let r2 = record_from_params(&params);
//!         prop_assert_eq!(r1.to_rlp(), r2.to_rlp());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use enr_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let record = fixture.make_record(1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{record_from_params, RecordParams};
pub use vectors::{all_vectors, record_from_vector, verify_all_vectors, V4Vector, VectorOutput};

//! Well-known record keys of the v4 identity scheme.

/// Identity scheme marker.
pub const ID: &str = "id";

/// Compressed secp256k1 public key (33 bytes).
pub const SECP256K1: &str = "sec256k1";

/// IP address, 4 or 16 raw bytes.
pub const IP: &str = "ip";

/// TCP port, big-endian.
pub const TCP: &str = "tcp";

/// UDP port, big-endian.
pub const UDP: &str = "udp";

/// Value of [`ID`] for this scheme.
pub const ID_V4: &str = "v4";

/// Every key a v4 record carries, in canonical order.
pub const ALL: [&str; 5] = [ID, IP, SECP256K1, TCP, UDP];

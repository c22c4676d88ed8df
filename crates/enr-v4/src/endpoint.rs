//! Typed view of the endpoint a v4 record advertises.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use enr_core::Record;

use crate::crypto::{NodeId, PublicKey};
use crate::error::{Result, SchemeError};
use crate::keys;
use crate::scheme::decode_entry;

/// Identity and connection endpoints decoded from a v4 record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct V4Endpoint {
    pub public_key: PublicKey,
    pub ip: IpAddr,
    pub tcp: u16,
    pub udp: u16,
}

impl V4Endpoint {
    /// Decode the endpoint fields of a record.
    ///
    /// The record must name the v4 scheme under `id`. The signature is not
    /// checked here; parse the record with
    /// [`parse_v4_record`](crate::parse_v4_record) first when it comes from
    /// the network.
    pub fn from_record(record: &Record) -> Result<Self> {
        let id: Vec<u8> = decode_entry(record, keys::ID)?;
        if id != keys::ID_V4.as_bytes() {
            return Err(SchemeError::UnsupportedScheme(
                String::from_utf8_lossy(&id).into_owned(),
            ));
        }

        let key_bytes: Vec<u8> = decode_entry(record, keys::SECP256K1)?;
        let public_key = PublicKey::from_bytes(&key_bytes).map_err(|_| SchemeError::InvalidValue {
            key: keys::SECP256K1,
            reason: "not a compressed secp256k1 point".to_string(),
        })?;

        let ip_bytes: Vec<u8> = decode_entry(record, keys::IP)?;
        let ip = ip_from_bytes(&ip_bytes)?;

        Ok(Self {
            public_key,
            ip,
            tcp: decode_entry(record, keys::TCP)?,
            udp: decode_entry(record, keys::UDP)?,
        })
    }

    pub fn socket_addr_tcp(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.tcp)
    }

    pub fn socket_addr_udp(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.udp)
    }

    pub fn node_id(&self) -> NodeId {
        self.public_key.node_id()
    }
}

fn ip_from_bytes(bytes: &[u8]) -> Result<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(SchemeError::InvalidValue {
        key: keys::IP,
        reason: format!("expected 4 or 16 bytes, got {}", bytes.len()),
    })
}

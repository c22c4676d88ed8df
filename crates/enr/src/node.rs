//! The local node: owner of this node's own record.
//!
//! `LocalNode` keeps the secret key and the current signed record together,
//! and re-issues the record with the next sequence number whenever the
//! advertised endpoint changes.

use std::net::IpAddr;

use enr_core::{Record, MAX_RECORD_SIZE};
use enr_v4::{
    create_v4_record_with_seq, update_v4_record, NodeId, PublicKey, SecretKey, V4Endpoint,
    INITIAL_SEQUENCE_NUMBER,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EnrError, Result};

/// Configuration for a [`LocalNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalNodeConfig {
    /// Sequence number of the first record.
    pub initial_sequence_number: u64,
    /// Size limit applied before a record is published. Values above
    /// [`MAX_RECORD_SIZE`] are clamped to it.
    pub max_record_size: usize,
}

impl LocalNodeConfig {
    /// The size limit actually enforced.
    pub fn effective_max_record_size(&self) -> usize {
        self.max_record_size.min(MAX_RECORD_SIZE)
    }
}

impl Default for LocalNodeConfig {
    fn default() -> Self {
        Self {
            initial_sequence_number: INITIAL_SEQUENCE_NUMBER,
            max_record_size: MAX_RECORD_SIZE,
        }
    }
}

/// This node's identity and its current record.
pub struct LocalNode {
    /// The identity key that signs every record.
    secret: SecretKey,
    /// The current record.
    record: Record,
    /// Endpoint decoded from the current record.
    endpoint: V4Endpoint,
    config: LocalNodeConfig,
}

impl LocalNode {
    /// Build and self-check the first record.
    pub fn new(
        secret: SecretKey,
        ip: IpAddr,
        tcp: u16,
        udp: u16,
        config: LocalNodeConfig,
    ) -> Result<Self> {
        let record =
            create_v4_record_with_seq(config.initial_sequence_number, &secret, ip, tcp, udp)?;
        check_size(&record, config.effective_max_record_size())?;
        let endpoint = V4Endpoint::from_record(&record)?;

        info!(
            node_id = %endpoint.node_id(),
            seq = record.sequence_number(),
            "local record created"
        );

        Ok(Self {
            secret,
            record,
            endpoint,
            config,
        })
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn sequence_number(&self) -> u64 {
        self.record.sequence_number()
    }

    /// Wire form of the current record.
    pub fn to_rlp(&self) -> Vec<u8> {
        self.record.to_rlp()
    }

    pub fn endpoint(&self) -> &V4Endpoint {
        &self.endpoint
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    pub fn node_id(&self) -> NodeId {
        self.endpoint.node_id()
    }

    pub fn config(&self) -> &LocalNodeConfig {
        &self.config
    }

    /// Advertise a new endpoint.
    ///
    /// Returns `false` and keeps the record if nothing changed. Otherwise the
    /// record is re-issued with the next sequence number. If the new record
    /// fails the size check the current one stays in place.
    pub fn set_endpoint(&mut self, ip: IpAddr, tcp: u16, udp: u16) -> Result<bool> {
        if self.endpoint.ip == ip && self.endpoint.tcp == tcp && self.endpoint.udp == udp {
            return Ok(false);
        }

        let record = update_v4_record(&self.secret, &self.record, ip, tcp, udp)?;
        check_size(&record, self.config.effective_max_record_size())?;
        let endpoint = V4Endpoint::from_record(&record)?;

        info!(
            old_seq = self.record.sequence_number(),
            new_seq = record.sequence_number(),
            %ip,
            tcp,
            udp,
            "local record re-issued"
        );

        self.record = record;
        self.endpoint = endpoint;
        Ok(true)
    }
}

impl std::fmt::Debug for LocalNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalNode")
            .field("node_id", &self.node_id())
            .field("seq", &self.sequence_number())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn check_size(record: &Record, max: usize) -> Result<()> {
    let size = record.encoded_len();
    if size > max {
        warn!(size, max, seq = record.sequence_number(), "local record over size limit");
        return Err(EnrError::RecordTooLarge { size, max });
    }
    Ok(())
}

//! Session configuration and lifecycle.
//!
//! A [`Session`] pairs a transport with a peer and carries the blocking
//! transaction engine (see the [`client`](crate::client) module for the
//! operations themselves).

use crate::error::{Error, Result};
use crate::transport::{ExchangeStatus, OpenTransport, Transport};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

// Transport initialization commonly touches process-global state (config
// parsing, MIB loading), so concurrent opens from different threads are
// serialized behind one process-wide lock.
static OPEN_LOCK: Mutex<()> = Mutex::new(());

/// Protocol version, passed through to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    /// SNMPv1
    V1,
    /// SNMPv2c
    #[default]
    V2c,
    /// SNMPv3
    V3,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2c => write!(f, "v2c"),
            Self::V3 => write!(f, "v3"),
        }
    }
}

/// Configuration for opening a session.
///
/// The peer string (`scheme:host:port`) is opaque to this crate; the
/// transport interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Peer address, e.g. `udp:127.0.0.1:161`.
    pub peer: String,
    /// Community string for v1/v2c.
    pub community: String,
    /// Protocol version.
    pub version: Version,
    /// Retry attempts the transport should make per exchange.
    pub retries: u32,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            peer: "udp:127.0.0.1:161".to_string(),
            community: "public".to_string(),
            version: Version::V2c,
            retries: 3,
            timeout: Duration::from_secs(1),
        }
    }
}

/// A blocking session with a single peer.
///
/// One request in flight at a time; independent sessions may run from
/// independent threads.
pub struct Session<T> {
    transport: Option<T>,
    peer: String,
}

impl<T: OpenTransport> Session<T> {
    /// Open a session for the peer described by `config`.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let _guard = OPEN_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        debug!(
            target: "sync_snmp::session",
            peer = %config.peer,
            version = %config.version,
            retries = config.retries,
            "opening session"
        );

        let transport = T::open(config).map_err(|diagnostic| Error::Transport {
            status: ExchangeStatus::Error,
            diagnostic,
        })?;

        Ok(Self {
            transport: Some(transport),
            peer: config.peer.clone(),
        })
    }
}

impl<T: Transport> Session<T> {
    /// Wrap an already-open transport.
    pub fn from_transport(transport: T, peer: impl Into<String>) -> Self {
        Self {
            transport: Some(transport),
            peer: peer.into(),
        }
    }

    /// Check if the session is open.
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Close the session, dropping the transport. Idempotent.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!(target: "sync_snmp::session", peer = %self.peer, "closed session");
        }
    }

    /// The peer this session was opened for.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub(crate) fn transport_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }
}

// Allow large error types - the Error enum includes OIDs inline for debugging convenience.
// Boxing them would add complexity and allocations for a marginal size reduction.
#![allow(clippy::result_large_err)]

//! # sync-snmp
//!
//! Synchronous SNMP client library with explicit PDU ownership.
//!
//! ## Features
//!
//! - OID algebra: parsing, ordering, parent/child derivation
//! - Ordered variable lists with set/map views and typed extractors
//! - PDUs with an explicit four-state ownership lifecycle
//! - Blocking GET / GETNEXT / GETBULK / SET transaction engine
//! - SNMPv2 trap sending with the RFC 3416 varbind layout
//!
//! Wire encoding, sockets, and retries live behind the
//! [`Transport`](transport::Transport) trait; this crate owns everything
//! from the PDU layer up.
//!
//! ## Quick Start
//!
//! ```
//! use sync_snmp::{oid, Session, Value};
//! use sync_snmp::transport::MockTransport;
//!
//! # fn main() -> Result<(), sync_snmp::Error> {
//! let mock = MockTransport::new();
//! mock.insert(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("gateway"));
//!
//! let mut session = Session::from_transport(mock, "udp:127.0.0.1:161");
//! let mut response = session.get(&oid!(1, 3, 6, 1, 2, 1, 1, 5, 0))?;
//!
//! let name = response.varlist()?.get_string(&oid!(1, 3, 6, 1, 2, 1, 1, 5, 0))?;
//! assert_eq!(name, "gateway");
//!
//! response.release();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod oid;
pub mod pdu;
pub mod session;
pub mod transport;
pub mod trap;
pub mod value;
pub mod varbind;
pub mod varlist;

// Re-exports for convenience
pub use client::{DEFAULT_MAX_REPETITIONS, DEFAULT_NON_REPEATERS};
pub use error::{Error, Result};
pub use oid::{Oid, WellKnown};
pub use pdu::{Pdu, PduState, PduType};
pub use session::{Session, SessionConfig, Version};
pub use transport::{Diagnostic, ExchangeStatus, OpenTransport, PduPayload, Transport};
pub use value::Value;
pub use varbind::VarBind;
pub use varlist::VarList;

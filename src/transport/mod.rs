//! Transport abstraction.
//!
//! This library does no wire encoding or socket work of its own. Everything
//! below the PDU layer - BER, retries, timeouts, session negotiation - lives
//! behind the [`Transport`] trait, and the transaction engine only ever
//! talks to that trait.

pub mod mock;

use crate::pdu::PduType;
use crate::session::SessionConfig;
use crate::varlist::VarList;

pub use mock::MockTransport;

/// Outcome of a blocking request/response exchange.
///
/// Mirrors the classic manager-API status triple: the exchange either
/// completed, timed out after the transport's own retries, or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStatus {
    /// A response came back. The response payload may still carry a
    /// non-zero agent error status.
    Success,
    /// No response within the transport's timeout/retry budget.
    Timeout,
    /// The exchange failed outright.
    Error,
}

impl std::fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Timeout => write!(f, "timeout"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The transport's last-error report: two numeric codes plus text.
///
/// `lib_errno` is the transport library's own error code and `snmp_errno`
/// the protocol-level one; both are opaque to this crate and surfaced
/// verbatim in [`Error::Transport`](crate::Error::Transport).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    /// Transport-library error code.
    pub lib_errno: i32,
    /// Protocol-level error code.
    pub snmp_errno: i32,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic from its three parts.
    pub fn new(lib_errno: i32, snmp_errno: i32, message: impl Into<String>) -> Self {
        Self {
            lib_errno,
            snmp_errno,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (lib errno {}, snmp errno {})",
            self.message, self.lib_errno, self.snmp_errno
        )
    }
}

/// The wire-facing content of a PDU, detached from its ownership state.
///
/// This is what crosses the transport boundary in both directions. For
/// GETBULK requests `error_status` carries the non-repeaters count and
/// `error_index` the max-repetitions count; see
/// [`Pdu::set_bulk_counts`](crate::pdu::Pdu::set_bulk_counts).
#[derive(Debug, Clone, PartialEq)]
pub struct PduPayload {
    /// The operation (request) or RESPONSE tag (reply).
    pub pdu_type: PduType,
    /// The variable bindings.
    pub varlist: VarList,
    /// Agent error status in responses; non-repeaters in GETBULK requests.
    pub error_status: i32,
    /// Agent error index in responses; max-repetitions in GETBULK requests.
    pub error_index: i32,
}

/// A blocking SNMP transport.
///
/// Implementations own the socket, the codec, and the retry policy. The
/// transaction engine hands over a request payload and takes back whatever
/// the transport produced.
pub trait Transport {
    /// Send a request and block for the response.
    ///
    /// The request payload is consumed unconditionally - there is no way to
    /// get it back, whatever the outcome. A `Success` status with a payload
    /// is the only combination the engine treats as a reply; any other
    /// combination is reported through [`last_error`](Self::last_error).
    fn sync_send_receive(&mut self, request: PduPayload) -> (ExchangeStatus, Option<PduPayload>);

    /// Send a v2 notification without waiting for any reply.
    ///
    /// The variable list is consumed on every path. Returns 0 when the
    /// transport accepted the notification, any other value on rejection.
    fn fire_and_forget(&mut self, varlist: VarList) -> i32;

    /// The diagnostic for the most recent failure on this transport.
    fn last_error(&self) -> Diagnostic;
}

/// A transport that can be opened from session configuration.
///
/// Split from [`Transport`] so the transaction engine can be driven by
/// hand-constructed transports in tests.
pub trait OpenTransport: Transport + Sized {
    /// Open a transport for the peer described by `config`.
    fn open(config: &SessionConfig) -> std::result::Result<Self, Diagnostic>;
}

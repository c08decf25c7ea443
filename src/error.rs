//! Error types for sync-snmp.
//!
//! A single [`Error`] enum covers all failure modes: bad arguments, lookup
//! and typing failures on variable lists, lifecycle misuse of a PDU, and
//! transport failures carrying the transport's two-code diagnostic.

use crate::oid::Oid;
use crate::transport::{Diagnostic, ExchangeStatus};

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all sync-snmp operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A caller-supplied argument was unusable: an empty OID, an empty
    /// request, a closed session, or a PDU in the wrong lifecycle state.
    #[error("invalid argument: {0}")]
    InvalidArgument(Box<str>),

    /// A variable list lookup missed.
    #[error("variable list does not contain OID {oid}")]
    NotFound { oid: Oid },

    /// A typed extractor hit a binding of a different type.
    #[error("OID {oid} is not {expected} (found {actual})")]
    TypeMismatch {
        oid: Oid,
        expected: &'static str,
        actual: &'static str,
    },

    /// A value has no display rendering.
    #[error("OID {oid} has no string representation (type {actual})")]
    UnsupportedType { oid: Oid, actual: &'static str },

    /// Positional access past the end of an OID or variable list.
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// First/last OID requested from an empty variable list.
    #[error("cannot get an OID from an empty variable list")]
    EmptyVarlist,

    /// The transport exchange failed, or the agent returned an error
    /// response. Carries the transport's last diagnostic.
    #[error("transport exchange failed ({status}): {diagnostic}")]
    Transport {
        status: ExchangeStatus,
        diagnostic: Diagnostic,
    },

    /// The transport rejected a notification send.
    #[error("notification send failed (rc {rc})")]
    TrapSend { rc: i32 },
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<Box<str>>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    #[test]
    fn test_display_messages() {
        let err = Error::invalid_argument("cannot send an empty request");
        assert_eq!(
            err.to_string(),
            "invalid argument: cannot send an empty request"
        );

        let err = Error::NotFound { oid: oid!(1, 3, 6) };
        assert_eq!(err.to_string(), "variable list does not contain OID .1.3.6");

        let err = Error::TypeMismatch {
            oid: oid!(1, 3),
            expected: "integer",
            actual: "octet string",
        };
        assert_eq!(
            err.to_string(),
            "OID .1.3 is not integer (found octet string)"
        );
    }

    #[test]
    fn test_transport_display_carries_diagnostic() {
        let err = Error::Transport {
            status: ExchangeStatus::Timeout,
            diagnostic: Diagnostic::new(0, 5, "Timeout"),
        };
        let text = err.to_string();
        assert!(text.contains("timeout"));
        assert!(text.contains("Timeout"));
    }
}

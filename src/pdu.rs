//! Request-response PDU with explicit ownership tracking.
//!
//! Native manager APIs are littered with use-after-free and double-free
//! traps around PDUs: the transport frees the request on send, replies must
//! be freed by the caller, and adopted structures belong to whoever adopted
//! them. [`Pdu`] makes that lifecycle explicit as a four-state enum instead
//! of leaving it to comments.

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::transport::PduPayload;
use crate::value::Value;
use crate::varlist::VarList;
use std::collections::BTreeSet;

/// PDU operation tags (RFC 3416 context-specific tag values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PduType {
    /// GET request (0xA0)
    Get = 0xA0,
    /// GETNEXT request (0xA1)
    GetNext = 0xA1,
    /// RESPONSE (0xA2)
    Response = 0xA2,
    /// SET request (0xA3)
    Set = 0xA3,
    /// GETBULK request (0xA5)
    GetBulk = 0xA5,
    /// INFORM request (0xA6)
    Inform = 0xA6,
    /// SNMPv2 trap (0xA7)
    TrapV2 = 0xA7,
    /// REPORT (0xA8)
    Report = 0xA8,
}

impl PduType {
    /// Parse from a BER tag value.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0xA0 => Some(Self::Get),
            0xA1 => Some(Self::GetNext),
            0xA2 => Some(Self::Response),
            0xA3 => Some(Self::Set),
            0xA5 => Some(Self::GetBulk),
            0xA6 => Some(Self::Inform),
            0xA7 => Some(Self::TrapV2),
            0xA8 => Some(Self::Report),
            _ => None,
        }
    }

    /// The BER tag value.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::GetNext => "GETNEXT",
            Self::Response => "RESPONSE",
            Self::Set => "SET",
            Self::GetBulk => "GETBULK",
            Self::Inform => "INFORM",
            Self::TrapV2 => "TRAPv2",
            Self::Report => "REPORT",
        };
        write!(f, "{}", name)
    }
}

/// Where a PDU is in its ownership lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduState {
    /// Built locally; the holder owns the payload and must release it.
    Fresh,
    /// The payload was handed to the transport; nothing left to release.
    Consumed,
    /// Explicitly released; a terminal state.
    Released,
    /// Adopted from the transport (a response); the holder owns the payload.
    Foreign,
}

/// A request-response PDU.
///
/// # Examples
///
/// ```
/// use sync_snmp::oid;
/// use sync_snmp::pdu::{Pdu, PduState, PduType};
///
/// let mut request = Pdu::new(PduType::Get);
/// request.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).unwrap();
/// assert_eq!(request.state(), PduState::Fresh);
/// assert_eq!(request.size(), 1);
///
/// request.release();
/// assert_eq!(request.state(), PduState::Released);
/// // releasing twice is fine
/// request.release();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pdu {
    pdu_type: PduType,
    state: PduState,
    varlist: Option<VarList>,
    error_status: i32,
    error_index: i32,
}

impl Pdu {
    /// Create an empty PDU in the [`Fresh`](PduState::Fresh) state.
    ///
    /// The variable list is created lazily by the first `add_*` call.
    pub fn new(pdu_type: PduType) -> Self {
        Self {
            pdu_type,
            state: PduState::Fresh,
            varlist: None,
            error_status: 0,
            error_index: 0,
        }
    }

    /// Adopt an externally produced variable list.
    ///
    /// The PDU starts in the [`Foreign`](PduState::Foreign) state: the
    /// holder owns the payload just as with a received response.
    pub fn from_varlist(pdu_type: PduType, varlist: VarList) -> Self {
        Self {
            pdu_type,
            state: PduState::Foreign,
            varlist: Some(varlist),
            error_status: 0,
            error_index: 0,
        }
    }

    /// Wrap a payload received from the transport.
    pub(crate) fn from_payload(payload: PduPayload) -> Self {
        Self {
            pdu_type: payload.pdu_type,
            state: PduState::Foreign,
            varlist: Some(payload.varlist),
            error_status: payload.error_status,
            error_index: payload.error_index,
        }
    }

    /// The operation tag.
    pub fn pdu_type(&self) -> PduType {
        self.pdu_type
    }

    /// The ownership state.
    pub fn state(&self) -> PduState {
        self.state
    }

    /// Agent error status (responses), or non-repeaters (GETBULK requests).
    pub fn error_status(&self) -> i32 {
        self.error_status
    }

    /// Agent error index (responses), or max-repetitions (GETBULK requests).
    pub fn error_index(&self) -> i32 {
        self.error_index
    }

    /// Release the payload.
    ///
    /// Only a [`Fresh`](PduState::Fresh) or [`Foreign`](PduState::Foreign)
    /// PDU has anything to release. Idempotent: releasing a
    /// [`Consumed`](PduState::Consumed) or already-released PDU is a no-op.
    pub fn release(&mut self) {
        match self.state {
            PduState::Fresh | PduState::Foreign => {
                self.varlist = None;
                self.state = PduState::Released;
            }
            PduState::Consumed | PduState::Released => {}
        }
    }

    /// Mark the PDU released without dropping the payload reference.
    ///
    /// Only correct when something else already owns the payload - for
    /// instance after the transport has taken it. Calling this on a PDU
    /// that still owns its payload leaks the ownership intent; the payload
    /// itself is still dropped safely when the PDU goes away, but any
    /// external resource tracking tied to release() is bypassed.
    pub fn clear_without_releasing(&mut self) {
        self.state = PduState::Released;
    }

    /// Check if the PDU has no bindings.
    pub fn is_empty(&self) -> bool {
        self.varlist.as_ref().map_or(true, VarList::is_empty)
    }

    /// Number of bindings.
    pub fn size(&self) -> usize {
        self.varlist.as_ref().map_or(0, VarList::len)
    }

    /// Check if the PDU holds a binding for the given OID.
    pub fn contains(&self, oid: &Oid) -> bool {
        self.varlist.as_ref().is_some_and(|vl| vl.contains(oid))
    }

    /// Borrow the variable list.
    ///
    /// Fails on a PDU whose payload is gone (consumed or released) or was
    /// never created.
    pub fn varlist(&self) -> Result<&VarList> {
        self.varlist.as_ref().ok_or_else(|| {
            Error::invalid_argument("the PDU does not contain a variable list")
        })
    }

    /// The OID of the first binding.
    pub fn first_oid(&self) -> Result<Oid> {
        self.varlist()?.first_oid()
    }

    /// The OID of the last binding.
    pub fn last_oid(&self) -> Result<Oid> {
        self.varlist()?.last_oid()
    }

    /// Append a binding with a NULL placeholder value.
    ///
    /// Creates the variable list on first use. Fails on a consumed or
    /// released PDU.
    pub fn add_null_var(&mut self, oid: &Oid) -> Result<&mut Self> {
        self.writable_varlist()?.add_null_var(oid)?;
        Ok(self)
    }

    /// Append NULL-value bindings for every OID in the iterator.
    pub fn add_null_vars<'a>(
        &mut self,
        oids: impl IntoIterator<Item = &'a Oid>,
    ) -> Result<&mut Self> {
        self.writable_varlist()?.add_null_vars(oids)?;
        Ok(self)
    }

    /// Append a binding carrying a concrete value.
    pub fn add_var(&mut self, oid: &Oid, value: Value) -> Result<&mut Self> {
        self.writable_varlist()?.add_var(oid, value)?;
        Ok(self)
    }

    /// The PDU's OIDs as a deduplicated, ordered set.
    pub fn oids_set(&self) -> BTreeSet<Oid> {
        self.varlist.as_ref().map(VarList::oids_set).unwrap_or_default()
    }

    /// Store GETBULK counts in the repurposed header fields.
    ///
    /// GETBULK requests have no use for an error status or index, so the
    /// protocol reuses those two header fields: `error_status` carries the
    /// non-repeaters count and `error_index` the max-repetitions count.
    pub fn set_bulk_counts(&mut self, non_repeaters: u32, max_repetitions: u32) {
        self.error_status = non_repeaters as i32;
        self.error_index = max_repetitions as i32;
    }

    /// Detach the payload for the transport, leaving the PDU
    /// [`Consumed`](PduState::Consumed).
    pub(crate) fn take_payload(&mut self) -> PduPayload {
        let varlist = self.varlist.take().unwrap_or_default();
        self.state = PduState::Consumed;
        PduPayload {
            pdu_type: self.pdu_type,
            varlist,
            error_status: self.error_status,
            error_index: self.error_index,
        }
    }

    fn writable_varlist(&mut self) -> Result<&mut VarList> {
        match self.state {
            PduState::Fresh | PduState::Foreign => {
                Ok(self.varlist.get_or_insert_with(VarList::new))
            }
            PduState::Consumed => Err(Error::invalid_argument(
                "cannot add bindings to a consumed PDU",
            )),
            PduState::Released => Err(Error::invalid_argument(
                "cannot add bindings to a released PDU",
            )),
        }
    }
}

impl std::fmt::Display for Pdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.varlist {
            Some(vl) if !vl.is_empty() => write!(f, "{} {}", self.pdu_type, vl),
            _ => writeln!(f, "{} PDU is empty", self.pdu_type),
        }
    }
}

//! The blocking transaction engine.
//!
//! Every operation here funnels through [`Session::sync`], which owns the
//! one rule that matters: once a request payload is handed to the
//! transport it is gone, whatever the outcome. The request PDU is left
//! [`Consumed`](crate::pdu::PduState::Consumed) and the caller gets either
//! a [`Foreign`](crate::pdu::PduState::Foreign) response PDU to release
//! later, or an error carrying the transport's diagnostic.

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::pdu::{Pdu, PduType};
use crate::session::Session;
use crate::transport::{ExchangeStatus, Transport};
use crate::value::Value;
use bytes::Bytes;
use std::collections::BTreeSet;
use tracing::{trace, warn};

/// Default max-repetitions for GETBULK convenience calls.
pub const DEFAULT_MAX_REPETITIONS: u32 = 50;

/// Default non-repeaters for GETBULK convenience calls.
pub const DEFAULT_NON_REPEATERS: u32 = 0;

impl<T: Transport> Session<T> {
    /// Send a request and block for the response.
    ///
    /// The request payload is consumed by the transport regardless of
    /// outcome; afterwards `request` is in the
    /// [`Consumed`](crate::pdu::PduState::Consumed) state and releasing it
    /// is a no-op. On success the response comes back as a
    /// [`Foreign`](crate::pdu::PduState::Foreign) RESPONSE PDU owned by the
    /// caller.
    ///
    /// A transport failure, a missing response, or a response with a
    /// non-zero agent error status all map to [`Error::Transport`] with the
    /// transport's last diagnostic; any partial response is dropped.
    pub fn sync(&mut self, request: &mut Pdu) -> Result<Pdu> {
        if request.is_empty() {
            return Err(Error::invalid_argument("cannot send an empty request"));
        }

        let Some(transport) = self.transport_mut() else {
            // the request must not outlive a failed send path
            request.release();
            return Err(Error::invalid_argument("session is not open"));
        };

        let pdu_type = request.pdu_type();
        let size = request.size();
        let payload = request.take_payload();

        trace!(
            target: "sync_snmp::client",
            %pdu_type,
            bindings = size,
            "sending request"
        );

        let (status, response) = transport.sync_send_receive(payload);

        match response {
            Some(response)
                if status == ExchangeStatus::Success && response.error_status == 0 =>
            {
                trace!(
                    target: "sync_snmp::client",
                    bindings = response.varlist.len(),
                    "received response"
                );
                Ok(Pdu::from_payload(response))
            }
            _ => {
                let diagnostic = transport.last_error();
                warn!(
                    target: "sync_snmp::client",
                    %pdu_type,
                    %status,
                    diagnostic = %diagnostic,
                    "exchange failed"
                );
                Err(Error::Transport { status, diagnostic })
            }
        }
    }

    /// GET a single OID.
    pub fn get(&mut self, oid: &Oid) -> Result<Pdu> {
        let mut request = Pdu::new(PduType::Get);
        request.add_null_var(oid)?;
        self.sync(&mut request)
    }

    /// GET a set of OIDs in one request.
    ///
    /// The set's natural order is the request order. An empty set is an
    /// error.
    pub fn get_many(&mut self, oids: &BTreeSet<Oid>) -> Result<Pdu> {
        if oids.is_empty() {
            return Err(Error::invalid_argument(
                "cannot issue a GET request for zero OIDs",
            ));
        }
        let mut request = Pdu::new(PduType::Get);
        request.add_null_vars(oids)?;
        self.sync(&mut request)
    }

    /// GETNEXT from a single OID.
    pub fn get_next(&mut self, oid: &Oid) -> Result<Pdu> {
        let mut request = Pdu::new(PduType::GetNext);
        request.add_null_var(oid)?;
        self.sync(&mut request)
    }

    /// GETNEXT continuing from a previous PDU.
    ///
    /// A PDU that is already a GETNEXT request is sent unchanged. Anything
    /// else - typically the RESPONSE from the previous step of a walk - is
    /// continued from the address of its *last* binding: the previous PDU
    /// is released and a fresh single-OID GETNEXT is issued. Using the tail
    /// keeps a walk moving forward when the response carries several
    /// bindings, since the tail is the furthest point reached.
    pub fn get_next_pdu(&mut self, pdu: &mut Pdu) -> Result<Pdu> {
        if pdu.pdu_type() == PduType::GetNext {
            return self.sync(pdu);
        }
        let oid = pdu.last_oid()?;
        pdu.release();
        self.get_next(&oid)
    }

    /// GETBULK from a single OID.
    ///
    /// See [`DEFAULT_MAX_REPETITIONS`] and [`DEFAULT_NON_REPEATERS`] for
    /// the customary counts.
    pub fn get_bulk(
        &mut self,
        oid: &Oid,
        max_repetitions: u32,
        non_repeaters: u32,
    ) -> Result<Pdu> {
        let mut request = Pdu::new(PduType::GetBulk);
        request.add_null_var(oid)?;
        request.set_bulk_counts(non_repeaters, max_repetitions);
        self.sync(&mut request)
    }

    /// GETBULK over the OIDs of an existing PDU.
    ///
    /// A PDU of any other type is upgraded in place: its OID set is
    /// extracted, the PDU is released, and a fresh GETBULK request is
    /// built over the same OIDs. The counts land in the repurposed
    /// `error_status`/`error_index` header fields either way.
    pub fn get_bulk_pdu(
        &mut self,
        pdu: &mut Pdu,
        max_repetitions: u32,
        non_repeaters: u32,
    ) -> Result<Pdu> {
        if pdu.pdu_type() != PduType::GetBulk {
            let oids = pdu.oids_set();
            if oids.is_empty() {
                return Err(Error::invalid_argument(
                    "cannot issue a GETBULK request for zero OIDs",
                ));
            }
            pdu.release();
            *pdu = Pdu::new(PduType::GetBulk);
            pdu.add_null_vars(&oids)?;
        }
        pdu.set_bulk_counts(non_repeaters, max_repetitions);
        self.sync(pdu)
    }

    /// SET a boolean leaf.
    pub fn set_bool(&mut self, oid: &Oid, value: bool) -> Result<Pdu> {
        self.set_value(oid, Value::Boolean(value))
    }

    /// SET a signed 32-bit integer leaf.
    pub fn set_int(&mut self, oid: &Oid, value: i32) -> Result<Pdu> {
        self.set_value(oid, Value::Integer(value))
    }

    /// SET a signed 64-bit integer leaf.
    pub fn set_int64(&mut self, oid: &Oid, value: i64) -> Result<Pdu> {
        self.set_value(oid, Value::Integer64(value))
    }

    /// SET a gauge leaf.
    pub fn set_gauge(&mut self, oid: &Oid, value: u32) -> Result<Pdu> {
        self.set_value(oid, Value::Gauge32(value))
    }

    /// SET an octet string leaf.
    pub fn set_octet_string(&mut self, oid: &Oid, value: impl Into<Bytes>) -> Result<Pdu> {
        self.set_value(oid, Value::OctetString(value.into()))
    }

    /// SET an OID-valued leaf.
    pub fn set_oid(&mut self, oid: &Oid, value: &Oid) -> Result<Pdu> {
        self.set_value(oid, Value::ObjectIdentifier(value.clone()))
    }

    fn set_value(&mut self, oid: &Oid, value: Value) -> Result<Pdu> {
        let mut request = Pdu::new(PduType::Set);
        request.add_var(oid, value)?;
        self.sync(&mut request)
    }
}

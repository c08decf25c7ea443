//! Mock transport for testing.
//!
//! Provides a programmable transport backed by an in-memory MIB, so the
//! transaction engine can be exercised without a network or an agent.

use super::{Diagnostic, ExchangeStatus, OpenTransport, PduPayload, Transport};
use crate::oid::Oid;
use crate::pdu::PduType;
use crate::session::SessionConfig;
use crate::value::Value;
use crate::varbind::VarBind;
use crate::varlist::VarList;
use std::collections::{BTreeMap, VecDeque};
use std::ops::Bound;
use std::sync::{Arc, Mutex};

/// Agent error status for a missing name (RFC 3416).
const NO_SUCH_NAME: i32 = 2;

/// A scripted outcome for the next exchange, overriding the simulated MIB.
#[derive(Clone, Debug)]
pub enum ScriptedOutcome {
    /// Simulate a timeout.
    Timeout,
    /// Simulate a transport failure with this diagnostic.
    Fail(Diagnostic),
    /// Simulate an agent error response with this status and index.
    AgentError { status: i32, index: i32 },
}

struct MockTransportInner {
    /// Simulated MIB, walked in OID order for GETNEXT/GETBULK.
    mib: BTreeMap<Oid, Value>,
    /// Outcomes queued ahead of the MIB simulation.
    scripted: VecDeque<ScriptedOutcome>,
    /// Every request payload handed to the transport.
    requests: Vec<PduPayload>,
    /// Every notification varlist accepted by fire_and_forget.
    traps: Vec<VarList>,
    /// Notifications are rejected until the trap path is initialized.
    trap_ready: bool,
    last_error: Diagnostic,
}

/// Mock transport backed by an in-memory MIB.
///
/// Clones share state, so tests can keep one handle for inspection while
/// the session drives another.
///
/// # Example
///
/// ```
/// use sync_snmp::oid;
/// use sync_snmp::transport::MockTransport;
/// use sync_snmp::Value;
///
/// let mock = MockTransport::new();
/// mock.insert(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("gateway"));
/// assert_eq!(mock.value_of(&oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)), Some(Value::from("gateway")));
/// ```
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create an empty mock transport.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTransportInner {
                mib: BTreeMap::new(),
                scripted: VecDeque::new(),
                requests: Vec::new(),
                traps: Vec::new(),
                trap_ready: false,
                last_error: Diagnostic::default(),
            })),
        }
    }

    /// Insert a leaf into the simulated MIB.
    pub fn insert(&self, oid: Oid, value: Value) {
        let mut inner = self.inner.lock().unwrap();
        inner.mib.insert(oid, value);
    }

    /// Read a leaf back from the simulated MIB.
    pub fn value_of(&self, oid: &Oid) -> Option<Value> {
        let inner = self.inner.lock().unwrap();
        inner.mib.get(oid).cloned()
    }

    /// Mark the trap path initialized; until then fire_and_forget rejects.
    pub fn initialize_traps(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.trap_ready = true;
    }

    /// Queue a timeout for the next exchange.
    pub fn queue_timeout(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.scripted.push_back(ScriptedOutcome::Timeout);
    }

    /// Queue a transport failure for the next exchange.
    pub fn queue_failure(&self, diagnostic: Diagnostic) {
        let mut inner = self.inner.lock().unwrap();
        inner.scripted.push_back(ScriptedOutcome::Fail(diagnostic));
    }

    /// Queue an agent error response for the next exchange.
    pub fn queue_agent_error(&self, status: i32, index: i32) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .scripted
            .push_back(ScriptedOutcome::AgentError { status, index });
    }

    /// All request payloads seen so far.
    pub fn requests(&self) -> Vec<PduPayload> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }

    /// All accepted notification varlists.
    pub fn traps(&self) -> Vec<VarList> {
        let inner = self.inner.lock().unwrap();
        inner.traps.clone()
    }
}

impl MockTransportInner {
    fn successor(&self, oid: &Oid) -> Option<(&Oid, &Value)> {
        self.mib
            .range::<Oid, _>((Bound::Excluded(oid), Bound::Unbounded))
            .next()
    }

    fn agent_error(&mut self, request: &PduPayload, status: i32, index: i32) -> PduPayload {
        self.last_error = Diagnostic::new(
            0,
            status,
            format!("agent returned error status {} at index {}", status, index),
        );
        PduPayload {
            pdu_type: PduType::Response,
            varlist: request.varlist.clone(),
            error_status: status,
            error_index: index,
        }
    }

    fn serve(&mut self, request: &PduPayload) -> (ExchangeStatus, Option<PduPayload>) {
        let mut bindings = VarList::new();

        match request.pdu_type {
            PduType::Get => {
                for (pos, vb) in request.varlist.iter().enumerate() {
                    match self.mib.get(&vb.oid) {
                        Some(value) => bindings.push(VarBind::new(vb.oid.clone(), value.clone())),
                        None => {
                            let response =
                                self.agent_error(request, NO_SUCH_NAME, pos as i32 + 1);
                            return (ExchangeStatus::Success, Some(response));
                        }
                    }
                }
            }
            PduType::GetNext => {
                for (pos, vb) in request.varlist.iter().enumerate() {
                    match self.successor(&vb.oid) {
                        Some((oid, value)) => {
                            bindings.push(VarBind::new(oid.clone(), value.clone()))
                        }
                        None => {
                            let response =
                                self.agent_error(request, NO_SUCH_NAME, pos as i32 + 1);
                            return (ExchangeStatus::Success, Some(response));
                        }
                    }
                }
            }
            PduType::GetBulk => {
                // repurposed header fields: error_status carries the
                // non-repeaters count, error_index the max-repetitions count
                let non_repeaters = request.error_status.max(0) as usize;
                let max_repetitions = request.error_index.max(0) as usize;

                for (pos, vb) in request.varlist.iter().enumerate() {
                    if pos < non_repeaters {
                        if let Some((oid, value)) = self.successor(&vb.oid) {
                            bindings.push(VarBind::new(oid.clone(), value.clone()));
                        }
                    } else {
                        let mut cursor = vb.oid.clone();
                        for _ in 0..max_repetitions {
                            let Some((oid, value)) = self.successor(&cursor) else {
                                break;
                            };
                            bindings.push(VarBind::new(oid.clone(), value.clone()));
                            cursor = oid.clone();
                        }
                    }
                }
            }
            PduType::Set => {
                for vb in request.varlist.iter() {
                    self.mib.insert(vb.oid.clone(), vb.value.clone());
                    bindings.push(vb.clone());
                }
            }
            other => {
                self.last_error =
                    Diagnostic::new(0, 0, format!("unsupported request type {}", other));
                return (ExchangeStatus::Error, None);
            }
        }

        let response = PduPayload {
            pdu_type: PduType::Response,
            varlist: bindings,
            error_status: 0,
            error_index: 0,
        };
        (ExchangeStatus::Success, Some(response))
    }
}

impl Transport for MockTransport {
    fn sync_send_receive(&mut self, request: PduPayload) -> (ExchangeStatus, Option<PduPayload>) {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.clone());

        match inner.scripted.pop_front() {
            Some(ScriptedOutcome::Timeout) => {
                inner.last_error = Diagnostic::new(0, -24, "Timeout");
                (ExchangeStatus::Timeout, None)
            }
            Some(ScriptedOutcome::Fail(diagnostic)) => {
                inner.last_error = diagnostic;
                (ExchangeStatus::Error, None)
            }
            Some(ScriptedOutcome::AgentError { status, index }) => {
                let response = inner.agent_error(&request, status, index);
                (ExchangeStatus::Success, Some(response))
            }
            None => inner.serve(&request),
        }
    }

    fn fire_and_forget(&mut self, varlist: VarList) -> i32 {
        let mut inner = self.inner.lock().unwrap();
        if !inner.trap_ready {
            inner.last_error =
                Diagnostic::new(0, -1, "notification transport is not initialized");
            return -1;
        }
        inner.traps.push(varlist);
        0
    }

    fn last_error(&self) -> Diagnostic {
        let inner = self.inner.lock().unwrap();
        inner.last_error.clone()
    }
}

impl OpenTransport for MockTransport {
    fn open(_config: &SessionConfig) -> std::result::Result<Self, Diagnostic> {
        Ok(Self::new())
    }
}

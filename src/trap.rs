//! SNMPv2 notification (trap) sending.
//!
//! The varbind layout of a v2 notification is fixed by RFC 3416: the first
//! binding is sysUpTime.0 carrying the sender's uptime in centiseconds, the
//! second is snmpTrapOID.0 carrying the notification's OID. Everything here
//! builds or checks that layout before handing the list to the transport's
//! fire-and-forget path.

use crate::error::{Error, Result};
use crate::oid::{Oid, WellKnown};
use crate::pdu::Pdu;
use crate::transport::Transport;
use crate::value::Value;
use crate::varlist::VarList;
use std::time::SystemTime;
use tracing::debug;

/// Minimum bindings a v2 notification must carry (sysUpTime, snmpTrapOID).
const MIN_NOTIFICATION_VARBINDS: usize = 2;

/// Build the two mandatory bindings of a v2 notification.
///
/// Binding 0 is sysUpTime.0 with the uptime in centiseconds, binding 1 is
/// snmpTrapOID.0 with the notification OID. An empty notification OID is
/// rejected.
///
/// # Examples
///
/// ```
/// use sync_snmp::oid;
/// use sync_snmp::trap::create_notification_varlist;
///
/// let varlist = create_notification_varlist(&oid!(1, 3, 6, 1, 4, 1, 42, 0, 1), 500).unwrap();
/// assert_eq!(varlist.len(), 2);
/// assert_eq!(varlist.first_oid().unwrap().to_string(), ".1.3.6.1.2.1.1.3.0");
/// ```
pub fn create_notification_varlist(notification: &Oid, uptime_centiseconds: u32) -> Result<VarList> {
    if notification.is_empty() {
        return Err(Error::invalid_argument(
            "cannot build a notification for an empty OID",
        ));
    }

    let mut varlist = VarList::new();
    varlist.add_var(
        &Oid::from(WellKnown::SysUpTime),
        Value::TimeTicks(uptime_centiseconds),
    )?;
    varlist.add_var(
        &Oid::from(WellKnown::TrapOid),
        Value::ObjectIdentifier(notification.clone()),
    )?;
    Ok(varlist)
}

/// Build and send a v2 notification for a single OID.
pub fn send_notification(
    transport: &mut impl Transport,
    notification: &Oid,
    uptime_centiseconds: u32,
) -> Result<()> {
    let varlist = create_notification_varlist(notification, uptime_centiseconds)?;
    send_notification_varlist(transport, varlist)
}

/// Send a prepared notification varlist.
///
/// The list must carry at least the two mandatory bindings. It is consumed
/// on every path, success or failure.
pub fn send_notification_varlist(transport: &mut impl Transport, varlist: VarList) -> Result<()> {
    if varlist.len() < MIN_NOTIFICATION_VARBINDS {
        return Err(Error::invalid_argument(
            "a notification needs at least the sysUpTime and snmpTrapOID bindings",
        ));
    }

    debug!(
        target: "sync_snmp::trap",
        bindings = varlist.len(),
        "sending notification"
    );

    let rc = transport.fire_and_forget(varlist);
    if rc != 0 {
        return Err(Error::TrapSend { rc });
    }
    Ok(())
}

/// Send the notification carried by a PDU.
///
/// The varlist is stolen out of the PDU, which ends in the
/// [`Released`](crate::pdu::PduState::Released) state on every path,
/// success or failure, so the caller has nothing left to free.
pub fn send_notification_pdu(transport: &mut impl Transport, pdu: &mut Pdu) -> Result<()> {
    if pdu.is_empty() {
        pdu.release();
        return Err(Error::invalid_argument("cannot send an empty notification"));
    }
    let payload = pdu.take_payload();
    // the payload is already detached, so marking the PDU released without
    // a release() is the correct use of the escape hatch
    pdu.clear_without_releasing();
    send_notification_varlist(transport, payload.varlist)
}

/// Centiseconds elapsed since `earlier`, the unit sysUpTime wants.
///
/// A time in the future yields 0 rather than an error.
pub fn centiseconds_since(earlier: SystemTime) -> u32 {
    match SystemTime::now().duration_since(earlier) {
        Ok(elapsed) => (elapsed.as_millis() / 10).min(u32::MAX as u128) as u32,
        Err(_) => 0,
    }
}

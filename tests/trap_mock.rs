//! Notification sending tests against the mock transport.

use sync_snmp::trap::{
    centiseconds_since, create_notification_varlist, send_notification, send_notification_pdu,
    send_notification_varlist,
};
use sync_snmp::transport::MockTransport;
use sync_snmp::{oid, Error, Oid, Pdu, PduState, PduType, Value, VarList, WellKnown};
use std::time::{Duration, SystemTime};

#[test]
fn notification_fails_before_initialization_and_works_after() {
    let mut mock = MockTransport::new();
    let notification = oid!(1, 3, 6, 1, 4, 1, 42, 0, 1);

    // the trap path is not ready yet
    let err = send_notification(&mut mock, &notification, 100).unwrap_err();
    assert!(matches!(err, Error::TrapSend { rc } if rc != 0));
    assert!(mock.traps().is_empty());

    // the identical call succeeds once the transport is initialized
    mock.initialize_traps();
    send_notification(&mut mock, &notification, 100).unwrap();
    assert_eq!(mock.traps().len(), 1);
}

#[test]
fn sent_notification_has_the_mandatory_layout() {
    let mut mock = MockTransport::new();
    mock.initialize_traps();

    let notification = oid!(1, 3, 6, 1, 4, 1, 42, 0, 7);
    send_notification(&mut mock, &notification, 4321).unwrap();

    let traps = mock.traps();
    let varlist = &traps[0];
    assert_eq!(varlist.len(), 2);
    assert_eq!(
        varlist.index(0).unwrap().oid,
        Oid::from(WellKnown::SysUpTime)
    );
    assert_eq!(varlist.index(0).unwrap().value, Value::TimeTicks(4321));
    assert_eq!(varlist.index(1).unwrap().oid, Oid::from(WellKnown::TrapOid));
    assert_eq!(
        varlist.index(1).unwrap().value,
        Value::ObjectIdentifier(notification)
    );
}

#[test]
fn undersized_varlist_is_rejected() {
    let mut mock = MockTransport::new();
    mock.initialize_traps();

    assert!(matches!(
        send_notification_varlist(&mut mock, VarList::new()),
        Err(Error::InvalidArgument(_))
    ));

    let mut one = VarList::new();
    one.add_var(&Oid::from(WellKnown::SysUpTime), Value::TimeTicks(0))
        .unwrap();
    assert!(matches!(
        send_notification_varlist(&mut mock, one),
        Err(Error::InvalidArgument(_))
    ));
    assert!(mock.traps().is_empty());
}

#[test]
fn extra_payload_bindings_ride_along() {
    let mut mock = MockTransport::new();
    mock.initialize_traps();

    let mut varlist =
        create_notification_varlist(&oid!(1, 3, 6, 1, 4, 1, 42, 0, 2), 77).unwrap();
    varlist
        .add_var(&oid!(1, 3, 6, 1, 4, 1, 42, 1, 1), Value::from("disk full"))
        .unwrap();

    send_notification_varlist(&mut mock, varlist).unwrap();
    assert_eq!(mock.traps()[0].len(), 3);
}

#[test]
fn notification_pdu_is_gutted_and_released() {
    let mut mock = MockTransport::new();
    mock.initialize_traps();

    let varlist = create_notification_varlist(&oid!(1, 3, 6, 1, 4, 1, 42, 0, 3), 55).unwrap();
    let mut pdu = Pdu::from_varlist(PduType::TrapV2, varlist);

    send_notification_pdu(&mut mock, &mut pdu).unwrap();
    assert!(pdu.is_empty());
    assert_eq!(pdu.state(), PduState::Released);
    assert_eq!(mock.traps().len(), 1);

    // an empty PDU is rejected but still ends up released
    let mut empty = Pdu::new(PduType::TrapV2);
    assert!(matches!(
        send_notification_pdu(&mut mock, &mut empty),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(empty.state(), PduState::Released);
}

#[test]
fn uptime_helper_produces_centiseconds() {
    let started = SystemTime::now() - Duration::from_millis(1500);
    let ticks = centiseconds_since(started);
    assert!((140..=300).contains(&ticks), "got {} ticks", ticks);

    assert_eq!(
        centiseconds_since(SystemTime::now() + Duration::from_secs(5)),
        0
    );
}

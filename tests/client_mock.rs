//! End-to-end transaction engine tests against the mock transport.

use sync_snmp::transport::MockTransport;
use sync_snmp::{
    oid, Error, ExchangeStatus, Oid, Pdu, PduState, PduType, Session, Value, VarList,
};
use std::collections::BTreeSet;

fn populated_mock() -> MockTransport {
    let mock = MockTransport::new();
    mock.insert(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), Value::from("test agent"));
    mock.insert(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(123456));
    mock.insert(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("gateway"));
    // an interface table: three columns of four rows each
    for column in 1..=3u32 {
        for row in 1..=4u32 {
            mock.insert(
                Oid::new([1, 3, 6, 1, 2, 1, 2, 2, 1, column, row]),
                Value::Integer((column * 10 + row) as i32),
            );
        }
    }
    // a leaf past the table, so a bulk run over the last column has
    // somewhere to continue
    mock.insert(oid!(1, 3, 6, 1, 2, 1, 2, 3, 0), Value::Integer(99));
    mock
}

fn session_over(mock: &MockTransport) -> Session<MockTransport> {
    Session::from_transport(mock.clone(), "udp:127.0.0.1:161")
}

#[test]
fn get_single_oid_returns_matching_binding() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    let target = oid!(1, 3, 6, 1, 2, 1, 1, 5, 0);
    let mut response = session.get(&target).unwrap();

    assert_eq!(response.pdu_type(), PduType::Response);
    assert_eq!(response.state(), PduState::Foreign);
    assert_eq!(response.size(), 1);
    assert!(response.contains(&target));
    assert_eq!(response.varlist().unwrap().get_string(&target).unwrap(), "gateway");

    response.release();
    assert_eq!(response.state(), PduState::Released);
}

#[test]
fn get_many_requests_in_set_order() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    let oids: BTreeSet<Oid> = [
        oid!(1, 3, 6, 1, 2, 1, 1, 5, 0),
        oid!(1, 3, 6, 1, 2, 1, 1, 1, 0),
    ]
    .into_iter()
    .collect();

    let response = session.get_many(&oids).unwrap();
    assert_eq!(response.size(), 2);

    // the BTreeSet iterates in OID order, so the request (and the mock's
    // echo of it) comes back ordered
    let requests = mock.requests();
    assert_eq!(
        requests[0].varlist.first_oid().unwrap(),
        oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
    );

    let empty = BTreeSet::new();
    assert!(matches!(
        session.get_many(&empty),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn walk_with_get_next_is_strictly_increasing() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    let mut previous = oid!(1, 3, 6, 1, 2, 1);
    let mut response = session.get_next(&previous).unwrap();

    for _ in 0..10 {
        assert_eq!(response.size(), 1);
        let reached = response.first_oid().unwrap();
        assert!(reached > previous, "{} should be after {}", reached, previous);
        previous = reached;
        response = session.get_next_pdu(&mut response).unwrap();
    }
}

#[test]
fn get_next_pdu_continues_from_last_binding() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    // a response carrying several bindings continues from its tail, the
    // furthest point the walk has reached
    let mut varlist = VarList::new();
    varlist.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).unwrap();
    varlist.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 2)).unwrap();
    let mut previous = Pdu::from_varlist(PduType::Response, varlist);

    let response = session.get_next_pdu(&mut previous).unwrap();
    assert_eq!(previous.state(), PduState::Released);
    assert_eq!(
        response.first_oid().unwrap(),
        oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 3)
    );

    // the request that went out named exactly the tail OID
    let request = mock.requests().last().unwrap().clone();
    assert_eq!(request.pdu_type, PduType::GetNext);
    assert_eq!(
        request.varlist.first_oid().unwrap(),
        oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 2)
    );
}

#[test]
fn get_bulk_upgrades_pdu_and_repurposes_header_fields() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    // three column heads, five repetitions each; only four rows exist
    let mut pdu = Pdu::new(PduType::Get);
    pdu.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1)).unwrap();
    pdu.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2)).unwrap();
    pdu.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 3)).unwrap();

    let response = session.get_bulk_pdu(&mut pdu, 5, 0).unwrap();

    // every repeater run completes: five repetitions for each of the three
    // OIDs (each column's four rows, then the next leaf in OID order)
    assert_eq!(response.size(), 15);

    let request = mock.requests().last().unwrap().clone();
    assert_eq!(request.pdu_type, PduType::GetBulk);
    assert_eq!(request.error_status, 0, "non-repeaters ride in error_status");
    assert_eq!(request.error_index, 5, "max-repetitions ride in error_index");
    assert_eq!(request.varlist.len(), 3);
}

#[test]
fn get_bulk_single_oid() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    let response = session
        .get_bulk(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1), 4, 0)
        .unwrap();
    assert_eq!(response.size(), 4);

    let oids = response.varlist().unwrap().oids_vec();
    for window in oids.windows(2) {
        assert!(window[0] < window[1]);
    }
}

#[test]
fn set_round_trips_through_the_agent() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    let target = oid!(1, 3, 6, 1, 2, 1, 1, 5, 0);
    let response = session.set_octet_string(&target, &b"renamed"[..]).unwrap();
    assert_eq!(response.size(), 1);
    assert_eq!(mock.value_of(&target), Some(Value::from("renamed")));

    session.set_int(&oid!(1, 3, 6, 1, 4, 1, 42, 1), -5).unwrap();
    assert_eq!(
        mock.value_of(&oid!(1, 3, 6, 1, 4, 1, 42, 1)),
        Some(Value::Integer(-5))
    );

    session.set_bool(&oid!(1, 3, 6, 1, 4, 1, 42, 2), true).unwrap();
    session.set_gauge(&oid!(1, 3, 6, 1, 4, 1, 42, 3), 99).unwrap();
    session
        .set_oid(&oid!(1, 3, 6, 1, 4, 1, 42, 4), &oid!(1, 3, 6))
        .unwrap();
    assert_eq!(
        mock.value_of(&oid!(1, 3, 6, 1, 4, 1, 42, 4)),
        Some(Value::ObjectIdentifier(oid!(1, 3, 6)))
    );
}

#[test]
fn empty_request_is_rejected_before_the_transport() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    let mut request = Pdu::new(PduType::Get);
    assert!(matches!(
        session.sync(&mut request),
        Err(Error::InvalidArgument(_))
    ));
    // never reached the transport, still owned by the caller
    assert_eq!(request.state(), PduState::Fresh);
    assert!(mock.requests().is_empty());
}

#[test]
fn closed_session_releases_the_request() {
    let mock = populated_mock();
    let mut session = session_over(&mock);
    session.close();

    let mut request = Pdu::new(PduType::Get);
    request.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).unwrap();

    assert!(matches!(
        session.sync(&mut request),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(request.state(), PduState::Released);
}

#[test]
fn timeout_surfaces_the_diagnostic_and_consumes_the_request() {
    let mock = populated_mock();
    mock.queue_timeout();
    let mut session = session_over(&mock);

    let mut request = Pdu::new(PduType::Get);
    request.add_null_var(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).unwrap();

    let err = session.sync(&mut request).unwrap_err();
    match err {
        Error::Transport { status, diagnostic } => {
            assert_eq!(status, ExchangeStatus::Timeout);
            assert_eq!(diagnostic.message, "Timeout");
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    // consumed by the transport even though the exchange failed
    assert_eq!(request.state(), PduState::Consumed);
}

#[test]
fn agent_error_status_maps_to_a_transport_error() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    let err = session.get(&oid!(1, 3, 9, 9, 9)).unwrap_err();
    match err {
        Error::Transport { status, diagnostic } => {
            // the exchange itself completed; the agent said noSuchName
            assert_eq!(status, ExchangeStatus::Success);
            assert_eq!(diagnostic.snmp_errno, 2);
            assert!(diagnostic.message.contains("error status 2"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[test]
fn scripted_agent_error_after_success() {
    let mock = populated_mock();
    let mut session = session_over(&mock);

    session.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).unwrap();

    mock.queue_agent_error(5, 1); // genErr
    let err = session.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));

    // the session keeps working after a failed exchange
    session.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).unwrap();
}

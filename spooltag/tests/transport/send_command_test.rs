use std::time::{Duration, Instant};

use crate::common::fixtures::firmware_exchange;
use spooltag::TransportError;
use spooltag::constants::PN532_ACK;
use spooltag::test_support::{device_frame, open_mock_transport};

#[test]
fn firmware_query_end_to_end() {
    let (transport, mock) = open_mock_transport(vec![firmware_exchange()]);

    let payload = transport
        .send_command(0x02, &[], Duration::from_secs(1))
        .unwrap();
    assert_eq!(payload, vec![0x03, 0x32, 0x01, 0x06, 0x07]);

    // wake byte, then exactly one framed command on the wire
    let written = mock.written();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0], vec![0x55]);
    assert_eq!(written[1][..3], [0x00, 0x00, 0xFF]);
}

#[test]
fn response_with_unexpected_opcode_is_skipped_until_match() {
    // a stale InDataExchange answer precedes the firmware response
    let mut bytes = PN532_ACK.to_vec();
    bytes.extend_from_slice(&device_frame(&[0x41, 0x00, 0x99]));
    bytes.extend_from_slice(&device_frame(&[0x03, 0x32, 0x01, 0x06, 0x07]));
    let (transport, _mock) = open_mock_transport(vec![bytes]);

    let payload = transport
        .send_command(0x02, &[], Duration::from_secs(1))
        .unwrap();
    assert_eq!(payload[0], 0x03);
}

#[test]
fn missing_ack_times_out_within_epsilon() {
    // device frame but no ACK ever arrives
    let (transport, _mock) =
        open_mock_transport(vec![device_frame(&[0x03, 0x32, 0x01, 0x06, 0x07])]);

    let timeout = Duration::from_millis(250);
    let started = Instant::now();
    let result = transport.send_command(0x02, &[], timeout);
    let elapsed = started.elapsed();

    assert_eq!(result, Err(TransportError::Timeout));
    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + Duration::from_millis(250));
}

#[test]
fn stale_bytes_are_drained_before_each_command() {
    let (transport, mock) = open_mock_transport(vec![]);
    // a late response from some previous exchange is already buffered
    mock.feed(&firmware_exchange());
    std::thread::sleep(Duration::from_millis(50)); // let the reader pick it up

    // this command gets no answer at all: the stale ACK/response must
    // not satisfy it
    let result = transport.send_command(0x14, &[0x01], Duration::from_millis(200));
    assert_eq!(result, Err(TransportError::Timeout));
}

#[test]
fn oversized_command_is_rejected_up_front() {
    let (transport, _mock) = open_mock_transport(vec![]);
    let params = vec![0u8; 300];
    match transport.send_command(0x40, &params, Duration::from_secs(1)) {
        Err(TransportError::FrameTooLong { actual: 301, .. }) => {}
        other => panic!("expected FrameTooLong, got {:?}", other),
    }
}

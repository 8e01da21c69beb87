use std::time::Duration;

use crate::common::fixtures::{
    block_read_responses, block_write_responses, encoded_sample, sample_record,
};
use spooltag::TransportError;
use spooltag::codec;
use spooltag::test_support::{apdu_ok, open_mock_transport};

const BLOCK_TIMEOUT: Duration = Duration::from_secs(1);

#[test]
fn read_record_assembles_all_blocks() {
    let encoded = encoded_sample();
    let (transport, mock) = open_mock_transport(block_read_responses(&encoded));

    let raw = transport.read_record(BLOCK_TIMEOUT).unwrap();
    assert_eq!(raw, encoded);
    assert_eq!(codec::decode(&raw).unwrap(), sample_record());

    // wake byte + 32 read APDUs, each addressing consecutive blocks
    let written = mock.written();
    assert_eq!(written.len(), 33);
    assert_eq!(written[1], vec![0xFF, 0xB0, 0x00, 0x04, 0x04]);
    assert_eq!(written[32], vec![0xFF, 0xB0, 0x00, 0x23, 0x04]);
}

#[test]
fn read_record_propagates_block_failure() {
    let encoded = encoded_sample();
    let mut responses = block_read_responses(&encoded);
    responses[5] = vec![0x00, 0x00, 0x00, 0x00, 0x69, 0x81]; // sixth block read fails
    let (transport, _mock) = open_mock_transport(responses);

    match transport.read_record(BLOCK_TIMEOUT) {
        Err(TransportError::CommandFailed { status: 0x6981 }) => {}
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[test]
fn write_record_verifies_readback() {
    let encoded = encoded_sample();
    let mut responses = block_write_responses(32);
    responses.extend(block_read_responses(&encoded));
    let (transport, mock) = open_mock_transport(responses);

    transport.write_record(&encoded, BLOCK_TIMEOUT).unwrap();

    // wake + 32 writes + 32 verification reads
    let written = mock.written();
    assert_eq!(written.len(), 65);
    // first write APDU targets block 4 with the magic bytes
    assert_eq!(
        written[1],
        vec![0xFF, 0xD6, 0x00, 0x04, 0x04, 0x7B, 0x00, 0x65, 0x00]
    );
}

#[test]
fn write_record_mismatched_readback_fails_verification() {
    let encoded = encoded_sample();
    let mut tampered = encoded.clone();
    tampered[65] ^= 0x55; // color byte differs on the tag

    let mut responses = block_write_responses(32);
    responses.extend(block_read_responses(&tampered));
    let (transport, _mock) = open_mock_transport(responses);

    match transport.write_record(&encoded, BLOCK_TIMEOUT) {
        Err(TransportError::WriteVerificationFailed { offset: 65 }) => {}
        other => panic!("expected WriteVerificationFailed, got {:?}", other),
    }
}

#[test]
fn write_record_pads_short_input_to_record_size() {
    // a 100-byte payload still writes all 32 blocks, zero-padded
    let short = vec![0x11u8; 100];
    let mut padded = short.clone();
    padded.resize(codec::RECORD_LEN, 0);

    let mut responses = block_write_responses(32);
    responses.extend(block_read_responses(&padded));
    let (transport, _mock) = open_mock_transport(responses);

    transport.write_record(&short, BLOCK_TIMEOUT).unwrap();
}

#[test]
fn write_block_checks_status_trailer() {
    let (transport, _mock) = open_mock_transport(vec![apdu_ok(&[])]);
    transport
        .write_block(4, &[0x7B, 0x00, 0x65, 0x00], BLOCK_TIMEOUT)
        .unwrap();

    let (transport, _mock) = open_mock_transport(vec![vec![0x6A, 0x82]]);
    match transport.write_block(4, &[0u8; 4], BLOCK_TIMEOUT) {
        Err(TransportError::CommandFailed { status: 0x6A82 }) => {}
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

use spooltag::constants::PN532_ACK;
use spooltag::protocol::{Frame, Scan};
use spooltag::test_support::device_frame;

const FIRMWARE_PAYLOAD: [u8; 5] = [0x03, 0x32, 0x01, 0x06, 0x07];

#[test]
fn firmware_version_frame_scans_to_payload() {
    // 00 00 FF 06 FA D5 03 32 01 06 07 E8 00
    let frame = device_frame(&FIRMWARE_PAYLOAD);
    match Frame::scan_response(&frame) {
        Scan::Response { end, payload } => {
            assert_eq!(end, frame.len());
            assert_eq!(payload, FIRMWARE_PAYLOAD.to_vec());
            // IC=0x32, Ver=1, Rev=6
            assert_eq!(payload[1], 0x32);
            assert_eq!(payload[2], 0x01);
            assert_eq!(payload[3], 0x06);
        }
        other => panic!("expected Response, got {:?}", other),
    }
}

#[test]
fn ack_found_behind_noise_of_every_length_up_to_50() {
    for noise_len in 1..=50usize {
        let mut buf: Vec<u8> = (0..noise_len).map(|i| (i as u8).wrapping_mul(37)).collect();
        // avoid accidentally embedding an ACK in the generated noise
        assert!(Frame::find_ack(&buf).is_none());
        buf.extend_from_slice(&PN532_ACK);
        assert_eq!(
            Frame::find_ack(&buf),
            Some(noise_len + PN532_ACK.len()),
            "noise_len {}",
            noise_len
        );
    }
}

#[test]
fn ack_then_garbage_then_response_still_scans() {
    let mut buf = PN532_ACK.to_vec();
    let ack_end = Frame::find_ack(&buf).unwrap();
    buf.extend_from_slice(&[0xBA, 0xDF, 0x00]); // three garbage bytes
    buf.extend_from_slice(&device_frame(&FIRMWARE_PAYLOAD));

    match Frame::scan_response(&buf[ack_end..]) {
        Scan::Response { payload, .. } => assert_eq!(payload, FIRMWARE_PAYLOAD.to_vec()),
        other => panic!("expected Response, got {:?}", other),
    }
}

#[test]
fn corrupted_length_checksum_is_never_accepted() {
    let frame = device_frame(&FIRMWARE_PAYLOAD);
    for delta in 1..=255u8 {
        let mut bad = frame.clone();
        bad[4] = bad[4].wrapping_add(delta);
        assert!(
            matches!(Frame::scan_response(&bad), Scan::Incomplete { .. }),
            "lcs delta {}",
            delta
        );
    }
    // unmodified frame still parses
    assert!(matches!(
        Frame::scan_response(&frame),
        Scan::Response { .. }
    ));
}

#[test]
fn corrupted_data_checksum_keeps_scanning_instead_of_misdecoding() {
    let mut corrupt = device_frame(&FIRMWARE_PAYLOAD);
    let dcs_index = corrupt.len() - 2;
    corrupt[dcs_index] = corrupt[dcs_index].wrapping_add(1);

    // alone: nothing valid found
    assert!(matches!(
        Frame::scan_response(&corrupt),
        Scan::Incomplete { .. }
    ));

    // followed by an intact copy: the intact one is returned, never the
    // corrupt payload
    let mut buf = corrupt;
    buf.extend_from_slice(&device_frame(&[0x15]));
    match Frame::scan_response(&buf) {
        Scan::Response { payload, .. } => assert_eq!(payload, vec![0x15]),
        other => panic!("expected Response, got {:?}", other),
    }
}

#[test]
fn partial_frame_reports_incomplete_and_keeps_candidate() {
    let frame = device_frame(&FIRMWARE_PAYLOAD);
    for cut in 1..frame.len() - 1 {
        match Frame::scan_response(&frame[..cut]) {
            Scan::Incomplete { keep_from } => {
                assert_eq!(keep_from, 0, "cut {}", cut)
            }
            other => panic!("cut {}: expected Incomplete, got {:?}", cut, other),
        }
    }
}

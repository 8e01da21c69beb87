//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize PN532 frame construction and MockDuplex
//! setup so tests across the crate and tests/ directory can reuse the
//! same logic.
#![allow(dead_code)]

use crate::constants::{PN532_ACK, PN532_POSTAMBLE, PN532_PREAMBLE, TFI_PN532_TO_HOST};
use crate::protocol::checksum::{dcs, lcs};
use crate::transport::{MockDuplex, Pn532Transport};

/// Build a complete device->host wire frame around `payload` (the bytes
/// after TFI).
#[doc(hidden)]
pub fn device_frame(payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() + 1) as u8;
    let mut out = Vec::with_capacity(payload.len() + 8);
    out.extend_from_slice(&PN532_PREAMBLE);
    out.push(len);
    out.push(lcs(len));
    out.push(TFI_PN532_TO_HOST);
    out.extend_from_slice(payload);
    out.push(dcs(TFI_PN532_TO_HOST, payload));
    out.push(PN532_POSTAMBLE);
    out
}

/// A full command exchange as seen on the wire: ACK, then the framed
/// response payload.
#[doc(hidden)]
pub fn exchange(payload: &[u8]) -> Vec<u8> {
    let mut out = PN532_ACK.to_vec();
    out.extend_from_slice(&device_frame(payload));
    out
}

/// A block-command response: data followed by the `90 00` trailer.
#[doc(hidden)]
pub fn apdu_ok(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    out.extend_from_slice(&[0x90, 0x00]);
    out
}

/// Open a transport over a MockDuplex pre-seeded with the given
/// per-write responses, returning the test's handle onto the mock.
#[doc(hidden)]
pub fn open_mock_transport(responses: Vec<Vec<u8>>) -> (Pn532Transport, MockDuplex) {
    let mock = MockDuplex::new();
    for resp in responses {
        mock.push_response(resp);
    }
    let transport = Pn532Transport::open(Box::new(mock.clone())).expect("mock open");
    (transport, mock)
}

// spooltag-rs/spooltag/src/protocol/frame.rs

use crate::TransportError;
use crate::constants::{
    PN532_ACK, PN532_MAX_COMMAND_LEN, PN532_MIN_FRAME_LEN, PN532_POSTAMBLE, PN532_PREAMBLE,
    TFI_HOST_TO_PN532, TFI_PN532_TO_HOST,
};
use crate::protocol::checksum::{dcs, lcs};

/// PN532 wire frame helpers.
///
/// Format: [Preamble(3)] [LEN(1)] [LCS(1)] [TFI(1)] [Data(LEN-1)] [DCS(1)] [Postamble(1)]
/// Preamble: 0x00 0x00 0xFF, Postamble: 0x00
pub struct Frame;

/// Result of scanning a rolling receive buffer for a device->host frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A structurally valid D5 frame was found. `end` is the index one
    /// past its last byte; `payload` is everything after the TFI,
    /// excluding the checksum and postamble.
    Response { end: usize, payload: Vec<u8> },
    /// No complete frame yet. Bytes before `keep_from` can never start
    /// a frame and may be discarded.
    Incomplete { keep_from: usize },
}

impl Frame {
    /// Build a host->PN532 command frame wrapping `[opcode] + params`.
    pub fn host(opcode: u8, params: &[u8]) -> Result<Vec<u8>, TransportError> {
        if params.len() + 1 > PN532_MAX_COMMAND_LEN {
            return Err(TransportError::FrameTooLong {
                max: PN532_MAX_COMMAND_LEN,
                actual: params.len() + 1,
            });
        }

        // LEN counts TFI + opcode + params
        let len = (params.len() + 2) as u8;
        let mut out = Vec::with_capacity(params.len() + 9);
        out.extend_from_slice(&PN532_PREAMBLE);
        out.push(len);
        out.push(lcs(len));
        out.push(TFI_HOST_TO_PN532);
        out.push(opcode);
        out.extend_from_slice(params);
        let mut body = Vec::with_capacity(params.len() + 1);
        body.push(opcode);
        body.extend_from_slice(params);
        out.push(dcs(TFI_HOST_TO_PN532, &body));
        out.push(PN532_POSTAMBLE);
        Ok(out)
    }

    /// Find the 6-byte ACK frame anywhere in `buf`; the ACK need not be
    /// aligned with the buffer start. Returns the index one past it.
    pub fn find_ack(buf: &[u8]) -> Option<usize> {
        buf.windows(PN532_ACK.len())
            .position(|w| w == PN532_ACK)
            .map(|pos| pos + PN532_ACK.len())
    }

    /// Scan `buf` for the earliest structurally valid device->host
    /// frame, re-validating both checksums at every `00 00 FF`
    /// candidate. Corrupt candidates are skipped, not fatal: stray
    /// bytes routinely precede a valid frame on the wire.
    pub fn scan_response(buf: &[u8]) -> Scan {
        let mut i = 0usize;
        while i + 3 <= buf.len() {
            if buf[i..i + 3] != PN532_PREAMBLE {
                i += 1;
                continue;
            }
            if i + 5 > buf.len() {
                // candidate preamble, LEN/LCS not arrived yet
                return Scan::Incomplete { keep_from: i };
            }
            let len = buf[i + 3];
            if len.wrapping_add(buf[i + 4]) != 0 || len == 0 {
                // bad length checksum (the ACK's 00/FF pair lands here too)
                i += 1;
                continue;
            }
            let total = len as usize + PN532_MIN_FRAME_LEN;
            if i + total > buf.len() {
                return Scan::Incomplete { keep_from: i };
            }
            let tfi = buf[i + 5];
            let data = &buf[i + 6..i + 5 + len as usize];
            if dcs(tfi, data) != buf[i + 5 + len as usize] {
                i += 1;
                continue;
            }
            if tfi != TFI_PN532_TO_HOST {
                // checksum-valid but host-direction (e.g. a local echo); skip it whole
                i += total;
                continue;
            }
            return Scan::Response {
                end: i + total,
                payload: data.to_vec(),
            };
        }
        Scan::Incomplete { keep_from: i }
    }
}

// spooltag-rs/spooltag/src/transport/block.rs

//! Block-oriented command shape for smart-card style duplexes.
//!
//! PC/SC readers expose the tag as addressable 4-byte blocks behind
//! pseudo-APDUs (`FF B0` read / `FF D6` update) with a two-byte `90 00`
//! success trailer, reusing the same duplex and rolling buffer as the
//! framed PN532 path.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::TransportError;
use crate::codec::RECORD_LEN;
use crate::constants::{
    APDU_CLA, APDU_INS_READ_BINARY, APDU_INS_UPDATE_BINARY, APDU_STATUS_OK, BLOCK_SIZE,
    DATA_BASE_BLOCK,
};
use crate::transport::pn532::Pn532Transport;
use crate::utils::timeout::{WRITE_SETTLE_MS, ms};

type Result<T> = std::result::Result<T, TransportError>;

impl Pn532Transport {
    /// Read `len` bytes from a tag block. Any status trailer other than
    /// `90 00` is a failed command.
    pub fn read_block(&self, block: u8, len: u8, timeout: Duration) -> Result<Vec<u8>> {
        let _guard = self.acquire()?;
        let deadline = Instant::now() + timeout;
        self.drain_rx()?;

        self.write_all(&[APDU_CLA, APDU_INS_READ_BINARY, 0x00, block, len])?;

        let n = len as usize;
        let resp = self.wait_exact(n + 2, deadline)?;
        let status = u16::from_be_bytes([resp[n], resp[n + 1]]);
        if status != APDU_STATUS_OK {
            return Err(TransportError::CommandFailed { status });
        }
        Ok(resp[..n].to_vec())
    }

    /// Write `data` to a tag block; success is the `90 00` trailer.
    pub fn write_block(&self, block: u8, data: &[u8], timeout: Duration) -> Result<()> {
        if data.len() > u8::MAX as usize {
            return Err(TransportError::FrameTooLong {
                max: u8::MAX as usize,
                actual: data.len(),
            });
        }

        let _guard = self.acquire()?;
        let deadline = Instant::now() + timeout;
        self.drain_rx()?;

        let mut apdu = vec![
            APDU_CLA,
            APDU_INS_UPDATE_BINARY,
            0x00,
            block,
            data.len() as u8,
        ];
        apdu.extend_from_slice(data);
        self.write_all(&apdu)?;

        let resp = self.wait_exact(2, deadline)?;
        let status = u16::from_be_bytes([resp[0], resp[1]]);
        if status != APDU_STATUS_OK {
            return Err(TransportError::CommandFailed { status });
        }
        Ok(())
    }

    /// Read the full logical record, one native block at a time,
    /// starting at the first data block.
    pub fn read_record(&self, block_timeout: Duration) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(RECORD_LEN);
        for i in 0..(RECORD_LEN / BLOCK_SIZE) {
            let block = DATA_BASE_BLOCK + i as u8;
            data.extend(self.read_block(block, BLOCK_SIZE as u8, block_timeout)?);
        }
        debug!("read {} record bytes", data.len());
        Ok(data)
    }

    /// Write a full logical record chunked into native blocks, then
    /// read it back and verify. A mismatch is a failed write; the
    /// caller should re-place the tag and retry the whole record, not
    /// resend part of it.
    pub fn write_record(&self, data: &[u8], block_timeout: Duration) -> Result<()> {
        let mut padded = data.to_vec();
        padded.resize(RECORD_LEN, 0);

        for (i, chunk) in padded.chunks(BLOCK_SIZE).enumerate() {
            self.write_block(DATA_BASE_BLOCK + i as u8, chunk, block_timeout)?;
        }

        // let the tag EEPROM settle before verifying
        thread::sleep(ms(WRITE_SETTLE_MS));

        let readback = self.read_record(block_timeout)?;
        if let Some(offset) = padded.iter().zip(readback.iter()).position(|(a, b)| a != b) {
            warn!("write verification failed at offset {}", offset);
            return Err(TransportError::WriteVerificationFailed { offset });
        }
        debug!("wrote and verified {} record bytes", padded.len());
        Ok(())
    }
}

// spooltag-rs/spooltag/src/tag/write.rs

use std::thread;

use crate::record::FilamentRecord;
use crate::transport::Pn532Transport;
use crate::utils::timeout::{WRITE_SETTLE_MS, ms, tag_access_timeout};
use crate::{Result, TransportError, codec};

use crate::constants::{BLOCK_SIZE, DATA_BASE_BLOCK};
use crate::protocol::commands::Command;
use crate::protocol::responses::{self, PassiveTarget};

/// Encode and write the filament record through the block command
/// shape. The transport chunks, settles and verifies the write.
pub fn write_tag(transport: &Pn532Transport, record: &FilamentRecord) -> Result<()> {
    let buf = codec::encode(record)?;
    transport.write_record(&buf, tag_access_timeout())?;
    Ok(())
}

/// Encode and write the filament record through the raw-serial PN532
/// path: one MIFARE Ultralight WRITE per four-byte page, then a full
/// read-back verification. On mismatch the caller should re-place the
/// tag and retry the whole write.
pub fn write_tag_pages(
    transport: &Pn532Transport,
    target: &PassiveTarget,
    record: &FilamentRecord,
) -> Result<()> {
    let buf = codec::encode(record)?;

    for (i, chunk) in buf.chunks(BLOCK_SIZE).enumerate() {
        let mut data = [0u8; BLOCK_SIZE];
        data.copy_from_slice(chunk);
        let payload = transport.execute(
            &Command::WritePage {
                target: target.number,
                page: DATA_BASE_BLOCK + i as u8,
                data,
            },
            tag_access_timeout(),
        )?;
        responses::decode_data_exchange(&payload)?;
    }

    // let the tag EEPROM settle before verifying
    thread::sleep(ms(WRITE_SETTLE_MS));

    let readback = super::read::read_record_pages(transport, target)?;
    if let Some(offset) = buf.iter().zip(readback.iter()).position(|(a, b)| a != b) {
        return Err(TransportError::WriteVerificationFailed { offset }.into());
    }
    Ok(())
}

// spooltag-rs/spooltag/src/tag/read.rs

use crate::record::FilamentRecord;
use crate::transport::Pn532Transport;
use crate::utils::timeout::tag_access_timeout;
use crate::{Result, TransportError, codec};

use crate::constants::DATA_BASE_BLOCK;
use crate::protocol::commands::Command;
use crate::protocol::responses::{self, PassiveTarget};

/// Read and decode the filament record through the block command shape
/// (smart-card style readers).
pub fn read_tag(transport: &Pn532Transport) -> Result<FilamentRecord> {
    let raw = transport.read_record(tag_access_timeout())?;
    Ok(codec::decode(&raw)?)
}

/// Read and decode the filament record through the raw-serial PN532
/// path, tunnelling MIFARE Ultralight READs to `target`.
pub fn read_tag_pages(transport: &Pn532Transport, target: &PassiveTarget) -> Result<FilamentRecord> {
    let raw = read_record_pages(transport, target)?;
    Ok(codec::decode(&raw)?)
}

/// Fetch the raw record region page-wise: each MIFARE READ returns 16
/// bytes (four pages), so the 128-byte record takes eight exchanges.
pub fn read_record_pages(transport: &Pn532Transport, target: &PassiveTarget) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(codec::RECORD_LEN);
    let mut page = DATA_BASE_BLOCK;
    while data.len() < codec::RECORD_LEN {
        let payload = transport.execute(
            &Command::ReadPage {
                target: target.number,
                page,
            },
            tag_access_timeout(),
        )?;
        let chunk = responses::decode_data_exchange(&payload)?;
        if chunk.len() < 16 {
            return Err(TransportError::ShortResponse {
                expected: 16,
                actual: chunk.len(),
            }
            .into());
        }
        data.extend_from_slice(&chunk[..16]);
        page += 4;
    }
    data.truncate(codec::RECORD_LEN);
    Ok(data)
}

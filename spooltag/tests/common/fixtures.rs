// fixtures.rs — commonly used records, targets and wire exchanges

#![allow(dead_code)]

use spooltag::protocol::responses::PassiveTarget;
use spooltag::record::FilamentRecord;
use spooltag::test_support::{apdu_ok, exchange};
use spooltag::types::{Color, Diameter};

pub fn sample_record() -> FilamentRecord {
    FilamentRecord {
        sku: "SKU1".into(),
        brand: "Acme".into(),
        material: "PLA".into(),
        color: Color::from_rgb(255, 0, 0),
        print_temp_min: 190,
        print_temp_max: 210,
        bed_temp_min: 50,
        bed_temp_max: 60,
        diameter: Diameter::from_hundredths(175),
        weight_grams: 1000,
    }
}

pub fn sample_target() -> PassiveTarget {
    PassiveTarget {
        number: 1,
        sens_res: 0x0044,
        sel_res: 0x00,
        uid: vec![0xAA, 0xBB, 0xCC, 0xDD],
    }
}

pub fn encoded_sample() -> Vec<u8> {
    spooltag::codec::encode(&sample_record()).unwrap().to_vec()
}

/// Per-write responses for a block-shape record read: one `data + 90 00`
/// answer per 4-byte block.
pub fn block_read_responses(record_bytes: &[u8]) -> Vec<Vec<u8>> {
    record_bytes.chunks(4).map(apdu_ok).collect()
}

/// Per-write responses for a block-shape record write: one bare `90 00`
/// trailer per block written.
pub fn block_write_responses(blocks: usize) -> Vec<Vec<u8>> {
    (0..blocks).map(|_| apdu_ok(&[])).collect()
}

/// Per-write responses for a page-shape record read: one framed
/// InDataExchange answer per 16-byte chunk.
pub fn page_read_responses(record_bytes: &[u8]) -> Vec<Vec<u8>> {
    record_bytes
        .chunks(16)
        .map(|chunk| {
            let mut payload = vec![0x41, 0x00];
            payload.extend_from_slice(chunk);
            exchange(&payload)
        })
        .collect()
}

/// The ACK + GetFirmwareVersion answer for a PN532 at firmware 1.6.
pub fn firmware_exchange() -> Vec<u8> {
    exchange(&[0x03, 0x32, 0x01, 0x06, 0x07])
}

// spooltag-rs/spooltag/src/codec/mod.rs

//! TagCodec: pure bidirectional mapping between [`FilamentRecord`] and
//! the fixed-layout tag byte buffer.
//!
//! The canonical layout is the 128-byte region at tag pages 4-35,
//! version-marked by a 4-byte magic and little-endian throughout. All
//! offsets below are relative to the start of that region; the
//! transports apply the page/block base.

use crate::CodecError;
use crate::record::FilamentRecord;
use crate::types::{Color, Diameter};

/// Fixed encoded record size (32 four-byte tag pages).
pub const RECORD_LEN: usize = 128;

/// Minimum buffer length decode accepts: the end of the last required
/// field. Longer buffers are fine, trailing bytes are ignored.
pub const MIN_RECORD_LEN: usize = OFF_WEIGHT + 2;

/// Layout magic/version marker at the start of the record.
pub const TAG_MAGIC: [u8; 4] = [0x7B, 0x00, 0x65, 0x00];

/// Fixed width of the sku/brand/material string fields.
pub const STRING_FIELD_LEN: usize = 20;

const OFF_SKU: usize = 4;
const OFF_BRAND: usize = 24;
const OFF_MATERIAL: usize = 44;
const OFF_COLOR_MARKER: usize = 64;
const OFF_COLOR: usize = 65;
const OFF_PRINT_MIN: usize = 80;
const OFF_PRINT_MAX: usize = 82;
const OFF_BED_MIN: usize = 100;
const OFF_BED_MAX: usize = 102;
const OFF_DIAMETER: usize = 104;
const OFF_WEIGHT: usize = 106;

const COLOR_MARKER: u8 = 0xFF;

/// Encode a record into the fixed 128-byte tag layout.
///
/// String fields are UTF-8, truncated to their fixed width (never an
/// error) and NUL-padded; unused bytes stay zero. Fails with
/// [`CodecError::FieldOverflow`] when the weight does not fit its
/// 16-bit field.
pub fn encode(record: &FilamentRecord) -> Result<[u8; RECORD_LEN], CodecError> {
    let weight = u16::try_from(record.weight_grams).map_err(|_| CodecError::FieldOverflow {
        field: "weight_grams",
        value: record.weight_grams,
        max: u32::from(u16::MAX),
    })?;

    let mut buf = [0u8; RECORD_LEN];
    buf[..4].copy_from_slice(&TAG_MAGIC);

    put_str(&mut buf, OFF_SKU, &record.sku);
    put_str(&mut buf, OFF_BRAND, &record.brand);
    put_str(&mut buf, OFF_MATERIAL, &record.material);

    buf[OFF_COLOR_MARKER] = COLOR_MARKER;
    buf[OFF_COLOR..OFF_COLOR + 3].copy_from_slice(&record.color.as_bytes());

    put_u16_le(&mut buf, OFF_PRINT_MIN, record.print_temp_min);
    put_u16_le(&mut buf, OFF_PRINT_MAX, record.print_temp_max);
    put_u16_le(&mut buf, OFF_BED_MIN, record.bed_temp_min);
    put_u16_le(&mut buf, OFF_BED_MAX, record.bed_temp_max);
    put_u16_le(&mut buf, OFF_DIAMETER, record.diameter.as_hundredths());
    put_u16_le(&mut buf, OFF_WEIGHT, weight);

    Ok(buf)
}

/// Decode a tag buffer back into a [`FilamentRecord`].
///
/// Accepts any buffer of at least [`MIN_RECORD_LEN`] bytes; tags may
/// return a larger block than the logical record. String fields come
/// back NUL- and whitespace-trimmed.
pub fn decode(bytes: &[u8]) -> Result<FilamentRecord, CodecError> {
    if bytes.len() < MIN_RECORD_LEN {
        return Err(CodecError::TruncatedRecord {
            expected: MIN_RECORD_LEN,
            actual: bytes.len(),
        });
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&bytes[..4]);
    if magic != TAG_MAGIC {
        return Err(CodecError::UnknownLayout { magic });
    }

    Ok(FilamentRecord {
        sku: field_str(bytes, OFF_SKU),
        brand: field_str(bytes, OFF_BRAND),
        material: field_str(bytes, OFF_MATERIAL),
        color: Color::from_rgb(
            bytes[OFF_COLOR],
            bytes[OFF_COLOR + 1],
            bytes[OFF_COLOR + 2],
        ),
        print_temp_min: read_u16_le(bytes, OFF_PRINT_MIN),
        print_temp_max: read_u16_le(bytes, OFF_PRINT_MAX),
        bed_temp_min: read_u16_le(bytes, OFF_BED_MIN),
        bed_temp_max: read_u16_le(bytes, OFF_BED_MAX),
        diameter: Diameter::from_hundredths(read_u16_le(bytes, OFF_DIAMETER)),
        weight_grams: u32::from(read_u16_le(bytes, OFF_WEIGHT)),
    })
}

/// Truncate to the longest prefix of whole characters that fits `max`
/// bytes, so a clipped field still decodes as valid UTF-8.
fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn put_str(buf: &mut [u8], offset: usize, s: &str) {
    let clipped = truncate_utf8(s, STRING_FIELD_LEN);
    buf[offset..offset + clipped.len()].copy_from_slice(clipped.as_bytes());
}

fn field_str(buf: &[u8], offset: usize) -> String {
    let field = &buf[offset..offset + STRING_FIELD_LEN];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).trim().to_string()
}

fn put_u16_le(buf: &mut [u8], offset: usize, v: u16) {
    buf[offset..offset + 2].copy_from_slice(&v.to_le_bytes());
}

fn read_u16_le(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

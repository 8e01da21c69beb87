// spooltag-rs/spooltag/src/constants.rs
//! Common protocol constants used across the crate

/// PN532 wire frame preamble/start code: 0x00 0x00 0xFF
pub const PN532_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// PN532 wire frame postamble: 0x00
pub const PN532_POSTAMBLE: u8 = 0x00;

/// Fixed 6-byte acknowledgement frame the PN532 sends after a valid
/// command frame, before the actual response.
pub const PN532_ACK: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// TFI byte for host->PN532 frames
pub const TFI_HOST_TO_PN532: u8 = 0xD4;
/// TFI byte for PN532->host frames
pub const TFI_PN532_TO_HOST: u8 = 0xD5;

/// Wake-up byte written once after opening the serial port
pub const PN532_WAKEUP: u8 = 0x55;

/// Minimal PN532 wire frame length in bytes (preamble + len + lcs + tfi + dcs + postamble)
pub const PN532_MIN_FRAME_LEN: usize = 7;

/// Maximum opcode+params length a single frame can carry (LEN is a u8
/// counting TFI as well)
pub const PN532_MAX_COMMAND_LEN: usize = 254;

/// Serial line rate for PN532 UART bridges
pub const BAUD_RATE: u32 = 115_200;

/// PC/SC pseudo-APDU class byte
pub const APDU_CLA: u8 = 0xFF;
/// READ BINARY instruction
pub const APDU_INS_READ_BINARY: u8 = 0xB0;
/// UPDATE BINARY instruction
pub const APDU_INS_UPDATE_BINARY: u8 = 0xD6;
/// Success status trailer (SW1 SW2 = 90 00)
pub const APDU_STATUS_OK: u16 = 0x9000;

/// First tag block/page holding user data (blocks 0-3 are UID/lock/OTP)
pub const DATA_BASE_BLOCK: u8 = 4;
/// Native block size of the tag memory
pub const BLOCK_SIZE: usize = 4;

// spooltag-rs/spooltag/src/constants.rs

// spooltag-rs/spooltag/src/tag/mod.rs

//! Application-facing tag operations: reader setup, target detection
//! and whole-record read/write over an open [`Pn532Transport`].
//!
//! Codec and transport failures are folded into the combined
//! [`crate::Error`] here so the UI layer handles one error surface.

pub mod read;
pub mod write;

pub use read::{read_tag, read_tag_pages};
pub use write::{write_tag, write_tag_pages};

use std::time::Duration;

use crate::Result;
use crate::protocol::commands::{BRTY_106K_TYPE_A, Command};
use crate::protocol::responses::{self, PassiveTarget};
use crate::transport::Pn532Transport;
use crate::types::FirmwareVersion;
use crate::utils::timeout::default_command_timeout;

/// Query the transceiver's firmware version. Cheap liveness check for a
/// freshly opened port.
pub fn probe(transport: &Pn532Transport) -> Result<FirmwareVersion> {
    let payload = transport.execute(&Command::GetFirmwareVersion, default_command_timeout())?;
    Ok(responses::decode_firmware_version(&payload)?)
}

/// Put the SAM in normal mode. Required once after power-up before
/// target detection on most PN532 boards.
pub fn configure(transport: &Pn532Transport) -> Result<()> {
    let payload = transport.execute(&Command::sam_normal(), default_command_timeout())?;
    responses::decode_sam_configuration(&payload)?;
    Ok(())
}

/// Search the field for a single 106 kbps type A tag. `Ok(None)` means
/// no tag present, which is a normal condition; `timeout` should cover
/// the physical dwell time.
pub fn detect(transport: &Pn532Transport, timeout: Duration) -> Result<Option<PassiveTarget>> {
    let payload = transport.execute(
        &Command::InListPassiveTarget {
            max_targets: 1,
            baud: BRTY_106K_TYPE_A,
        },
        timeout,
    )?;
    Ok(responses::decode_passive_target(&payload)?)
}

// spooltag-rs/spooltag/src/prelude.rs

pub use crate::protocol::commands::Command;
pub use crate::protocol::responses::PassiveTarget;
pub use crate::record::{FilamentRecord, Material, length_for_weight, weight_for_length};
pub use crate::tag::{
    configure, detect, probe, read_tag, read_tag_pages, write_tag, write_tag_pages,
};
pub use crate::transport::{ByteDuplex, MockDuplex, Pn532Transport};
#[cfg(feature = "serial")]
pub use crate::transport::SerialDuplex;
pub use crate::{CodecError, Color, Diameter, Error, FirmwareVersion, Result, TransportError};

// Re-export small utilities for convenience
pub use crate::utils::{
    bytes_to_hex, bytes_to_hex_spaced, default_command_timeout, ms, parse_hex, tag_access_timeout,
};

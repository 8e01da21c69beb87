// spooltag-rs/spooltag/src/error.rs

use thiserror::Error;

/// コーデック側エラー型
///
/// Errors local to encoding/decoding the fixed-layout tag record. These
/// never cross into [`TransportError`]; the combining [`Error`] wraps
/// both for the application-facing tag operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("field {field} overflows: {value} > {max}")]
    FieldOverflow {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("truncated record: need {expected} bytes, got {actual}")]
    TruncatedRecord { expected: usize, actual: usize },

    #[error("unknown tag layout: magic {magic:02x?}")]
    UnknownLayout { magic: [u8; 4] },
}

/// トランスポート側エラー型
///
/// Errors surfaced by the PN532 transport state machine and the block
/// command shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("port unavailable: {0}")]
    PortUnavailable(String),

    #[error("operation timed out")]
    Timeout,

    #[error("another command is in flight")]
    Busy,

    #[error("operation cancelled")]
    Cancelled,

    #[error("transport closed: {0}")]
    Closed(String),

    #[error("command frame too long: {actual} > {max}")]
    FrameTooLong { max: usize, actual: usize },

    #[error("command failed: status {status:#06x}")]
    CommandFailed { status: u16 },

    #[error("write verification failed at offset {offset}")]
    WriteVerificationFailed { offset: usize },

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("short response: need {expected} bytes, got {actual}")]
    ShortResponse { expected: usize, actual: usize },
}

/// Combined error surface for the tag-level operations, so UI layers
/// handle a single discriminated result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Crate-wide result alias over the combined [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

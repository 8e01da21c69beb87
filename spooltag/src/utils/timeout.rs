//! Timing defaults used across the crate.
//!
//! Keep these helpers minimal: they centralize the commonly used timeout
//! and settle values so tests and code can express them clearly.

use std::time::Duration;

/// Default timeout for short request/response commands (firmware query,
/// SAM configuration) when a caller doesn't provide one.
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 1000;

/// Default timeout for commands that involve physical tag dwell time
/// (target detection, block reads/writes).
pub const TAG_ACCESS_TIMEOUT_MS: u64 = 3000;

/// Settle delay between writing a full record and the verification
/// read-back; tag EEPROM commits are not instantaneous.
pub const WRITE_SETTLE_MS: u64 = 200;

/// Delay after the wake-up byte before the port is considered ready.
pub const WAKEUP_DELAY_MS: u64 = 100;

/// Interval at which the background reader drains the duplex.
pub const POLL_INTERVAL_MS: u64 = 10;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default command timeout as Duration.
pub fn default_command_timeout() -> Duration {
    ms(DEFAULT_COMMAND_TIMEOUT_MS)
}

/// Convenience: default tag-access timeout as Duration.
pub fn tag_access_timeout() -> Duration {
    ms(TAG_ACCESS_TIMEOUT_MS)
}

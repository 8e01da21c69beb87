//! Utilities for spooltag: small, reusable helpers used across the crate.
//!
//! Hex rendering for log/debug output and the timing defaults shared by
//! the transport state machine.

pub mod hex;
pub mod timeout;

// Re-export the most common helpers at the `utils` module level so callers can
// use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use hex::*;
pub use timeout::*;

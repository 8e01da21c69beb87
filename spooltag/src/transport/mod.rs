// spooltag-rs/spooltag/src/transport/mod.rs

mod block;
pub mod mock;
pub mod pn532;
#[cfg(feature = "serial")]
pub mod serial;
pub mod traits;

pub use mock::MockDuplex;
pub use pn532::Pn532Transport;
#[cfg(feature = "serial")]
pub use serial::SerialDuplex;
pub use traits::ByteDuplex;

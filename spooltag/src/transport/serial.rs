// spooltag-rs/spooltag/src/transport/serial.rs

//! Serial-port duplex for PN532 modules on a USB-serial bridge.

use std::io::{self, Read, Write};

use log::info;
use serialport::{DataBits, FlowControl, Parity, StopBits};

use crate::TransportError;
use crate::constants::BAUD_RATE;
use crate::transport::traits::ByteDuplex;
use crate::utils::timeout::{POLL_INTERVAL_MS, ms};

/// A [`ByteDuplex`] over a serial device node, configured 115200 8N1,
/// no flow control, with a short read timeout so the transport's
/// reader loop never blocks for long.
pub struct SerialDuplex {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialDuplex {
    /// Open and configure the serial device at `path`
    /// (e.g. `/dev/tty.usbserial-14340`, `COM5`).
    pub fn open(path: &str) -> Result<Self, TransportError> {
        let port = serialport::new(path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(ms(POLL_INTERVAL_MS))
            .open()
            .map_err(|e| TransportError::PortUnavailable(e.to_string()))?;
        info!("opened serial port {} at {} 8N1", path, BAUD_RATE);
        Ok(Self { port })
    }
}

impl ByteDuplex for SerialDuplex {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // an empty line is not an error, just nothing pending yet
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.port.write(buf)?;
        self.port.flush()?;
        Ok(n)
    }
}

// spooltag-rs/spooltag/src/transport/pn532.rs

//! The PN532 request/response state machine.
//!
//! One transport instance serializes all requests against one physical
//! port. A background reader thread continuously drains the duplex into
//! a rolling receive buffer; API calls are scoped condvar waits on that
//! buffer with a deadline. Responses are matched to requests purely by
//! temporal order (the wire protocol has no correlation token), so the
//! buffer is drained at the start of every exchange and a second
//! concurrent call is rejected with `Busy`.
//!
//! A protocol-level failure (timeout, bad frame) leaves the port open
//! for the next command; a hard duplex I/O error closes the transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::TransportError;
use crate::constants::PN532_WAKEUP;
use crate::protocol::commands::Command;
use crate::protocol::frame::{Frame, Scan};
use crate::transport::traits::ByteDuplex;
use crate::utils::timeout::{POLL_INTERVAL_MS, WAKEUP_DELAY_MS, ms};

type Result<T> = std::result::Result<T, TransportError>;

pub(crate) struct RxState {
    pub(crate) buf: Vec<u8>,
    pub(crate) closed: bool,
    pub(crate) io_error: Option<String>,
}

pub(crate) struct Shared {
    pub(crate) rx: Mutex<RxState>,
    pub(crate) cond: Condvar,
    busy: AtomicBool,
    duplex: Mutex<Option<Box<dyn ByteDuplex>>>,
}

/// Half-duplex request/response transport to a PN532 over a byte stream.
pub struct Pn532Transport {
    pub(crate) shared: Arc<Shared>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

/// Releases the single-command-in-flight slot on drop.
pub(crate) struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

pub(crate) fn closed_error(rx: &RxState) -> TransportError {
    match &rx.io_error {
        Some(e) => TransportError::Closed(e.clone()),
        None => TransportError::Cancelled,
    }
}

impl Pn532Transport {
    /// Take ownership of an opened duplex, wake the PN532 and start the
    /// background reader. The wake-up byte is followed by a settle
    /// delay before the port is considered ready.
    pub fn open(mut duplex: Box<dyn ByteDuplex>) -> Result<Self> {
        duplex
            .write(&[PN532_WAKEUP])
            .map_err(|e| TransportError::PortUnavailable(e.to_string()))?;
        thread::sleep(ms(WAKEUP_DELAY_MS));

        let shared = Arc::new(Shared {
            rx: Mutex::new(RxState {
                buf: Vec::new(),
                closed: false,
                io_error: None,
            }),
            cond: Condvar::new(),
            busy: AtomicBool::new(false),
            duplex: Mutex::new(Some(duplex)),
        });

        let reader = thread::spawn({
            let shared = Arc::clone(&shared);
            move || reader_loop(&shared)
        });

        debug!("transport open");
        Ok(Self {
            shared,
            reader: Mutex::new(Some(reader)),
        })
    }

    /// Whether the transport is still usable (not closed, no hard I/O
    /// error recorded).
    pub fn is_open(&self) -> bool {
        !lock(&self.shared.rx).closed
    }

    /// Send one framed command and wait for its response payload (the
    /// bytes after TFI, excluding checksum and postamble).
    ///
    /// The incoming stream is scanned for the ACK subsequence first,
    /// then for a checksum-valid device frame whose first payload byte
    /// is `opcode + 1`; corrupt candidates are skipped. Fails with
    /// `Timeout` when no valid response is assembled in time and `Busy`
    /// when another command is already in flight.
    pub fn send_command(&self, opcode: u8, params: &[u8], timeout: Duration) -> Result<Vec<u8>> {
        let _guard = self.acquire()?;
        let deadline = Instant::now() + timeout;

        // a late response from the previous exchange must not leak into
        // this command's window
        self.drain_rx()?;

        let frame = Frame::host(opcode, params)?;
        trace!("-> {}", crate::utils::bytes_to_hex_spaced(&frame));
        self.write_all(&frame)?;

        self.wait_ack(deadline)?;
        self.wait_response(opcode, deadline)
    }

    /// Encode and send a [`Command`], waiting for its response payload.
    pub fn execute(&self, cmd: &Command, timeout: Duration) -> Result<Vec<u8>> {
        let payload = cmd.encode();
        self.send_command(payload[0], &payload[1..], timeout)
    }

    /// Close the transport: unblocks any in-flight call with
    /// `Cancelled`, stops the reader and releases the duplex.
    /// Idempotent and safe to call mid-command.
    pub fn close(&self) {
        {
            let mut rx = lock(&self.shared.rx);
            if !rx.closed {
                rx.closed = true;
                debug!("transport closed");
            }
            self.shared.cond.notify_all();
        }
        if let Some(handle) = lock(&self.reader).take() {
            let _ = handle.join();
        }
        if let Some(mut duplex) = lock(&self.shared.duplex).take() {
            let _ = duplex.close();
        }
    }

    pub(crate) fn acquire(&self) -> Result<BusyGuard<'_>> {
        if self
            .shared
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(TransportError::Busy);
        }
        Ok(BusyGuard(&self.shared.busy))
    }

    pub(crate) fn drain_rx(&self) -> Result<()> {
        let mut rx = lock(&self.shared.rx);
        if rx.closed {
            return Err(closed_error(&rx));
        }
        rx.buf.clear();
        Ok(())
    }

    pub(crate) fn write_all(&self, bytes: &[u8]) -> Result<()> {
        let mut guard = lock(&self.shared.duplex);
        let duplex = guard.as_mut().ok_or(TransportError::Cancelled)?;
        let mut off = 0usize;
        while off < bytes.len() {
            match duplex.write(&bytes[off..]) {
                Ok(0) => {
                    drop(guard);
                    self.mark_closed("write accepted 0 bytes".into());
                    return Err(TransportError::Closed("write accepted 0 bytes".into()));
                }
                Ok(n) => off += n,
                Err(e) => {
                    drop(guard);
                    self.mark_closed(e.to_string());
                    return Err(TransportError::Closed(e.to_string()));
                }
            }
        }
        Ok(())
    }

    fn mark_closed(&self, reason: String) {
        let mut rx = lock(&self.shared.rx);
        if !rx.closed {
            warn!("duplex failed, closing transport: {}", reason);
            rx.io_error = Some(reason);
            rx.closed = true;
        }
        self.shared.cond.notify_all();
    }

    fn wait_ack(&self, deadline: Instant) -> Result<()> {
        let mut rx = lock(&self.shared.rx);
        loop {
            if rx.closed {
                return Err(closed_error(&rx));
            }
            if let Some(end) = Frame::find_ack(&rx.buf) {
                rx.buf.drain(..end);
                trace!("<- ack");
                return Ok(());
            }
            rx = self.wait_until(rx, deadline)?;
        }
    }

    fn wait_response(&self, opcode: u8, deadline: Instant) -> Result<Vec<u8>> {
        let expected = opcode.wrapping_add(1);
        let mut rx = lock(&self.shared.rx);
        loop {
            if rx.closed {
                return Err(closed_error(&rx));
            }
            loop {
                match Frame::scan_response(&rx.buf) {
                    Scan::Response { end, payload } => {
                        rx.buf.drain(..end);
                        if payload.first() == Some(&expected) {
                            trace!("<- {}", crate::utils::bytes_to_hex_spaced(&payload));
                            return Ok(payload);
                        }
                        warn!(
                            "skipping frame with response code {:02x?}, want {:#04x}",
                            payload.first(),
                            expected
                        );
                    }
                    Scan::Incomplete { keep_from } => {
                        if keep_from > 0 {
                            rx.buf.drain(..keep_from);
                        }
                        break;
                    }
                }
            }
            rx = self.wait_until(rx, deadline)?;
        }
    }

    /// Wait for more bytes until `deadline`; cancellation is observed
    /// through the condvar, not just timer expiry.
    pub(crate) fn wait_until<'a>(
        &'a self,
        guard: MutexGuard<'a, RxState>,
        deadline: Instant,
    ) -> Result<MutexGuard<'a, RxState>> {
        let now = Instant::now();
        if now >= deadline {
            return Err(TransportError::Timeout);
        }
        let (guard, _) = self
            .shared
            .cond
            .wait_timeout(guard, deadline - now)
            .unwrap_or_else(|e| e.into_inner());
        Ok(guard)
    }

    /// Consume exactly `n` bytes from the rolling buffer (block-command
    /// responses are fixed-size, not framed).
    pub(crate) fn wait_exact(&self, n: usize, deadline: Instant) -> Result<Vec<u8>> {
        let mut rx = lock(&self.shared.rx);
        loop {
            if rx.closed {
                return Err(closed_error(&rx));
            }
            if rx.buf.len() >= n {
                return Ok(rx.buf.drain(..n).collect());
            }
            rx = self.wait_until(rx, deadline)?;
        }
    }
}

impl Drop for Pn532Transport {
    fn drop(&mut self) {
        self.close();
    }
}

fn reader_loop(shared: &Shared) {
    let mut scratch = [0u8; 256];
    loop {
        if lock(&shared.rx).closed {
            break;
        }
        let result = {
            let mut guard = lock(&shared.duplex);
            match guard.as_mut() {
                Some(duplex) => duplex.read(&mut scratch),
                None => break,
            }
        };
        match result {
            Ok(0) => {}
            Ok(n) => {
                let mut rx = lock(&shared.rx);
                rx.buf.extend_from_slice(&scratch[..n]);
                shared.cond.notify_all();
            }
            Err(e) => {
                let mut rx = lock(&shared.rx);
                if !rx.closed {
                    warn!("duplex read failed, closing transport: {}", e);
                    rx.io_error = Some(e.to_string());
                    rx.closed = true;
                }
                shared.cond.notify_all();
                break;
            }
        }
        thread::sleep(ms(POLL_INTERVAL_MS));
    }
    trace!("reader loop exited");
}

// spooltag-rs/spooltag/src/transport/mock.rs

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crate::constants::PN532_WAKEUP;
use crate::transport::traits::ByteDuplex;

/// Mock duplex for unit tests. It records written payloads and feeds
/// queued responses back through `read`.
///
/// Cloning returns a second handle onto the same state, so a test can
/// keep one handle for assertions while the transport owns the other.
#[derive(Debug, Clone, Default)]
pub struct MockDuplex {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    rx: VecDeque<u8>,
    written: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
    fail_reads: bool,
    closed: bool,
}

impl MockDuplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes that become readable after the *next* write call,
    /// mimicking a device that answers each command.
    pub fn push_response(&self, resp: Vec<u8>) {
        self.inner.lock().unwrap().responses.push_back(resp);
    }

    /// Make bytes readable immediately, without waiting for a write.
    pub fn feed(&self, bytes: &[u8]) {
        self.inner.lock().unwrap().rx.extend(bytes.iter().copied());
    }

    /// All payloads written so far, one entry per `write` call.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.inner.lock().unwrap().written.clone()
    }

    /// Testing hook: subsequent reads fail with a hard I/O error.
    pub fn fail_reads(&self) {
        self.inner.lock().unwrap().fail_reads = true;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }
}

impl ByteDuplex for MockDuplex {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_reads {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock read failure"));
        }
        let mut n = 0;
        while n < buf.len() {
            match state.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.inner.lock().unwrap();
        state.written.push(buf.to_vec());
        // The PN532 does not answer the wake-up byte, so it must not
        // consume a queued command response (queued responses are keyed
        // one-per-command, matching the real device).
        if buf != [PN532_WAKEUP] {
            if let Some(resp) = state.responses.pop_front() {
                state.rx.extend(resp);
            }
        }
        Ok(buf.len())
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.lock().unwrap().closed = true;
        Ok(())
    }
}

// src/common/mock.rs
//
// Scripted channel shared by the unit tests. Replies are released one per
// complete outgoing frame, the way the controller answers.

use core::time::Duration;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use super::frame::{ACK, ENQ, LF, NAK};
use super::hal_traits::{GaugeSerial, GaugeTimer};

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

// --- Mock Interface ---
pub(crate) struct MockGauge {
    pub open: bool,
    pub open_calls: u32,
    pub clear_calls: u32,
    /// Shared so tests can observe closes after the controller is dropped.
    pub close_calls: Rc<Cell<u32>>,
    pub current_time_us: u64,
    pub read_queue: VecDeque<u8>,
    pub replies: VecDeque<Vec<u8>>,
    pub written: Vec<u8>,
    pending_frame: Vec<u8>,
    pub fail_writes: bool,
    pub fail_close: bool,
    pub fail_clear: bool,
}

impl MockGauge {
    pub fn new() -> Self {
        MockGauge {
            open: false,
            open_calls: 0,
            clear_calls: 0,
            close_calls: Rc::new(Cell::new(0)),
            current_time_us: 0,
            read_queue: VecDeque::new(),
            replies: VecDeque::new(),
            written: Vec::new(),
            pending_frame: Vec::new(),
            fail_writes: false,
            fail_close: false,
            fail_clear: false,
        }
    }

    /// Queues a raw reply, released after the next complete outgoing frame.
    pub fn reply(mut self, bytes: &[u8]) -> Self {
        self.replies.push_back(bytes.to_vec());
        self
    }

    /// Queues `<ACK><CR><LF>` followed by `payload<CR><LF>`.
    pub fn ack_then(self, payload: &str) -> Self {
        let mut line = payload.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.reply(&[ACK, b'\r', b'\n']).reply(&line)
    }

    /// Queues `<NAK><CR><LF>`.
    pub fn nak(self) -> Self {
        self.reply(&[NAK, b'\r', b'\n'])
    }

    /// Bytes sitting in the receive buffer before any command is sent.
    pub fn with_stale_input(mut self, bytes: &[u8]) -> Self {
        self.read_queue.extend(bytes.iter().copied());
        self
    }

    pub fn enq_count(&self) -> usize {
        self.written.iter().filter(|&&b| b == ENQ).count()
    }

    fn frame_complete(&mut self) {
        self.pending_frame.clear();
        if let Some(reply) = self.replies.pop_front() {
            self.read_queue.extend(reply);
        }
    }
}

impl GaugeTimer for MockGauge {
    type Instant = MockInstant;

    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }

    fn delay_us(&mut self, us: u32) {
        self.current_time_us = self.current_time_us.saturating_add(us as u64);
    }
}

impl GaugeSerial for MockGauge {
    type Error = MockCommError;

    fn open(&mut self) -> Result<(), Self::Error> {
        self.open_calls += 1;
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.close_calls.set(self.close_calls.get() + 1);
        self.open = false;
        if self.fail_close {
            return Err(MockCommError);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn clear_buffers(&mut self) -> Result<(), Self::Error> {
        self.clear_calls += 1;
        if self.fail_clear {
            return Err(MockCommError);
        }
        self.read_queue.clear();
        self.pending_frame.clear();
        Ok(())
    }

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        match self.read_queue.pop_front() {
            Some(byte) => Ok(byte),
            None => {
                // Idle line: let the clock run so deadlines expire
                self.current_time_us += 1_000;
                Err(nb::Error::WouldBlock)
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        self.written.push(byte);
        self.pending_frame.push(byte);
        let lone_enq = self.pending_frame.as_slice() == [ENQ];
        if lone_enq || byte == LF {
            self.frame_complete();
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

/// Wraps `mock` in a controller and connects it.
pub(crate) fn connected(mock: MockGauge) -> crate::controller::SyncController<MockGauge> {
    let mut controller = crate::controller::SyncController::new(mock);
    controller.connect().unwrap();
    controller
}

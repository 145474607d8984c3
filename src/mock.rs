// src/mock.rs

//! Simulated serial link for driving the bus without hardware.
//!
//! [`MockLink`] implements both HAL traits over in-memory buffers: bytes the
//! driver writes land in a log, replies are staged up front, and every delay
//! advances a virtual clock so deadline logic runs instantly in tests.

use core::ops::Add;
use core::time::Duration;

use crate::common::hal_traits::{SrfSerial, SrfTimer};
use crate::common::types::BaudRate;

const REPLY_CAPACITY: usize = 16;
const WRITE_CAPACITY: usize = 64;

/// Hard fault injected with [`MockLink::fail_reads`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MockFault;

/// Timestamp on the mock's virtual clock, in microseconds.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct MockInstant(u64);

impl Add<Duration> for MockInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

/// In-memory [`SrfSerial`] and [`SrfTimer`] implementation.
pub struct MockLink {
    reply: [u8; REPLY_CAPACITY],
    reply_len: usize,
    reply_pos: usize,
    written: [u8; WRITE_CAPACITY],
    written_len: usize,
    read_polls: u32,
    flushes: u32,
    fail_reads: bool,
    baud: Option<BaudRate>,
    now_us: u64,
}

impl MockLink {
    pub fn new() -> Self {
        MockLink {
            reply: [0; REPLY_CAPACITY],
            reply_len: 0,
            reply_pos: 0,
            written: [0; WRITE_CAPACITY],
            written_len: 0,
            read_polls: 0,
            flushes: 0,
            fail_reads: false,
            baud: None,
            now_us: 0,
        }
    }

    /// Queues the bytes the simulated sensor will answer with, replacing
    /// anything staged earlier.
    pub fn stage_reply(&mut self, bytes: &[u8]) {
        assert!(bytes.len() <= REPLY_CAPACITY);
        self.reply[..bytes.len()].copy_from_slice(bytes);
        self.reply_len = bytes.len();
        self.reply_pos = 0;
    }

    /// Makes every subsequent read fail hard instead of blocking.
    pub fn fail_reads(&mut self) {
        self.fail_reads = true;
    }

    /// Everything the driver has written, in order.
    pub fn written(&self) -> &[u8] {
        &self.written[..self.written_len]
    }

    /// How often the driver polled for a byte.
    pub fn read_poll_count(&self) -> u32 {
        self.read_polls
    }

    /// How often the driver flushed the transmit side.
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// The rate the driver retuned the link to, if it did.
    pub fn baud(&self) -> Option<BaudRate> {
        self.baud
    }

    /// Microseconds of virtual time consumed by delays.
    pub fn elapsed_us(&self) -> u64 {
        self.now_us
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl SrfSerial for MockLink {
    type Error = MockFault;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.read_polls += 1;
        if self.fail_reads {
            return Err(nb::Error::Other(MockFault));
        }
        if self.reply_pos < self.reply_len {
            let byte = self.reply[self.reply_pos];
            self.reply_pos += 1;
            Ok(byte)
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.written_len < WRITE_CAPACITY {
            self.written[self.written_len] = byte;
            self.written_len += 1;
            Ok(())
        } else {
            Err(nb::Error::Other(MockFault))
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }

    fn set_baud(&mut self, baud: BaudRate) -> Result<(), Self::Error> {
        self.baud = Some(baud);
        Ok(())
    }
}

impl SrfTimer for MockLink {
    type Instant = MockInstant;

    fn delay_us(&mut self, us: u32) {
        self.now_us = self.now_us.saturating_add(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_us = self.now_us.saturating_add(u64::from(ms) * 1000);
    }

    fn now(&self) -> Self::Instant {
        MockInstant(self.now_us)
    }
}

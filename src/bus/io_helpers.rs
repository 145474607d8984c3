// src/bus/io_helpers.rs

use super::SrfBus;
use crate::common::{
    error::SrfError,
    hal_traits::{SrfSerial, SrfTimer},
    timing,
    types::Reading,
};
use arrayvec::ArrayVec;
use core::fmt::Debug;
use core::time::Duration;
use log::{debug, trace};

/// Longest reply any command produces.
pub(super) const MAX_REPLY_LEN: usize = 2;

// Implementation block for I/O related helpers
impl<IF> SrfBus<IF>
where
    IF: SrfSerial + SrfTimer,
    IF::Error: Debug,
{
    /// Polls a non-blocking operation until it succeeds, the deadline
    /// passes, or the interface reports a hard fault.
    pub(super) fn with_deadline<FN, T>(
        &mut self,
        timeout: Duration,
        mut op: FN,
    ) -> Result<T, SrfError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> nb::Result<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match op(&mut self.interface) {
                Ok(value) => return Ok(value),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(SrfError::Timeout);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(SrfError::Io(e)),
            }
        }
    }

    /// Writes one 2-byte frame and pushes it out onto the line.
    pub(super) fn send_frame(&mut self, frame: [u8; 2]) -> Result<(), SrfError<IF::Error>> {
        trace!("tx frame [{:#04x}, {:#04x}]", frame[0], frame[1]);

        let write_timeout = timing::BYTE_DURATION * frame.len() as u32 + Duration::from_millis(20);
        for byte in frame {
            self.with_deadline(write_timeout, |iface| iface.write_byte(byte))?;
        }

        self.with_deadline(Duration::from_millis(10), |iface| iface.flush())
    }

    /// Reads exactly `len` reply bytes within one shared deadline window and
    /// folds them into an integer, most significant byte first.
    ///
    /// Timeouts, partial replies and read-side faults all collapse into
    /// [`Reading::NoReply`]: a silent sensor is routine on this bus, not an
    /// error.
    pub(super) fn read_reply(&mut self, len: usize, timeout: Duration) -> Reading {
        debug_assert!(len > 0 && len <= MAX_REPLY_LEN);

        let deadline = self.interface.now() + timeout;
        let mut reply: ArrayVec<u8, MAX_REPLY_LEN> = ArrayVec::new();

        while reply.len() < len {
            match self.interface.read_byte() {
                Ok(byte) => reply.push(byte),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        debug!("reply timed out after {} ms", timeout.as_millis());
                        return Reading::NoReply;
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(_)) => return Reading::NoReply,
            }
        }

        let value = reply
            .iter()
            .fold(0u16, |acc, &byte| (acc << 8) | u16::from(byte));
        Reading::Value(value)
    }
}

// --- Unit Tests for IO Helpers ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockFault, MockLink};

    fn bus() -> SrfBus<MockLink> {
        SrfBus::new(MockLink::new())
    }

    #[test]
    fn test_with_deadline_success_after_blocking() {
        let mut bus = bus();
        let mut polls = 0;
        let result = bus.with_deadline(Duration::from_millis(10), |_iface| {
            polls += 1;
            if polls < 4 {
                Err(nb::Error::WouldBlock)
            } else {
                Ok(123)
            }
        });
        assert_eq!(result.unwrap(), 123);
        assert_eq!(polls, 4);
    }

    #[test]
    fn test_with_deadline_timeout() {
        let mut bus = bus();
        let result: Result<(), _> =
            bus.with_deadline(Duration::from_millis(5), |_iface| Err(nb::Error::WouldBlock));
        assert!(matches!(result, Err(SrfError::Timeout)));
        assert!(bus.interface.elapsed_us() >= 5_000);
    }

    #[test]
    fn test_with_deadline_hard_fault() {
        let mut bus = bus();
        let result: Result<(), _> = bus.with_deadline(Duration::from_millis(5), |_iface| {
            Err(nb::Error::Other(MockFault))
        });
        assert!(matches!(result, Err(SrfError::Io(MockFault))));
    }

    #[test]
    fn test_send_frame_writes_and_flushes() {
        let mut bus = bus();
        bus.send_frame([5, 0x5D]).unwrap();
        assert_eq!(bus.interface.written(), &[5, 0x5D]);
        assert_eq!(bus.interface.flush_count(), 1);
    }

    #[test]
    fn test_read_reply_single_byte() {
        let mut bus = bus();
        bus.interface.stage_reply(&[7]);
        assert_eq!(bus.read_reply(1, Duration::from_millis(5)), Reading::Value(7));
    }

    #[test]
    fn test_read_reply_two_bytes_big_endian() {
        let mut bus = bus();
        bus.interface.stage_reply(&[0x01, 0x2C]);
        assert_eq!(
            bus.read_reply(2, Duration::from_millis(5)),
            Reading::Value(300)
        );
    }

    #[test]
    fn test_read_reply_partial_times_out() {
        let mut bus = bus();
        bus.interface.stage_reply(&[0x01]);
        assert_eq!(
            bus.read_reply(2, Duration::from_millis(5)),
            Reading::NoReply
        );
        assert!(bus.interface.elapsed_us() >= 5_000);
    }

    #[test]
    fn test_read_reply_hard_fault() {
        let mut bus = bus();
        bus.interface.fail_reads();
        assert_eq!(
            bus.read_reply(1, Duration::from_millis(5)),
            Reading::NoReply
        );
    }
}

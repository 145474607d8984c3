// src/common/timing.rs

use core::time::Duration;

// The SRF01 answers version and status requests within a few byte times;
// only ranging is slow, bounded by the time an echo needs to come back from
// maximum distance. Every blocking read below is capped so a disconnected
// sensor costs bounded latency, never a hang.

/// Full ranging cycle. Callers that fire [`Range`](super::Command::Range)
/// must wait this long before asking for the stored result.
pub const RANGING_TIME: Duration = Duration::from_millis(70);

/// Settle time before polling for the reply of a report-style ranging
/// command. The echo cannot be in earlier than this.
pub const RANGE_REPORT_DELAY: Duration = Duration::from_millis(65);

/// Hard deadline for collecting a complete reply once it is due. Together
/// with [`RANGE_REPORT_DELAY`] the worst-case blocking window stays inside
/// the 70-100 ms the ranging physics allow.
pub const REPLY_TIMEOUT: Duration = Duration::from_millis(25);

/// Pause between polls of a not-yet-ready interface.
pub const POLL_INTERVAL_US: u32 = 100;

/// Nominal duration of one byte on the wire at 9600 baud (10 bits with
/// start and stop).
pub const BYTE_DURATION: Duration = Duration::from_micros(1042);

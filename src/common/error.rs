// src/common/error.rs

/// Errors reported by the driver.
///
/// Only malformed input and write-side transport faults surface here. A
/// sensor that fails to answer is routine on a half-duplex field bus and is
/// reported as [`Reading::NoReply`](super::types::Reading) instead, leaving
/// the bus usable for the next call.
#[derive(Debug, thiserror::Error)]
pub enum SrfError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the serial implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A write or flush stalled past its deadline.
    #[error("operation timed out")]
    Timeout,

    /// Address outside 1..=16 passed to a single-sensor operation.
    #[error("invalid sensor address {0}: expected 1 through 16")]
    InvalidAddress(u8),

    /// Address outside 0..=16 passed to a broadcast-capable operation.
    #[error("invalid target address {0}: expected 0 (broadcast) or 1 through 16")]
    InvalidBroadcastAddress(u8),

    /// Measurement unit string that is neither `"cm"` nor `"in"`.
    #[error("invalid range unit: expected \"cm\" or \"in\"")]
    InvalidUnit,
}

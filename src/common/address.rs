// src/common/address.rs

use super::error::SrfError;
use core::convert::TryFrom;
use core::fmt;

/// Bus address of an SRF01 sensor.
///
/// Single sensors answer under 1 through 16. Address 0 broadcasts a command
/// to every sensor on the line and is only accepted by operations that never
/// read a reply.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SrfAddr(u8);

impl SrfAddr {
    /// Broadcast pseudo-address, reaching every sensor on the bus at once.
    pub const BROADCAST: SrfAddr = SrfAddr(0);
    /// Lowest assignable sensor address.
    pub const FIRST: u8 = 1;
    /// Highest assignable sensor address.
    pub const LAST: u8 = 16;
    /// Number of assignable addresses on one bus.
    pub const COUNT: usize = 16;

    /// Creates an address for a single sensor, rejecting anything outside
    /// 1..=16 (the broadcast address included).
    pub fn new<E: fmt::Debug>(value: u8) -> Result<Self, SrfError<E>> {
        if Self::is_assignable(value) {
            Ok(SrfAddr(value))
        } else {
            Err(SrfError::InvalidAddress(value))
        }
    }

    /// Creates an address for a broadcast-capable command, accepting 0 as
    /// well as 1..=16.
    pub fn new_with_broadcast<E: fmt::Debug>(value: u8) -> Result<Self, SrfError<E>> {
        if value == 0 || Self::is_assignable(value) {
            Ok(SrfAddr(value))
        } else {
            Err(SrfError::InvalidBroadcastAddress(value))
        }
    }

    /// Creates an address without validation.
    ///
    /// # Safety
    /// The caller must guarantee `value <= 16`.
    pub const unsafe fn new_unchecked(value: u8) -> Self {
        SrfAddr(value)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_broadcast(self) -> bool {
        self.0 == 0
    }

    /// Whether `value` is an address a single sensor can hold.
    #[inline]
    pub const fn is_assignable(value: u8) -> bool {
        value >= Self::FIRST && value <= Self::LAST
    }
}

impl TryFrom<u8> for SrfAddr {
    type Error = SrfError;

    /// Converts a raw byte into a single-sensor address.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SrfAddr> for u8 {
    fn from(value: SrfAddr) -> Self {
        value.0
    }
}

impl fmt::Display for SrfAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

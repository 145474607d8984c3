// src/common/types.rs

use core::fmt;
use core::str::FromStr;

use super::error::SrfError;

/// Measurement unit attached to a ranging command.
///
/// The sensor reports its most recent range in whatever unit the last
/// ranging command asked for, so the driver tracks this per address to keep
/// [`last_range`](crate::bus::SrfBus::last_range) results interpretable.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Unit {
    #[default]
    Centimeters,
    Inches,
}

impl FromStr for Unit {
    type Err = SrfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(Unit::Centimeters),
            "in" => Ok(Unit::Inches),
            _ => Err(SrfError::InvalidUnit),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Centimeters => f.write_str("cm"),
            Unit::Inches => f.write_str("in"),
        }
    }
}

/// Outcome of a blocking read-back operation.
///
/// Version, status and distance are all non-negative on the wire, so a
/// missing reply stays distinguishable from every legitimate value.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reading {
    /// The value the sensor reported, reassembled from the reply bytes.
    Value(u16),
    /// The sensor did not produce a complete reply within the deadline.
    NoReply,
}

impl Reading {
    #[inline]
    pub const fn value(self) -> Option<u16> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::NoReply => None,
        }
    }

    #[inline]
    pub const fn is_no_reply(self) -> bool {
        matches!(self, Reading::NoReply)
    }

    /// Folds a missing reply into the conventional `-1` sentinel.
    #[inline]
    pub const fn or_sentinel(self) -> i32 {
        match self {
            Reading::Value(v) => v as i32,
            Reading::NoReply => -1,
        }
    }
}

/// Decoded form of the 1-byte status reply.
///
/// Bit 0 reports the transducer lock, bit 1 whether advanced mode is active.
/// A locked sensor in advanced mode measures all the way down to zero;
/// standard mode bottoms out around 18 cm.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Status(u8);

impl Status {
    pub const fn from_raw(raw: u8) -> Self {
        Status(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_locked(self) -> bool {
        self.0 & 0x01 != 0
    }

    #[inline]
    pub const fn is_advanced(self) -> bool {
        self.0 & 0x02 != 0
    }
}

impl From<u8> for Status {
    fn from(raw: u8) -> Self {
        Status::from_raw(raw)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.is_advanced() {
            "advanced"
        } else {
            "standard"
        };
        let lock = if self.is_locked() {
            "locked"
        } else {
            "unlocked"
        };
        write!(f, "{} mode, {}", mode, lock)
    }
}

/// Serial rates the sensor can be switched to at runtime.
///
/// Every sensor powers up at 9600 baud; there is no command back down, only
/// a power cycle restores the default rate.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BaudRate {
    Baud19200,
    Baud38400,
}

// src/common/command.rs

//! SRF01 command definitions.
//!
//! Every request on the wire is two bytes, `[address, opcode]`. The opcodes
//! come in pairs where a unit is involved: one for inches, one for
//! centimeters. "Report" variants transmit the measured range back over the
//! shared line and therefore must never be broadcast.

use core::time::Duration;

use super::address::SrfAddr;
use super::timing;
use super::types::{BaudRate, Unit};

/// First byte of the address-change unlock sequence.
pub const CHANGE_UNLOCK_1: u8 = 0xA0;
/// Second byte of the address-change unlock sequence.
pub const CHANGE_UNLOCK_2: u8 = 0xAA;
/// Third byte of the address-change unlock sequence.
pub const CHANGE_UNLOCK_3: u8 = 0xA5;

/// A command the bus master can issue to one sensor or, where the table
/// allows it, to all of them at once.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// Start a ranging; the result is stored on the sensor for a later
    /// [`LastRange`](Command::LastRange).
    Range { unit: Unit },
    /// Start a ranging and transmit the result once the echo is in.
    RangeReport { unit: Unit },
    /// Ranging without the ultrasonic burst, listening for a burst another
    /// sensor already sent.
    FakeRange { unit: Unit },
    /// Fake ranging that transmits its result.
    FakeRangeReport { unit: Unit },
    /// Transmit an 8-cycle ultrasonic burst without measuring.
    Burst,
    /// Ask for the firmware revision byte.
    SoftwareVersion,
    /// Ask for the result of the most recent ranging.
    LastRange,
    /// Ask for the status byte (mode and lock bits).
    Status,
    /// Put the sensor into low-power standby.
    Sleep,
    /// Release the minimum-range lock so the next ranging re-calibrates.
    Unlock,
    /// Enable advanced mode (measurement down to zero distance).
    SetAdvancedMode,
    /// Return to standard mode (~18 cm floor).
    ClearAdvancedMode,
    /// Switch the sensor's serial rate.
    SetBaud(BaudRate),
}

impl Command {
    /// Protocol opcode for this command.
    pub const fn opcode(self) -> u8 {
        match self {
            Command::Range { unit: Unit::Inches } => 0x50,
            Command::Range { unit: Unit::Centimeters } => 0x51,
            Command::RangeReport { unit: Unit::Inches } => 0x53,
            Command::RangeReport { unit: Unit::Centimeters } => 0x54,
            Command::FakeRange { unit: Unit::Inches } => 0x56,
            Command::FakeRange { unit: Unit::Centimeters } => 0x57,
            Command::FakeRangeReport { unit: Unit::Inches } => 0x59,
            Command::FakeRangeReport { unit: Unit::Centimeters } => 0x5A,
            Command::Burst => 0x5C,
            Command::SoftwareVersion => 0x5D,
            Command::LastRange => 0x5E,
            Command::Status => 0x5F,
            Command::Sleep => 0x60,
            Command::Unlock => 0x61,
            Command::SetAdvancedMode => 0x62,
            Command::ClearAdvancedMode => 0x63,
            Command::SetBaud(BaudRate::Baud19200) => 0x64,
            Command::SetBaud(BaudRate::Baud38400) => 0x65,
        }
    }

    /// Number of reply bytes the sensor sends for this command.
    pub const fn reply_len(self) -> usize {
        match self {
            Command::SoftwareVersion | Command::Status => 1,
            Command::RangeReport { .. } | Command::FakeRangeReport { .. } | Command::LastRange => 2,
            _ => 0,
        }
    }

    /// Whether address 0 is a legal target.
    ///
    /// Exactly the commands with no reply: a broadcast to a replying command
    /// would put every sensor on the shared line at once.
    pub const fn supports_broadcast(self) -> bool {
        self.reply_len() == 0
    }

    /// Settle time between writing the command and the first reply byte.
    ///
    /// Report commands need the echo to physically return before the sensor
    /// has anything to say; the stored-result reads answer immediately.
    pub const fn turnaround(self) -> Duration {
        match self {
            Command::RangeReport { .. } | Command::FakeRangeReport { .. } => {
                timing::RANGE_REPORT_DELAY
            }
            _ => Duration::ZERO,
        }
    }

    /// Builds the 2-byte frame addressing this command to `addr`.
    pub const fn encode(self, addr: SrfAddr) -> [u8; 2] {
        [addr.get(), self.opcode()]
    }
}

/// The four discrete frames of the address-change sequence: three unlock
/// frames with fixed magic bytes, then the frame carrying the new address.
///
/// Only valid with exactly one sensor attached; every sensor that hears the
/// sequence takes the new address.
pub const fn change_address_frames(current: SrfAddr, new: SrfAddr) -> [[u8; 2]; 4] {
    let cur = current.get();
    [
        [cur, CHANGE_UNLOCK_1],
        [cur, CHANGE_UNLOCK_2],
        [cur, CHANGE_UNLOCK_3],
        [cur, new.get()],
    ]
}

// src/bus/mod.rs

//! Bus-master driver for SRF01 sensors on a shared serial line.

mod io_helpers;
mod state;
mod transaction;

use core::fmt::Debug;

use crate::common::{
    address::SrfAddr,
    command::{change_address_frames, Command},
    error::SrfError,
    hal_traits::{SrfSerial, SrfTimer},
    types::{BaudRate, Reading, Unit},
};
use log::debug;
use state::UnitTracker;

/// Bus master for up to 16 SRF01 sensors on one half-duplex serial line.
///
/// Every operation validates its arguments before anything is written, then
/// encodes one (or for address changes, four) 2-byte frames and optionally
/// waits for a reply under a hard deadline. Operations are synchronous and
/// serialized through `&mut self`; the bus is a single shared resource, so
/// callers running from several execution contexts must wrap the whole
/// object in their own lock. Nothing is retried internally; a caller that
/// sees [`Reading::NoReply`] simply invokes the operation again.
#[derive(Debug)]
pub struct SrfBus<IF> {
    interface: IF,
    units: UnitTracker,
}

impl<IF> SrfBus<IF>
where
    IF: SrfSerial + SrfTimer,
    IF::Error: Debug,
{
    /// Creates a bus master over a serial link configured at the sensors'
    /// 9600 baud power-on rate.
    pub fn new(interface: IF) -> Self {
        SrfBus {
            interface,
            units: UnitTracker::new(),
        }
    }

    /// Releases the serial interface.
    pub fn free(self) -> IF {
        self.interface
    }

    /// Renumbers the sensor currently at `current` to `new`.
    ///
    /// Issues the documented unlock-then-set sequence as four discrete
    /// writes with no reads interleaved. Every sensor that hears the
    /// sequence takes the new address, so exactly one sensor may be attached
    /// while this runs, a precondition the wire protocol cannot check.
    pub fn change_address(&mut self, current: u8, new: u8) -> Result<(), SrfError<IF::Error>> {
        let current = SrfAddr::new(current)?;
        let new = SrfAddr::new(new)?;

        debug!("changing sensor address {} -> {}", current, new);
        for frame in change_address_frames(current, new) {
            self.send_frame(frame)?;
        }
        self.units.reassign(current, new);
        Ok(())
    }

    /// Reads the firmware revision of the sensor at `addr`.
    pub fn software_version(&mut self, addr: u8) -> Result<Reading, SrfError<IF::Error>> {
        let addr = SrfAddr::new(addr)?;
        self.exchange(addr, Command::SoftwareVersion)
    }

    /// Reads the raw status byte of the sensor at `addr`.
    ///
    /// Decode the mode and lock bits with
    /// [`Status::from_raw`](crate::Status::from_raw).
    pub fn status(&mut self, addr: u8) -> Result<Reading, SrfError<IF::Error>> {
        let addr = SrfAddr::new(addr)?;
        self.exchange(addr, Command::Status)
    }

    /// Reads the stored result of the most recent ranging at `addr`, in the
    /// unit reported by [`last_unit`](SrfBus::last_unit).
    pub fn last_range(&mut self, addr: u8) -> Result<Reading, SrfError<IF::Error>> {
        let addr = SrfAddr::new(addr)?;
        self.exchange(addr, Command::LastRange)
    }

    /// The unit the last ranging command sent towards `addr` asked for,
    /// [`Unit::Centimeters`] if none was ever sent.
    pub fn last_unit(&self, addr: u8) -> Result<Unit, SrfError<IF::Error>> {
        let addr = SrfAddr::new(addr)?;
        Ok(self.units.unit_for(addr))
    }

    /// Starts a ranging without waiting for the result.
    ///
    /// Address 0 starts every sensor at once. The echo needs
    /// [`RANGING_TIME`](crate::common::timing::RANGING_TIME) to come back;
    /// after that, collect results with [`last_range`](SrfBus::last_range).
    pub fn start_ranging(&mut self, addr: u8, unit: Unit) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::Range { unit })?;
        self.units.record(addr, unit);
        Ok(())
    }

    /// Like [`start_ranging`](SrfBus::start_ranging), but without emitting
    /// the ultrasonic burst, for listening to a burst another sensor sent.
    pub fn start_fake_ranging(&mut self, addr: u8, unit: Unit) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::FakeRange { unit })?;
        self.units.record(addr, unit);
        Ok(())
    }

    /// Transmits an ultrasonic burst without measuring anything.
    pub fn burst(&mut self, addr: u8) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::Burst)
    }

    /// Ranges the sensor at `addr` and blocks until it reports the
    /// distance, roughly 90 ms worst case.
    ///
    /// Broadcast is rejected here: with more than one sensor answering, the
    /// shared reply line would see simultaneous talkers.
    pub fn range(&mut self, addr: u8, unit: Unit) -> Result<Reading, SrfError<IF::Error>> {
        let addr = SrfAddr::new(addr)?;
        let reading = self.exchange(addr, Command::RangeReport { unit })?;
        self.units.record(addr, unit);
        Ok(reading)
    }

    /// Blocking ranging without the burst, like
    /// [`start_fake_ranging`](SrfBus::start_fake_ranging).
    pub fn fake_range(&mut self, addr: u8, unit: Unit) -> Result<Reading, SrfError<IF::Error>> {
        let addr = SrfAddr::new(addr)?;
        let reading = self.exchange(addr, Command::FakeRangeReport { unit })?;
        self.units.record(addr, unit);
        Ok(reading)
    }

    /// Switches the sensor(s) into advanced mode, allowing measurement all
    /// the way down to zero distance.
    pub fn set_advanced_mode(&mut self, addr: u8) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::SetAdvancedMode)
    }

    /// Returns the sensor(s) to standard mode with its ~18 cm floor.
    pub fn clear_advanced_mode(&mut self, addr: u8) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::ClearAdvancedMode)
    }

    /// Puts the sensor(s) into low-power standby. The first command after
    /// waking may go unanswered while the sensor starts back up.
    pub fn sleep(&mut self, addr: u8) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::Sleep)
    }

    /// Releases the minimum-range lock acquired in advanced mode so the
    /// next ranging re-runs its calibration.
    pub fn unlock(&mut self, addr: u8) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::Unlock)
    }

    /// Switches the sensor(s) to a faster serial rate, then retunes the
    /// host link to match. Only a power cycle restores 9600 baud.
    pub fn set_baud_rate(&mut self, addr: u8, baud: BaudRate) -> Result<(), SrfError<IF::Error>> {
        let addr = SrfAddr::new_with_broadcast(addr)?;
        self.send_command(addr, Command::SetBaud(baud))?;
        self.interface.set_baud(baud).map_err(SrfError::Io)
    }
}

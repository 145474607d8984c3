// src/lib.rs

//! Driver for the Devantech SRF01 ultrasonic rangefinder.
//!
//! The SRF01 sits on a shared half-duplex serial line together with up to
//! fifteen siblings, each reachable under an address from 1 to 16. Address 0
//! broadcasts to every sensor at once and is only legal for commands that do
//! not answer, so the shared reply line never sees two talkers.
//!
//! [`SrfBus`] owns the serial link through the [`SrfSerial`] and [`SrfTimer`]
//! traits and exposes one method per bus operation. Invalid arguments come
//! back as [`SrfError`] before anything touches the wire; a sensor that stays
//! silent yields [`Reading::NoReply`] instead of an error, and the bus remains
//! usable for the next call.
//!
//! ```
//! use srf01::{mock::MockLink, Reading, SrfBus};
//!
//! let mut link = MockLink::new();
//! link.stage_reply(&[6]);
//!
//! let mut bus = SrfBus::new(link);
//! assert_eq!(bus.software_version(1).unwrap(), Reading::Value(6));
//! assert_eq!(bus.free().written(), &[1, 0x5D]);
//! ```

#![no_std]

pub mod bus;
pub mod common;
pub mod mock;

// Re-export key types for convenience
pub use bus::SrfBus;
pub use common::hal_traits::{SrfInstant, SrfSerial, SrfTimer};
pub use common::{BaudRate, Command, Reading, SrfAddr, SrfError, Status, Unit};

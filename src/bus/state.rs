// src/bus/state.rs

use crate::common::address::SrfAddr;
use crate::common::types::Unit;

/// Per-address record of the unit the last ranging command asked for.
///
/// The sensor remembers the unit of its own most recent ranging; this mirror
/// is what lets a later stored-result read be attributed correctly. A
/// broadcast ranging updates every slot, matching what every sensor on the
/// line just heard.
#[derive(Copy, Clone, Debug)]
pub(super) struct UnitTracker {
    units: [Unit; SrfAddr::COUNT],
}

impl UnitTracker {
    pub(super) const fn new() -> Self {
        UnitTracker {
            units: [Unit::Centimeters; SrfAddr::COUNT],
        }
    }

    pub(super) fn record(&mut self, addr: SrfAddr, unit: Unit) {
        if addr.is_broadcast() {
            self.units = [unit; SrfAddr::COUNT];
        } else {
            self.units[Self::slot(addr)] = unit;
        }
    }

    pub(super) fn unit_for(&self, addr: SrfAddr) -> Unit {
        debug_assert!(!addr.is_broadcast());
        self.units[Self::slot(addr)]
    }

    /// A renumbered sensor keeps its unit memory; the vacated address goes
    /// back to the default.
    pub(super) fn reassign(&mut self, from: SrfAddr, to: SrfAddr) {
        let unit = self.units[Self::slot(from)];
        self.units[Self::slot(from)] = Unit::Centimeters;
        self.units[Self::slot(to)] = unit;
    }

    const fn slot(addr: SrfAddr) -> usize {
        (addr.get() - 1) as usize
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn addr(value: u8) -> SrfAddr {
        SrfAddr::new_with_broadcast::<()>(value).unwrap()
    }

    #[test]
    fn test_defaults_to_centimeters() {
        let tracker = UnitTracker::new();
        for value in SrfAddr::FIRST..=SrfAddr::LAST {
            assert_eq!(tracker.unit_for(addr(value)), Unit::Centimeters);
        }
    }

    #[test]
    fn test_record_unicast_touches_one_slot() {
        let mut tracker = UnitTracker::new();
        tracker.record(addr(7), Unit::Inches);
        assert_eq!(tracker.unit_for(addr(7)), Unit::Inches);
        assert_eq!(tracker.unit_for(addr(6)), Unit::Centimeters);
        assert_eq!(tracker.unit_for(addr(8)), Unit::Centimeters);
    }

    #[test]
    fn test_record_broadcast_touches_every_slot() {
        let mut tracker = UnitTracker::new();
        tracker.record(SrfAddr::BROADCAST, Unit::Inches);
        for value in SrfAddr::FIRST..=SrfAddr::LAST {
            assert_eq!(tracker.unit_for(addr(value)), Unit::Inches);
        }
    }

    #[test]
    fn test_reassign_moves_unit_and_resets_origin() {
        let mut tracker = UnitTracker::new();
        tracker.record(addr(1), Unit::Inches);
        tracker.reassign(addr(1), addr(5));
        assert_eq!(tracker.unit_for(addr(5)), Unit::Inches);
        assert_eq!(tracker.unit_for(addr(1)), Unit::Centimeters);
    }
}

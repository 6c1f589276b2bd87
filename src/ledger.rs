use serde::{Deserialize, Serialize};
use uom::ConstZero;
use uom::si::f64::Volume;

/// Aggregate usage statistics shared by any number of tanks.
///
/// Every tank operation takes a `&mut UsageLedger`, so the set of tanks
/// contributing to a ledger is exactly the set of tanks the caller routes
/// through it. Independent sites (or independent tests) use independent
/// ledgers.
///
/// The historical totals (`introduced_volume`, `drained_volume`) and the
/// observation tallies only ever grow. `current_volume` is the net of all
/// fills minus all drains; dropping a tank that still holds liquid does
/// not adjust it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLedger {
    current_volume: Volume,
    introduced_volume: Volume,
    drained_volume: Volume,
    full_observations: u64,
    empty_observations: u64,
}

impl Default for UsageLedger {
    fn default() -> Self {
        Self {
            current_volume: Volume::ZERO,
            introduced_volume: Volume::ZERO,
            drained_volume: Volume::ZERO,
            full_observations: 0,
            empty_observations: 0,
        }
    }
}

impl UsageLedger {
    /// Creates a ledger with every total at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Net volume currently held across all tanks using this ledger.
    #[must_use]
    pub fn current_volume(&self) -> Volume {
        self.current_volume
    }

    /// Total volume ever introduced into tanks using this ledger.
    #[must_use]
    pub fn introduced_volume(&self) -> Volume {
        self.introduced_volume
    }

    /// Total volume ever drained out of tanks using this ledger.
    #[must_use]
    pub fn drained_volume(&self) -> Volume {
        self.drained_volume
    }

    /// How many times a tank reported itself completely full.
    ///
    /// This is a per-observation tally: every true-returning
    /// [`Tank::is_full`](crate::Tank::is_full) call adds one, so polling a
    /// full tank repeatedly keeps growing it.
    #[must_use]
    pub fn full_observations(&self) -> u64 {
        self.full_observations
    }

    /// How many times a tank reported itself completely empty.
    ///
    /// Per-observation, like [`full_observations`](Self::full_observations).
    #[must_use]
    pub fn empty_observations(&self) -> u64 {
        self.empty_observations
    }

    /// Records a fill.
    ///
    /// `held` is what actually entered the tank and `introduced` is what
    /// counts toward the historical total. They differ only on overflow,
    /// where `held` is the headroom that was left and `introduced` is the
    /// accepted portion of the requested amount after spill rounding.
    pub(crate) fn record_intake(&mut self, held: Volume, introduced: Volume) {
        self.current_volume += held;
        self.introduced_volume += introduced;
    }

    /// Records a drain of `drained` liters out of some tank.
    pub(crate) fn record_outflow(&mut self, drained: Volume) {
        self.current_volume -= drained;
        self.drained_volume += drained;
    }

    pub(crate) fn note_full(&mut self) {
        self.full_observations += 1;
    }

    pub(crate) fn note_empty(&mut self) {
        self.empty_observations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::volume::liter;

    fn liters(value: f64) -> Volume {
        Volume::new::<liter>(value)
    }

    #[test]
    fn new_ledger_is_zeroed() {
        let ledger = UsageLedger::new();

        assert_eq!(ledger.current_volume(), Volume::ZERO);
        assert_eq!(ledger.introduced_volume(), Volume::ZERO);
        assert_eq!(ledger.drained_volume(), Volume::ZERO);
        assert_eq!(ledger.full_observations(), 0);
        assert_eq!(ledger.empty_observations(), 0);
    }

    #[test]
    fn intake_and_outflow_net_out() {
        let mut ledger = UsageLedger::new();

        ledger.record_intake(liters(30.0), liters(30.0));
        ledger.record_outflow(liters(10.0));

        // The net volume is a subtraction in the base unit, so compare
        // approximately; the historical columns are stored as given.
        assert_relative_eq!(
            ledger.current_volume().get::<liter>(),
            20.0,
            epsilon = 1e-9
        );
        assert_eq!(ledger.introduced_volume(), liters(30.0));
        assert_eq!(ledger.drained_volume(), liters(10.0));
    }

    #[test]
    fn intake_tracks_held_and_introduced_separately() {
        let mut ledger = UsageLedger::new();

        // On overflow the held and introduced amounts differ by the spill
        // rounding; the two columns must not be conflated.
        ledger.record_intake(liters(20.0), liters(19.99));

        assert_eq!(ledger.current_volume(), liters(20.0));
        assert_eq!(ledger.introduced_volume(), liters(19.99));
    }

    #[test]
    fn observation_tallies_only_grow() {
        let mut ledger = UsageLedger::new();

        ledger.note_full();
        ledger.note_empty();
        ledger.note_empty();

        assert_eq!(ledger.full_observations(), 1);
        assert_eq!(ledger.empty_observations(), 2);
    }
}

use std::f64::consts::PI;
use std::fmt;
use std::ops::RangeInclusive;

use jiff::civil;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uom::ConstZero;
use uom::si::f64::{Length, Time, Volume, VolumeRate};
use uom::si::length::meter;
use uom::si::ratio::ratio;
use uom::si::time::second;
use uom::si::volume::liter;
use uom::si::volume_rate::liter_per_second;

use crate::error::{GeometryError, TankError};
use crate::ledger::UsageLedger;

/// Allowed tank height, in meters.
pub const HEIGHT_RANGE: RangeInclusive<f64> = 0.20..=20.0;

/// Allowed base radius, in meters.
pub const RADIUS_RANGE: RangeInclusive<f64> = 0.20..=10.0;

/// Allowed outlet flow rate, in liters per second.
pub const OUTFLOW_RANGE: RangeInclusive<f64> = 0.001..=1.0;

/// Minimum height-to-radius ratio; squatter tanks are rejected.
pub const MIN_HEIGHT_TO_RADIUS: f64 = 0.5;

/// Geometry and outlet characteristics of a tank.
///
/// The default configuration is a 1 m tall tank with a 0.5 m base radius
/// draining at 0.100 L/s. Struct update syntax covers the case where only
/// part of the geometry matters:
///
/// ```
/// use cistern::{Tank, TankConfig};
/// use uom::si::f64::Length;
/// use uom::si::length::meter;
///
/// let tank = Tank::new(TankConfig {
///     height: Length::new::<meter>(2.0),
///     radius: Length::new::<meter>(1.0),
///     ..TankConfig::default()
/// })
/// .unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankConfig {
    pub height: Length,
    pub radius: Length,
    pub outflow_rate: VolumeRate,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            height: Length::new::<meter>(1.0),
            radius: Length::new::<meter>(0.5),
            outflow_rate: VolumeRate::new::<liter_per_second>(0.100),
        }
    }
}

/// A cylindrical liquid tank with fixed geometry and a fixed-rate outlet.
///
/// Geometry and outlet rate are validated once at construction and never
/// change; the liquid level moves through [`fill`](Self::fill) and the
/// drain operations, and always stays within `[0, capacity]`. Operations
/// that move liquid or observe fullness also update the [`UsageLedger`]
/// they are given, which is how totals across several tanks are kept.
///
/// ```
/// use cistern::{Tank, TankConfig, UsageLedger};
/// use uom::si::f64::Volume;
/// use uom::si::volume::liter;
///
/// let mut ledger = UsageLedger::new();
/// let mut tank = Tank::new(TankConfig::default()).unwrap();
///
/// tank.fill(Volume::new::<liter>(50.0), &mut ledger).unwrap();
/// assert_eq!(tank.level(), Volume::new::<liter>(50.0));
/// assert_eq!(ledger.current_volume(), Volume::new::<liter>(50.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    height: Length,
    radius: Length,
    outflow_rate: VolumeRate,
    level: Volume,
    stored_total: Volume,
    drained_total: Volume,
}

impl Tank {
    /// Creates an empty tank from the given configuration.
    ///
    /// Bounds are checked in order: height, radius, height-to-radius
    /// ratio, outflow rate. The first violation wins.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::InvalidGeometry`] if any parameter is outside
    /// its allowed range; no tank exists in that case.
    pub fn new(config: TankConfig) -> Result<Self, TankError> {
        let TankConfig {
            height,
            radius,
            outflow_rate,
        } = config;

        let meters = height.get::<meter>();
        if !HEIGHT_RANGE.contains(&meters) {
            return Err(GeometryError::Height { meters }.into());
        }

        let meters = radius.get::<meter>();
        if !RADIUS_RANGE.contains(&meters) {
            return Err(GeometryError::Radius { meters }.into());
        }

        let height_to_radius = (height / radius).get::<ratio>();
        if height_to_radius < MIN_HEIGHT_TO_RADIUS {
            return Err(GeometryError::Proportions {
                ratio: height_to_radius,
            }
            .into());
        }

        let liters_per_second = outflow_rate.get::<liter_per_second>();
        if !OUTFLOW_RANGE.contains(&liters_per_second) {
            return Err(GeometryError::OutflowRate { liters_per_second }.into());
        }

        debug!(
            "new tank: height {:.2} m, radius {:.2} m, outflow {:.3} L/s",
            height.get::<meter>(),
            radius.get::<meter>(),
            liters_per_second,
        );

        Ok(Self {
            height,
            radius,
            outflow_rate,
            level: Volume::ZERO,
            stored_total: Volume::ZERO,
            drained_total: Volume::ZERO,
        })
    }

    #[must_use]
    pub fn height(&self) -> Length {
        self.height
    }

    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }

    #[must_use]
    pub fn outflow_rate(&self) -> VolumeRate {
        self.outflow_rate
    }

    /// Liters presently held.
    #[must_use]
    pub fn level(&self) -> Volume {
        self.level
    }

    /// Total volume ever accepted by this tank.
    #[must_use]
    pub fn stored_total(&self) -> Volume {
        self.stored_total
    }

    /// Total volume ever drained out of this tank.
    #[must_use]
    pub fn drained_total(&self) -> Volume {
        self.drained_total
    }

    /// Maximum volume the tank can hold: `π · r² · h`.
    #[must_use]
    pub fn capacity(&self) -> Volume {
        PI * self.radius * self.radius * self.height
    }

    /// Whether the tank is completely empty.
    ///
    /// Every true answer is tallied in the ledger's empty-observation
    /// count, so polling an empty tank keeps growing the tally.
    pub fn is_empty(&self, ledger: &mut UsageLedger) -> bool {
        let empty = self.level == Volume::ZERO;
        if empty {
            ledger.note_empty();
        }
        empty
    }

    /// Whether the tank is filled exactly to capacity.
    ///
    /// Every true answer is tallied in the ledger's full-observation
    /// count, same as [`is_empty`](Self::is_empty).
    pub fn is_full(&self, ledger: &mut UsageLedger) -> bool {
        let full = self.level == self.capacity();
        if full {
            ledger.note_full();
        }
        full
    }

    /// Adds `amount` to the tank.
    ///
    /// If the amount fits, the level and the stored totals all grow by
    /// `amount`. If it does not, the tank is topped up to capacity, the
    /// accepted portion (after rounding the spill to whole centiliters)
    /// is recorded in the stored totals, and the call fails.
    ///
    /// # Errors
    ///
    /// - [`TankError::InvalidAmount`] if `amount` is negative; nothing
    ///   changes.
    /// - [`TankError::Overflow`] if `amount` exceeds the remaining
    ///   headroom. The accepted portion is durably applied before the
    ///   error returns.
    pub fn fill(&mut self, amount: Volume, ledger: &mut UsageLedger) -> Result<(), TankError> {
        if amount < Volume::ZERO {
            return Err(TankError::InvalidAmount { amount });
        }

        let capacity = self.capacity();
        if self.level + amount > capacity {
            let spilled = round_to_centiliter(self.level + amount - capacity);
            let accepted = amount - spilled;
            let headroom = capacity - self.level;

            self.level = capacity;
            self.stored_total += accepted;
            ledger.record_intake(headroom, accepted);

            warn!(
                "tank overflow: spilled {:.2} L, accepted {:.2} L",
                spilled.get::<liter>(),
                accepted.get::<liter>(),
            );
            return Err(TankError::Overflow { spilled, accepted });
        }

        self.level += amount;
        self.stored_total += amount;
        ledger.record_intake(amount, amount);
        Ok(())
    }

    /// Opens the outlet for `duration` and returns the volume drained.
    ///
    /// The drained volume is `outflow_rate · duration`, capped at the
    /// current level; the level never goes below zero. Draining an empty
    /// tank succeeds and returns zero.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::InvalidDuration`] if `duration` is negative.
    pub fn drain_for(
        &mut self,
        duration: Time,
        ledger: &mut UsageLedger,
    ) -> Result<Volume, TankError> {
        if duration < Time::ZERO {
            return Err(TankError::InvalidDuration { duration });
        }

        let drained = (self.outflow_rate * duration).min(self.level);
        self.level -= drained;
        self.drained_total += drained;
        ledger.record_outflow(drained);
        Ok(drained)
    }

    /// Opens the outlet between two times of day and returns the volume
    /// drained.
    ///
    /// Equivalent to [`drain_for`](Self::drain_for) with the elapsed
    /// whole seconds between `start` and `end`; a subsecond remainder is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::InvalidInterval`] if `start` is after `end`.
    pub fn drain_between(
        &mut self,
        start: civil::Time,
        end: civil::Time,
        ledger: &mut UsageLedger,
    ) -> Result<Volume, TankError> {
        if start > end {
            return Err(TankError::InvalidInterval { start, end });
        }

        let whole_seconds = start.duration_until(end).as_secs();
        let elapsed = Time::new::<second>(whole_seconds as f64);
        self.drain_for(elapsed, ledger)
    }

    /// Drains the tank to empty and returns the time the outlet needs to
    /// be open for that.
    ///
    /// The whole current level moves into the drained totals. Division by
    /// zero is impossible: the outflow rate is at least 0.001 L/s.
    pub fn drain_completely(&mut self, ledger: &mut UsageLedger) -> Time {
        let time_to_empty = self.level / self.outflow_rate;

        self.drained_total += self.level;
        ledger.record_outflow(self.level);
        self.level = Volume::ZERO;

        time_to_empty
    }
}

/// A one-line snapshot: capacity, current level and both per-instance
/// totals, each in liters with two decimal places.
impl fmt::Display for Tank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Capacidad: {:5.2} litros - NivelActual: {:5.2} litros - AlmacenadoTotal: {:5.2} litros VertidoTotal: {:5.2} litros",
            self.capacity().get::<liter>(),
            self.level.get::<liter>(),
            self.stored_total.get::<liter>(),
            self.drained_total.get::<liter>(),
        )
    }
}

/// Spill amounts are reported rounded to whole centiliters.
fn round_to_centiliter(volume: Volume) -> Volume {
    Volume::new::<liter>((volume.get::<liter>() * 100.0).round() / 100.0)
}

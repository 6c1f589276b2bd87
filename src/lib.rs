//! An in-memory model of cylindrical liquid storage tanks.
//!
//! A [`Tank`] has fixed, validated geometry and a fixed-rate outlet. It is
//! filled with a volume and drained over time; its level always stays
//! within `[0, capacity]`. Every operation that moves liquid or observes
//! fullness also updates a [`UsageLedger`], the aggregate-statistics value
//! shared by however many tanks the caller routes through it.
//!
//! Quantities are `uom` types throughout: heights and radii are lengths,
//! liquid amounts are volumes, the outlet rate is a volume rate. Capacity
//! is plain dimensional arithmetic (`π·r²·h`), read in whatever unit the
//! caller asks for.
//!
//! ```
//! use cistern::{Tank, TankConfig, UsageLedger};
//! use uom::si::f64::{Time, Volume};
//! use uom::si::time::second;
//! use uom::si::volume::liter;
//!
//! let mut ledger = UsageLedger::new();
//! let mut tank = Tank::new(TankConfig::default())?;
//!
//! tank.fill(Volume::new::<liter>(100.0), &mut ledger)?;
//! let drained = tank.drain_for(Time::new::<second>(60.0), &mut ledger)?;
//!
//! assert_eq!(drained, Volume::new::<liter>(6.0));
//! assert_eq!(ledger.current_volume(), tank.level());
//! # Ok::<(), cistern::TankError>(())
//! ```

mod error;
mod ledger;
mod tank;

pub use error::{GeometryError, TankError};
pub use ledger::UsageLedger;
pub use tank::{
    HEIGHT_RANGE, MIN_HEIGHT_TO_RADIUS, OUTFLOW_RANGE, RADIUS_RANGE, Tank, TankConfig,
};

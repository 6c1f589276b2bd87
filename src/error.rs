use jiff::civil;
use thiserror::Error;
use uom::si::f64::{Time, Volume};
use uom::si::time::second;
use uom::si::volume::liter;

/// A construction parameter that does not describe a buildable tank.
///
/// Each variant carries the offending value in the unit the bound is
/// expressed in. The allowed bounds are published as constants on the
/// crate root ([`HEIGHT_RANGE`](crate::HEIGHT_RANGE) and friends).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("height {meters} m is outside [0.2 m, 20 m]")]
    Height { meters: f64 },

    #[error("radius {meters} m is outside [0.2 m, 10 m]")]
    Radius { meters: f64 },

    #[error("height/radius ratio {ratio} is below the minimum of 0.5")]
    Proportions { ratio: f64 },

    #[error("outflow rate {liters_per_second} L/s is outside [0.001 L/s, 1 L/s]")]
    OutflowRate { liters_per_second: f64 },
}

/// Any failure a tank operation can report.
///
/// All failures are synchronous and local to the call that produced them.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TankError {
    /// Construction was attempted with out-of-bounds parameters.
    ///
    /// No tank exists after this error.
    #[error("invalid tank geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    /// A fill exceeded the remaining capacity.
    ///
    /// The accepted portion is already applied when this error returns:
    /// the tank sits at capacity and the stored totals include `accepted`.
    /// Only `spilled` was rejected.
    #[error("tank full: overflowed by {:.2} liters", .spilled.get::<liter>())]
    Overflow { spilled: Volume, accepted: Volume },

    /// A negative fill amount.
    #[error("cannot fill a negative amount ({:.2} liters)", .amount.get::<liter>())]
    InvalidAmount { amount: Volume },

    /// A negative drain duration.
    #[error("cannot drain for a negative duration ({:.2} s)", .duration.get::<second>())]
    InvalidDuration { duration: Time },

    /// A drain interval whose start lies after its end.
    #[error("drain interval starts at {start} but ends earlier at {end}")]
    InvalidInterval { start: civil::Time, end: civil::Time },
}

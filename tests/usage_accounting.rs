//! End-to-end accounting across several tanks sharing one ledger.

use approx::assert_relative_eq;
use cistern::{Tank, TankConfig, UsageLedger};
use uom::ConstZero;
use uom::si::f64::{Length, Time, Volume, VolumeRate};
use uom::si::length::meter;
use uom::si::time::second;
use uom::si::volume::liter;
use uom::si::volume_rate::liter_per_second;

fn liters(value: f64) -> Volume {
    Volume::new::<liter>(value)
}

fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}

fn small_tank() -> Tank {
    Tank::new(TankConfig {
        height: Length::new::<meter>(0.5),
        radius: Length::new::<meter>(0.25),
        outflow_rate: VolumeRate::new::<liter_per_second>(0.5),
    })
    .unwrap()
}

#[test]
fn ledger_tracks_the_net_effect_of_every_tank() {
    let mut ledger = UsageLedger::new();
    let mut cellar = Tank::new(TankConfig::default()).unwrap();
    let mut garden = small_tank();

    cellar.fill(liters(200.0), &mut ledger).unwrap();
    garden.fill(liters(60.0), &mut ledger).unwrap();
    cellar.drain_for(seconds(300.0), &mut ledger).unwrap(); // 30 L
    garden.drain_completely(&mut ledger); // 60 L

    let net = cellar.level() + garden.level();
    assert_relative_eq!(
        ledger.current_volume().get::<liter>(),
        net.get::<liter>(),
        epsilon = 1e-9
    );
    assert_relative_eq!(
        ledger.introduced_volume().get::<liter>(),
        260.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        ledger.drained_volume().get::<liter>(),
        90.0,
        epsilon = 1e-9
    );
}

#[test]
fn historical_totals_never_decrease() {
    let mut ledger = UsageLedger::new();
    let mut tank = small_tank();

    let mut last_introduced = ledger.introduced_volume();
    let mut last_drained = ledger.drained_volume();

    // A mixed sequence, including a failing overflow and a capped drain.
    let _ = tank.fill(liters(50.0), &mut ledger);
    let _ = tank.fill(liters(9000.0), &mut ledger);
    let _ = tank.drain_for(seconds(10.0), &mut ledger);
    let _ = tank.drain_for(seconds(100_000.0), &mut ledger);
    let _ = tank.fill(liters(1.0), &mut ledger);
    tank.drain_completely(&mut ledger);

    for _ in 0..2 {
        assert!(ledger.introduced_volume() >= last_introduced);
        assert!(ledger.drained_volume() >= last_drained);
        last_introduced = ledger.introduced_volume();
        last_drained = ledger.drained_volume();

        let _ = tank.fill(liters(3.0), &mut ledger);
        let _ = tank.drain_for(seconds(1.0), &mut ledger);
    }

    assert!(ledger.introduced_volume() >= last_introduced);
    assert!(ledger.drained_volume() >= last_drained);
}

#[test]
fn overflow_accounting_spans_tanks_correctly() {
    let mut ledger = UsageLedger::new();
    let mut brimming = small_tank();
    let mut spare = small_tank();

    // π · 0.25² · 0.5 m³ ≈ 98.17 L.
    let capacity = brimming.capacity();

    brimming.fill(liters(90.0), &mut ledger).unwrap();
    let err = brimming.fill(liters(20.0), &mut ledger).unwrap_err();
    spare.fill(liters(10.0), &mut ledger).unwrap();

    assert!(matches!(err, cistern::TankError::Overflow { .. }));
    assert_eq!(brimming.level(), capacity);
    assert_relative_eq!(
        ledger.current_volume().get::<liter>(),
        capacity.get::<liter>() + 10.0,
        epsilon = 1e-9
    );
}

#[test]
fn separate_ledgers_are_fully_isolated() {
    let mut site_a = UsageLedger::new();
    let mut site_b = UsageLedger::new();
    let mut tank_a = small_tank();
    let tank_b = small_tank();

    tank_a.fill(liters(25.0), &mut site_a).unwrap();
    assert!(tank_b.is_empty(&mut site_b));

    assert_relative_eq!(site_a.current_volume().get::<liter>(), 25.0, epsilon = 1e-9);
    assert_eq!(site_b.current_volume(), Volume::ZERO);
    assert_eq!(site_a.empty_observations(), 0);
    assert_eq!(site_b.empty_observations(), 1);
}

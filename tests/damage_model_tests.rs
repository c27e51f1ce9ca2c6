use proptest::prelude::*;
use smitebuilds::combat::damage::{
    capped_attack_speed, damage_breakdown, effective_protections, mitigation_factor, ATTACK_SPEED_CAP,
    PERCENT_PEN_CAP,
};
use smitebuilds::combat::{compute_dps, StatAggregate};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

fn worked_example() -> StatAggregate {
    StatAggregate {
        basic_attack: 50.0,
        physical_power: 100.0,
        attack_speed: 1.5,
        crit_chance: 0.25,
        ..StatAggregate::default()
    }
}

#[test]
fn worked_example_matches_hand_computation() {
    let dps = compute_dps(&worked_example(), 2.0, 100.0);
    approx_eq(dps, 133.59375, 1e-9);
}

#[test]
fn breakdown_splits_auto_and_ability_damage() {
    let mut stats = worked_example();
    stats.ability_damage = 200.0;
    let breakdown = damage_breakdown(&stats, 2.0, 100.0);
    approx_eq(breakdown.auto_attack_damage, 267.1875, 1e-9);
    approx_eq(breakdown.ability_damage, 100.0, 1e-9);
    approx_eq(breakdown.dps, (267.1875 + 100.0) / 2.0, 1e-9);
}

#[test]
fn unarmored_target_takes_full_damage() {
    assert_eq!(mitigation_factor(0.0), 1.0);
    assert_eq!(mitigation_factor(-25.0), 1.0);
    approx_eq(mitigation_factor(100.0), 0.5, 1e-12);
}

#[test]
fn empty_aggregate_deals_no_damage() {
    assert_eq!(compute_dps(&StatAggregate::default(), 2.0, 100.0), 0.0);
}

#[test]
fn attack_speed_above_the_cap_adds_nothing() {
    let mut capped = worked_example();
    capped.attack_speed = ATTACK_SPEED_CAP;
    let mut over = worked_example();
    over.attack_speed = ATTACK_SPEED_CAP + 1.0;
    assert_eq!(compute_dps(&capped, 2.0, 100.0), compute_dps(&over, 2.0, 100.0));
}

#[test]
fn spectral_armor_lowers_crit_value() {
    let plain = worked_example();
    let mut armored = worked_example();
    armored.crit_multiplier = -0.3;
    assert!(compute_dps(&armored, 2.0, 100.0) < compute_dps(&plain, 2.0, 100.0));
}

proptest! {
    #[test]
    fn attack_speed_cap_is_a_ceiling(speed in 0.0f64..10.0) {
        let capped = capped_attack_speed(speed);
        prop_assert!(capped <= ATTACK_SPEED_CAP);
        if speed <= ATTACK_SPEED_CAP {
            prop_assert_eq!(capped, speed);
        }
    }

    #[test]
    fn mitigation_stays_in_unit_interval(protections in 0.0f64..5000.0) {
        let factor = mitigation_factor(protections);
        prop_assert!(factor > 0.0 && factor <= 1.0);
    }

    #[test]
    fn mitigation_strictly_decreases_with_protections(
        protections in 0.0f64..5000.0,
        delta in 0.001f64..1000.0,
    ) {
        prop_assert!(mitigation_factor(protections + delta) < mitigation_factor(protections));
    }

    #[test]
    fn shared_percent_pen_is_capped(
        prots in 0.0f64..500.0,
        pen in 0.0f64..2.0,
        flat in 0.0f64..50.0,
    ) {
        let effective = effective_protections(prots, pen, 0.0, flat);
        let at_cap = effective_protections(prots, PERCENT_PEN_CAP, 0.0, flat);
        prop_assert!(effective >= at_cap - 1e-9);
        prop_assert!(effective >= 0.0);
    }

    #[test]
    fn more_power_never_lowers_dps(power in 0.0f64..400.0, extra in 0.0f64..100.0) {
        let mut base = worked_example();
        base.physical_power = power;
        let mut stronger = base;
        stronger.physical_power = power + extra;
        prop_assert!(compute_dps(&stronger, 4.0, 300.0) >= compute_dps(&base, 4.0, 300.0) - 1e-9);
    }
}

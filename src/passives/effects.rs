//! Item passive effects. Each function mutates the running build aggregate
//! once; the registry decides the order they run in.

use crate::combat::damage::ATTACK_SPEED_CAP;
use crate::combat::{Character, Scenario, StatAggregate};
use crate::passives::curves::{average_stacks, crit_uptime};

// Starters

pub fn gilded_arrow(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.aa_bonus_damage += 10.0;
}

pub fn ornate_arrow(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.basic_attack_multiplier += 0.15;
}

pub fn hunters_cowl(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.attack_speed += 0.10;
}

/// +5% physical power, rounded to a whole point. Runs after every flat and
/// converted power source.
pub fn leaders_cowl(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.physical_power = (stats.physical_power * 1.05).round();
}

pub fn manikin_scepter(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.aa_bonus_damage += 10.0;
}

pub fn manikin_mace(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.aa_bonus_damage += 20.0;
}

pub fn bluestone_pendant(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.ability_damage += 30.0 * f64::from(scenario.approx_abilities);
}

/// Procs once per fight (10s cooldown).
pub fn bluestone_brooch(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.ability_damage += 75.0 + 0.05 * scenario.enemy_health;
}

// Normal items, additive

/// Percent of the target's max health dealt per basic attack: 3% up to
/// 2000 health, scaling linearly to 5% at 2750.
pub fn qins_sais_health_percent(enemy_health: f64) -> f64 {
    if enemy_health <= 2000.0 {
        0.03
    } else {
        (0.03 + 0.02 * (enemy_health - 2000.0) / 750.0).min(0.05)
    }
}

pub fn qins_sais(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.aa_bonus_damage += qins_sais_health_percent(scenario.enemy_health) * scenario.enemy_health;
}

/// 7% protection shred per stack, 4 stacks.
pub fn the_executioner(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.aa_percent_pen += 0.07 * average_stacks(scenario.approx_basic_attacks, 4);
}

pub fn titans_bane(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.ability_percent_pen += 0.20;
}

pub fn dominance(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.aa_percent_pen += 0.15;
}

/// 3 flat pen per stack, 5 stacks.
pub fn serrated_edge(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.flat_pen += (3.0 * average_stacks(scenario.approx_basic_attacks, 5)).round();
}

/// 10 power per stack, 3 stacks.
pub fn ichaival(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.physical_power += (10.0 * average_stacks(scenario.approx_basic_attacks, 3)).round();
}

/// Assumed fully stacked.
pub fn devourers_gauntlet(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.physical_power += 20.0;
}

const RAGE_MAX_STACKS: u32 = 5;

fn rage_stacks(scenario: &Scenario) -> f64 {
    if scenario.target.is_squishy() {
        f64::from(RAGE_MAX_STACKS)
    } else {
        average_stacks(scenario.approx_basic_attacks, RAGE_MAX_STACKS)
    }
}

/// Squishy fights hand out kills, so stacks are full there; against tanks
/// they build up hit by hit.
pub fn rage(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.crit_chance += 0.02 * rage_stacks(scenario);
}

pub fn evolved_rage(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.crit_chance += 0.04 * rage_stacks(scenario);
}

pub fn deathbringer(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.crit_multiplier += 0.25;
}

pub fn malice(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.crit_multiplier += 0.30;
}

pub fn failnot(_: &Scenario, character: &Character, stats: &mut StatAggregate) {
    if character.failnot_beneficial {
        stats.crit_chance += 0.20;
    }
}

/// +20% attack speed for 3s after each ability, as a share of the fight.
pub fn atalantas_bow(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    let uptime = (3.0 * f64::from(scenario.approx_abilities) / scenario.fight_length).min(1.0);
    stats.attack_speed += 0.20 * uptime;
}

/// The basic attack after each ability deals 40% more damage.
pub fn hydras_lament(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    let autos = scenario.approx_basic_attacks;
    if autos == 0 {
        return;
    }
    let empowered = scenario.approx_abilities.min(autos);
    stats.basic_attack_multiplier += 0.40 * f64::from(empowered) / f64::from(autos);
}

// Stat conversions

/// 1 power per 2% attack speed above the cap.
pub fn silverbranch_bow(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    let excess = (stats.attack_speed - ATTACK_SPEED_CAP).max(0.0);
    // Nudge before flooring so 2.6 - 2.5 counts as a full 10%.
    stats.physical_power += (excess * 100.0 / 2.0 + 1e-9).floor();
}

pub fn transcendence(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.physical_power += (0.03 * stats.mana).round();
}

pub fn evolved_transcendence(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    stats.physical_power += (0.05 * stats.mana).round();
}

pub fn hastened_katana(_: &Scenario, _: &Character, stats: &mut StatAggregate) {
    if stats.attack_speed >= 2.0 {
        stats.basic_attack_multiplier += 0.15;
    }
}

// Power to damage

/// Every 4th basic attack chains for 15 + 40% power.
pub fn odysseus_bow(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    let procs = scenario.approx_basic_attacks / 4;
    stats.ability_damage += f64::from(procs) * (15.0 + 0.40 * stats.physical_power);
}

/// Percent max health per ability: 3%, plus 1% per 100 power above 200, up to 6%.
pub fn heartseeker_health_percent(physical_power: f64) -> f64 {
    (0.03 + 0.01 * (physical_power - 200.0).max(0.0) / 100.0).min(0.06)
}

pub fn heartseeker(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    let per_cast = heartseeker_health_percent(stats.physical_power) * scenario.enemy_health;
    stats.ability_damage += f64::from(scenario.approx_abilities) * per_cast;
}

pub fn the_crusher(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    let per_cast = 20.0 + 0.15 * stats.physical_power;
    stats.ability_damage += f64::from(scenario.approx_abilities) * per_cast;
}

// Crit uptime

/// Crits grant 10% pen and 10% attack speed; the bonus is weighted by the
/// share of autos that follow a crit.
pub fn wind_demon(scenario: &Scenario, _: &Character, stats: &mut StatAggregate) {
    let uptime = crit_uptime(scenario.approx_basic_attacks, stats.crit_chance);
    stats.percent_pen += 0.10 * uptime;
    stats.attack_speed += 0.10 * uptime;
}

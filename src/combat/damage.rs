//! Damage model: converts an aggregated build into sustained DPS against a
//! protected target.
//!
//! Attack speed is capped as a ceiling. An earlier revision of this formula
//! used the cap as a floor (`max(attack_speed, cap)`), which inflated every
//! build to 2.5 hits/s; the ceiling is the authoritative behaviour.

use serde::{Deserialize, Serialize};

use crate::combat::stats::StatAggregate;

pub const ATTACK_SPEED_CAP: f64 = 2.5;
/// Fixed critical damage bonus before item multipliers.
pub const BASE_CRIT_MULTIPLIER: f64 = 0.75;
/// Cap on shared percent penetration. Source-specific pen is added uncapped.
pub const PERCENT_PEN_CAP: f64 = 0.4;
pub const CRIT_CHANCE_CAP: f64 = 1.0;

/// Post-mitigation damage totals over a fight, split by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub auto_attack_damage: f64,
    pub ability_damage: f64,
    pub dps: f64,
}

pub fn capped_attack_speed(attack_speed: f64) -> f64 {
    attack_speed.min(ATTACK_SPEED_CAP)
}

pub fn capped_percent_pen(percent_pen: f64) -> f64 {
    percent_pen.min(PERCENT_PEN_CAP)
}

pub fn capped_crit_chance(crit_chance: f64) -> f64 {
    crit_chance.min(CRIT_CHANCE_CAP)
}

/// Protections left after percent then flat penetration, never negative.
pub fn effective_protections(
    enemy_protections: f64,
    percent_pen: f64,
    source_percent_pen: f64,
    flat_pen: f64,
) -> f64 {
    let remaining = enemy_protections * (1.0 - capped_percent_pen(percent_pen) - source_percent_pen);
    (remaining - flat_pen).max(0.0)
}

/// Diminishing-returns mitigation: 100 / (100 + protections).
pub fn mitigation_factor(effective_protections: f64) -> f64 {
    100.0 / (100.0 + effective_protections.max(0.0))
}

/// Expected damage of one basic attack including crits, the basic attack
/// multiplier and flat on-hit damage.
pub fn expected_auto_damage(stats: &StatAggregate) -> f64 {
    let before_crit = stats.basic_attack + stats.physical_power;
    let crit_chance = capped_crit_chance(stats.crit_chance);
    let after_crit = before_crit * (1.0 - crit_chance)
        + before_crit * crit_chance * (1.0 + BASE_CRIT_MULTIPLIER + stats.crit_multiplier);
    after_crit * (1.0 + stats.basic_attack_multiplier) + stats.aa_bonus_damage
}

pub fn damage_breakdown(stats: &StatAggregate, fight_length: f64, enemy_protections: f64) -> DamageBreakdown {
    let raw_auto_damage =
        expected_auto_damage(stats) * capped_attack_speed(stats.attack_speed) * fight_length;
    let auto_mitigation = mitigation_factor(effective_protections(
        enemy_protections,
        stats.percent_pen,
        stats.aa_percent_pen,
        stats.flat_pen,
    ));
    let ability_mitigation = mitigation_factor(effective_protections(
        enemy_protections,
        stats.percent_pen,
        stats.ability_percent_pen,
        stats.flat_pen,
    ));

    let auto_attack_damage = raw_auto_damage * auto_mitigation;
    let ability_damage = stats.ability_damage * ability_mitigation;
    DamageBreakdown {
        auto_attack_damage,
        ability_damage,
        dps: (auto_attack_damage + ability_damage) / fight_length,
    }
}

pub fn compute_dps(stats: &StatAggregate, fight_length: f64, enemy_protections: f64) -> f64 {
    damage_breakdown(stats, fight_length, enemy_protections).dps
}

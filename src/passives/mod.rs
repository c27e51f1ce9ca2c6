//! Passive effect registry: item name → effect function plus phase.
//!
//! The table is built once and never mutated. Items whose passive has no
//! build-time DPS impact (sustain, actives, utility) are registered as
//! [PassiveEntry::NoEffect] so catalog drift checks still recognise them.

pub mod curves;
pub mod effects;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::combat::{Character, Scenario, StatAggregate};

/// Ordering key for passive application. Lower phases run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Phase(pub u32);

impl Phase {
    /// Plain additive bonuses.
    pub const BASE: Phase = Phase(1);
    /// Attack speed or mana converted into power, and attack speed thresholds.
    pub const STAT_CONVERSION: Phase = Phase(20);
    /// Percent multipliers on the final power total.
    pub const POWER_MULTIPLIER: Phase = Phase(30);
    /// Power converted into ability damage.
    pub const POWER_TO_DAMAGE: Phase = Phase(40);
    /// Bonuses whose uptime depends on the final crit chance.
    pub const CRIT_UPTIME: Phase = Phase(50);
}

impl Default for Phase {
    fn default() -> Self {
        Self::BASE
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type EffectFn = fn(&Scenario, &Character, &mut StatAggregate);

/// One item's build-time effect.
#[derive(Clone, Copy)]
pub struct PassiveEffect {
    pub item: &'static str,
    pub phase: Phase,
    apply: EffectFn,
}

impl PassiveEffect {
    pub const fn new(item: &'static str, phase: Phase, apply: EffectFn) -> Self {
        Self { item, phase, apply }
    }

    pub fn apply(&self, scenario: &Scenario, character: &Character, stats: &mut StatAggregate) {
        (self.apply)(scenario, character, stats);
    }
}

impl fmt::Debug for PassiveEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassiveEffect")
            .field("item", &self.item)
            .field("phase", &self.phase)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PassiveEntry {
    /// Passive text exists but has no modelled DPS impact.
    NoEffect,
    Effect(PassiveEffect),
}

impl PassiveEntry {
    pub fn effect(&self) -> Option<PassiveEffect> {
        match self {
            Self::NoEffect => None,
            Self::Effect(effect) => Some(*effect),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PassiveRegistry {
    entries: BTreeMap<&'static str, PassiveEntry>,
}

impl PassiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_effect(mut self, item: &'static str) -> Self {
        self.entries.insert(item, PassiveEntry::NoEffect);
        self
    }

    pub fn with_effect(mut self, item: &'static str, phase: Phase, apply: EffectFn) -> Self {
        self.entries
            .insert(item, PassiveEntry::Effect(PassiveEffect::new(item, phase, apply)));
        self
    }

    pub fn get(&self, item: &str) -> Option<&PassiveEntry> {
        self.entries.get(item)
    }

    pub fn effect_for(&self, item: &str) -> Option<PassiveEffect> {
        self.get(item).and_then(PassiveEntry::effect)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.entries.contains_key(item)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The physical item table used for hunter builds.
    pub fn standard() -> Self {
        use self::effects::*;

        Self::new()
            // no build-time impact
            .with_no_effect("Death's Toll")
            .with_no_effect("Death's Embrace")
            .with_no_effect("Asi")
            .with_no_effect("Bloodforge")
            .with_no_effect("Brawler's Beat Stick")
            .with_no_effect("Golden Blade")
            .with_no_effect("Jotunn's Wrath")
            .with_no_effect("Poisoned Star")
            .with_no_effect("Arondight")
            // starters
            .with_effect("Gilded Arrow", Phase::BASE, gilded_arrow)
            .with_effect("Ornate Arrow", Phase::BASE, ornate_arrow)
            .with_effect("Hunter's Cowl", Phase::BASE, hunters_cowl)
            .with_effect("Leader's Cowl", Phase::POWER_MULTIPLIER, leaders_cowl)
            .with_effect("Manikin Scepter", Phase::BASE, manikin_scepter)
            .with_effect("Manikin Mace", Phase::BASE, manikin_mace)
            .with_effect("Bluestone Pendant", Phase::BASE, bluestone_pendant)
            .with_effect("Bluestone Brooch", Phase::BASE, bluestone_brooch)
            // additive
            .with_effect("Qin's Sais", Phase::BASE, qins_sais)
            .with_effect("The Executioner", Phase::BASE, the_executioner)
            .with_effect("Titan's Bane", Phase::BASE, titans_bane)
            .with_effect("Dominance", Phase::BASE, dominance)
            .with_effect("Serrated Edge", Phase::BASE, serrated_edge)
            .with_effect("Ichaival", Phase::BASE, ichaival)
            .with_effect("Devourer's Gauntlet", Phase::BASE, devourers_gauntlet)
            .with_effect("Rage", Phase::BASE, rage)
            .with_effect("Evolved Rage", Phase::BASE, evolved_rage)
            .with_effect("Deathbringer", Phase::BASE, deathbringer)
            .with_effect("Malice", Phase::BASE, malice)
            .with_effect("Failnot", Phase::BASE, failnot)
            .with_effect("Atalanta's Bow", Phase::BASE, atalantas_bow)
            .with_effect("Hydra's Lament", Phase::BASE, hydras_lament)
            // conversions
            .with_effect("Silverbranch Bow", Phase::STAT_CONVERSION, silverbranch_bow)
            .with_effect("Transcendence", Phase::STAT_CONVERSION, transcendence)
            .with_effect("Evolved Transcendence", Phase::STAT_CONVERSION, evolved_transcendence)
            .with_effect("Hastened Katana", Phase::STAT_CONVERSION, hastened_katana)
            .with_effect("Odysseus' Bow", Phase::POWER_TO_DAMAGE, odysseus_bow)
            .with_effect("Heartseeker", Phase::POWER_TO_DAMAGE, heartseeker)
            .with_effect("The Crusher", Phase::POWER_TO_DAMAGE, the_crusher)
            .with_effect("Wind Demon", Phase::CRIT_UPTIME, wind_demon)
    }
}

/// Shared instance of [PassiveRegistry::standard].
pub fn registry() -> &'static PassiveRegistry {
    static REGISTRY: OnceLock<PassiveRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PassiveRegistry::standard)
}

/// The standard effect for `item`; `None` for unknown and no-effect items alike.
pub fn lookup(item: &str) -> Option<PassiveEffect> {
    registry().effect_for(item)
}

/// Applies each effect exactly once, ascending by phase. Effects sharing a
/// phase keep the order they were collected in.
pub fn apply_in_phase_order(
    effects: &mut [PassiveEffect],
    scenario: &Scenario,
    character: &Character,
    stats: &mut StatAggregate,
) {
    effects.sort_by_key(|effect| effect.phase);
    for effect in effects.iter() {
        effect.apply(scenario, character, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_effects_and_no_ops() {
        let registry = registry();
        assert!(registry.len() >= 25);
        assert!(matches!(registry.get("Death's Toll"), Some(PassiveEntry::NoEffect)));
        assert_eq!(
            registry.effect_for("Wind Demon").map(|effect| effect.phase),
            Some(Phase::CRIT_UPTIME)
        );
        assert!(registry.effect_for("Asi").is_none());
        assert!(registry.get("Rod of Tahuti").is_none());
        assert!(lookup("Rod of Tahuti").is_none());
        assert_eq!(lookup("Leader's Cowl").map(|effect| effect.phase), Some(Phase::POWER_MULTIPLIER));
    }

    #[test]
    fn every_registered_effect_keeps_its_item_name() {
        for name in registry().names() {
            if let Some(effect) = registry().effect_for(name) {
                assert_eq!(effect.item, name);
            }
        }
    }

    #[test]
    fn power_multiplier_runs_after_conversions_and_before_damage() {
        let registry = registry();
        let cowl = registry.effect_for("Leader's Cowl").map(|e| e.phase);
        let transcendence = registry.effect_for("Transcendence").map(|e| e.phase);
        let crusher = registry.effect_for("The Crusher").map(|e| e.phase);
        assert!(transcendence < cowl);
        assert!(cowl < crusher);
    }

    #[test]
    fn phase_order_is_independent_of_collection_order() {
        let registry = registry();
        let scenario = Scenario::squishy();
        let character = Character::chiron();
        let base = StatAggregate {
            physical_power: 100.0,
            mana: 1000.0,
            ..StatAggregate::default()
        };

        let mut forward: Vec<PassiveEffect> = ["The Crusher", "Leader's Cowl", "Transcendence"]
            .iter()
            .filter_map(|name| registry.effect_for(name))
            .collect();
        let mut backward: Vec<PassiveEffect> = forward.iter().rev().copied().collect();

        let mut a = base;
        apply_in_phase_order(&mut forward, &scenario, &character, &mut a);
        let mut b = base;
        apply_in_phase_order(&mut backward, &scenario, &character, &mut b);

        // 100 + 30 from mana, then 5% -> 137, then 20 + 0.15 * 137 per cast
        assert_eq!(a.physical_power, 137.0);
        assert!((a.ability_damage - 40.55).abs() < 1e-9);
        assert_eq!(a, b);
    }
}

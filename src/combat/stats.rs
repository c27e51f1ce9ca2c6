use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Every additive field of a [StatAggregate], addressable by name for row parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    BasicAttack,
    PhysicalPower,
    AttackSpeed,
    Mana,
    FlatPen,
    PercentPen,
    AaPercentPen,
    AbilityPercentPen,
    CritChance,
    CritMultiplier,
    AaBonusDamage,
    AbilityDamage,
    BasicAttackMultiplier,
    Price,
}

/// Cumulative offensive stats of one item or a whole build.
///
/// `Default` is the additive identity: every field is zero. Combining two
/// aggregates is field-wise addition, so items can be folded in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatAggregate {
    /// Base per-hit damage (the archetype's basic attack).
    pub basic_attack: f64,
    pub physical_power: f64,
    /// Hits per second before the cap.
    pub attack_speed: f64,
    pub mana: f64,
    pub flat_pen: f64,
    /// Percent protection ignored by both autos and abilities (capped at 40% in the damage model).
    pub percent_pen: f64,
    /// Extra percent pen for basic attacks only, uncapped.
    pub aa_percent_pen: f64,
    /// Extra percent pen for abilities only, uncapped.
    pub ability_percent_pen: f64,
    pub crit_chance: f64,
    /// Added on top of the fixed base critical bonus. Negative values model crit reduction.
    pub crit_multiplier: f64,
    /// Flat damage added to each basic attack after crit.
    pub aa_bonus_damage: f64,
    /// Flat ability damage accumulated over the whole fight.
    pub ability_damage: f64,
    pub basic_attack_multiplier: f64,
    /// Total gold price.
    pub price: f64,
}

impl StatAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::BasicAttack => self.basic_attack,
            StatKind::PhysicalPower => self.physical_power,
            StatKind::AttackSpeed => self.attack_speed,
            StatKind::Mana => self.mana,
            StatKind::FlatPen => self.flat_pen,
            StatKind::PercentPen => self.percent_pen,
            StatKind::AaPercentPen => self.aa_percent_pen,
            StatKind::AbilityPercentPen => self.ability_percent_pen,
            StatKind::CritChance => self.crit_chance,
            StatKind::CritMultiplier => self.crit_multiplier,
            StatKind::AaBonusDamage => self.aa_bonus_damage,
            StatKind::AbilityDamage => self.ability_damage,
            StatKind::BasicAttackMultiplier => self.basic_attack_multiplier,
            StatKind::Price => self.price,
        }
    }

    fn field_mut(&mut self, kind: StatKind) -> &mut f64 {
        match kind {
            StatKind::BasicAttack => &mut self.basic_attack,
            StatKind::PhysicalPower => &mut self.physical_power,
            StatKind::AttackSpeed => &mut self.attack_speed,
            StatKind::Mana => &mut self.mana,
            StatKind::FlatPen => &mut self.flat_pen,
            StatKind::PercentPen => &mut self.percent_pen,
            StatKind::AaPercentPen => &mut self.aa_percent_pen,
            StatKind::AbilityPercentPen => &mut self.ability_percent_pen,
            StatKind::CritChance => &mut self.crit_chance,
            StatKind::CritMultiplier => &mut self.crit_multiplier,
            StatKind::AaBonusDamage => &mut self.aa_bonus_damage,
            StatKind::AbilityDamage => &mut self.ability_damage,
            StatKind::BasicAttackMultiplier => &mut self.basic_attack_multiplier,
            StatKind::Price => &mut self.price,
        }
    }

    /// Adds `value` to a single field.
    pub fn apply(&mut self, kind: StatKind, value: f64) {
        *self.field_mut(kind) += value;
    }

    /// Adds another aggregate into self, field by field.
    pub fn accumulate(&mut self, other: &StatAggregate) {
        self.basic_attack += other.basic_attack;
        self.physical_power += other.physical_power;
        self.attack_speed += other.attack_speed;
        self.mana += other.mana;
        self.flat_pen += other.flat_pen;
        self.percent_pen += other.percent_pen;
        self.aa_percent_pen += other.aa_percent_pen;
        self.ability_percent_pen += other.ability_percent_pen;
        self.crit_chance += other.crit_chance;
        self.crit_multiplier += other.crit_multiplier;
        self.aa_bonus_damage += other.aa_bonus_damage;
        self.ability_damage += other.ability_damage;
        self.basic_attack_multiplier += other.basic_attack_multiplier;
        self.price += other.price;
    }

    /// Pure form of [StatAggregate::accumulate].
    pub fn combine(mut self, other: &StatAggregate) -> StatAggregate {
        self.accumulate(other);
        self
    }
}

impl AddAssign<&StatAggregate> for StatAggregate {
    fn add_assign(&mut self, rhs: &StatAggregate) {
        self.accumulate(rhs);
    }
}

impl AddAssign for StatAggregate {
    fn add_assign(&mut self, rhs: StatAggregate) {
        self.accumulate(&rhs);
    }
}

impl Add for StatAggregate {
    type Output = StatAggregate;

    fn add(self, rhs: StatAggregate) -> StatAggregate {
        self.combine(&rhs)
    }
}

impl<'a> Sum<&'a StatAggregate> for StatAggregate {
    fn sum<I: Iterator<Item = &'a StatAggregate>>(iter: I) -> Self {
        iter.fold(StatAggregate::default(), |acc, item| acc.combine(item))
    }
}

impl Sum for StatAggregate {
    fn sum<I: Iterator<Item = StatAggregate>>(iter: I) -> Self {
        iter.fold(StatAggregate::default(), Add::add)
    }
}

pub const ALL_STAT_KINDS: [StatKind; 14] = [
    StatKind::BasicAttack,
    StatKind::PhysicalPower,
    StatKind::AttackSpeed,
    StatKind::Mana,
    StatKind::FlatPen,
    StatKind::PercentPen,
    StatKind::AaPercentPen,
    StatKind::AbilityPercentPen,
    StatKind::CritChance,
    StatKind::CritMultiplier,
    StatKind::AaBonusDamage,
    StatKind::AbilityDamage,
    StatKind::BasicAttackMultiplier,
    StatKind::Price,
];

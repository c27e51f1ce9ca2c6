pub mod damage;
pub mod scenario;
pub mod stats;

pub use damage::{
    capped_attack_speed, capped_crit_chance, capped_percent_pen, compute_dps, damage_breakdown,
    effective_protections, expected_auto_damage, mitigation_factor, DamageBreakdown,
    ATTACK_SPEED_CAP, BASE_CRIT_MULTIPLIER, CRIT_CHANCE_CAP, PERCENT_PEN_CAP,
};
pub use scenario::{Character, Role, Scenario, TargetKind};
pub use stats::{StatAggregate, StatKind, ALL_STAT_KINDS};

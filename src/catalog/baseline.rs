//! Average roster stats for one role at the reference level; the starting
//! point every build's aggregate is seeded from.

use serde::{Deserialize, Serialize};

use crate::combat::{Character, Role, Scenario, StatAggregate};
use crate::data::raw::RawCharacter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeBaseline {
    pub basic_attack: f64,
    pub attack_speed: f64,
    pub mana: f64,
    /// Roster entries averaged; zero means every field is zero.
    pub characters: usize,
}

impl ArchetypeBaseline {
    pub fn from_roster(roster: &[RawCharacter], role: Role, level: u32) -> Self {
        let level = f64::from(level);
        let mut baseline = Self::default();
        for character in roster.iter().filter(|c| role.matches(&c.role)) {
            baseline.basic_attack += character.physical_power + level * character.physical_power_per_level;
            baseline.attack_speed += character.attack_speed + level * character.attack_speed_per_level;
            baseline.mana += character.mana + level * character.mana_per_level;
            baseline.characters += 1;
        }
        if baseline.characters > 0 {
            let count = baseline.characters as f64;
            baseline.basic_attack /= count;
            baseline.attack_speed /= count;
            baseline.mana /= count;
        }
        baseline
    }

    pub fn is_empty(&self) -> bool {
        self.characters == 0
    }

    /// Fresh aggregate for one build: archetype stats, the character's stim,
    /// and spectral armor as negative crit damage.
    pub fn seed(&self, scenario: &Scenario, character: &Character) -> StatAggregate {
        StatAggregate {
            basic_attack: self.basic_attack,
            attack_speed: self.attack_speed + character.effective_stim(),
            mana: self.mana,
            crit_multiplier: -scenario.spectral_armor,
            ..StatAggregate::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunter(power: f64, per_level: f64, speed: f64) -> RawCharacter {
        RawCharacter {
            name: String::new(),
            role: "Hunter".to_string(),
            physical_power: power,
            physical_power_per_level: per_level,
            attack_speed: speed,
            attack_speed_per_level: 0.01,
            mana: 200.0,
            mana_per_level: 10.0,
        }
    }

    #[test]
    fn averages_matching_roles_at_level() {
        let mut mage = hunter(1000.0, 0.0, 5.0);
        mage.role = "Mage".to_string();
        let roster = vec![hunter(30.0, 2.0, 1.0), hunter(40.0, 1.0, 0.8), mage];

        let baseline = ArchetypeBaseline::from_roster(&roster, Role::Hunter, 20);
        assert_eq!(baseline.characters, 2);
        // (70 + 60) / 2
        assert!((baseline.basic_attack - 65.0).abs() < 1e-9);
        // (1.2 + 1.0) / 2
        assert!((baseline.attack_speed - 1.1).abs() < 1e-9);
        assert!((baseline.mana - 400.0).abs() < 1e-9);
    }

    #[test]
    fn empty_roster_gives_zero_baseline() {
        let baseline = ArchetypeBaseline::from_roster(&[], Role::Hunter, 20);
        assert!(baseline.is_empty());
        assert_eq!(baseline.basic_attack, 0.0);
    }

    #[test]
    fn seed_applies_stim_and_spectral_armor() {
        let baseline = ArchetypeBaseline {
            basic_attack: 80.0,
            attack_speed: 1.2,
            mana: 300.0,
            characters: 3,
        };
        let character = Character {
            name: "Test".to_string(),
            attack_speed_stim: 0.4,
            stim_duration_class: 1,
            failnot_beneficial: false,
        };
        let seeded = baseline.seed(&Scenario::tank(), &character);
        assert_eq!(seeded.basic_attack, 80.0);
        assert!((seeded.attack_speed - 1.4).abs() < 1e-9);
        assert!((seeded.crit_multiplier + 0.30).abs() < 1e-9);
        assert_eq!(seeded.physical_power, 0.0);
    }
}

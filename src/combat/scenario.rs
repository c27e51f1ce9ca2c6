//! Fight scenarios and character configuration. Both are static inputs read by
//! the evaluator and passive effects; nothing mutates them during a run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opponent archetype a scenario represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Squishy,
    Tank,
}

impl TargetKind {
    pub const fn is_squishy(self) -> bool {
        matches!(self, Self::Squishy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Fight duration in seconds. Always positive.
    pub fight_length: f64,
    /// Enemy physical protections.
    pub enemy_protections: f64,
    /// Fraction of incoming critical damage the enemy negates.
    #[serde(default)]
    pub spectral_armor: f64,
    pub enemy_health: f64,
    pub approx_basic_attacks: u32,
    pub approx_abilities: u32,
    pub target: TargetKind,
}

impl Scenario {
    pub fn squishy() -> Self {
        Self {
            fight_length: 2.0,
            enemy_protections: 100.0,
            spectral_armor: 0.0,
            enemy_health: 2000.0,
            approx_basic_attacks: 4,
            approx_abilities: 1,
            target: TargetKind::Squishy,
        }
    }

    /// Rejects parameters that would make DPS undefined: the fight length
    /// must be positive and every numeric field finite.
    pub fn validate(&self) -> Result<(), String> {
        if !self.fight_length.is_finite() || self.fight_length <= 0.0 {
            return Err(format!("fight_length must be positive, got {}", self.fight_length));
        }
        for (field, value) in [
            ("enemy_protections", self.enemy_protections),
            ("spectral_armor", self.spectral_armor),
            ("enemy_health", self.enemy_health),
        ] {
            if !value.is_finite() {
                return Err(format!("{field} must be finite, got {value}"));
            }
        }
        Ok(())
    }

    pub fn tank() -> Self {
        Self {
            fight_length: 4.0,
            enemy_protections: 300.0,
            spectral_armor: 0.30,
            enemy_health: 3000.0,
            approx_basic_attacks: 8,
            approx_abilities: 2,
            target: TargetKind::Tank,
        }
    }
}

/// The god being built for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Flat attack speed granted by the god's own steroid.
    #[serde(default)]
    pub attack_speed_stim: f64,
    /// 0 means the stim is permanent; anything else halves its contribution.
    #[serde(default)]
    pub stim_duration_class: u32,
    /// Whether Failnot's conditional crit bonus applies to this god.
    #[serde(default)]
    pub failnot_beneficial: bool,
}

impl Character {
    pub fn chiron() -> Self {
        Self {
            name: "Chiron".to_string(),
            attack_speed_stim: 0.0,
            stim_duration_class: 0,
            failnot_beneficial: false,
        }
    }

    /// Stim contribution averaged over a fight.
    pub fn effective_stim(&self) -> f64 {
        if self.stim_duration_class == 0 {
            self.attack_speed_stim
        } else {
            self.attack_speed_stim / 2.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Assassin,
    Guardian,
    Hunter,
    Mage,
    Warrior,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assassin => "Assassin",
            Self::Guardian => "Guardian",
            Self::Hunter => "Hunter",
            Self::Mage => "Mage",
            Self::Warrior => "Warrior",
        }
    }

    /// Case-insensitive match against a raw role field (which may carry padding).
    pub fn matches(self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assassin" => Ok(Self::Assassin),
            "guardian" => Ok(Self::Guardian),
            "hunter" => Ok(Self::Hunter),
            "mage" => Ok(Self::Mage),
            "warrior" => Ok(Self::Warrior),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_and_bad_fight_lengths_are_not() {
        assert!(Scenario::squishy().validate().is_ok());
        assert!(Scenario::tank().validate().is_ok());

        for fight_length in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let scenario = Scenario {
                fight_length,
                ..Scenario::squishy()
            };
            assert!(scenario.validate().is_err(), "fight_length {fight_length} accepted");
        }

        let scenario = Scenario {
            enemy_health: f64::NAN,
            ..Scenario::tank()
        };
        assert!(scenario.validate().unwrap_err().contains("enemy_health"));
    }

    #[test]
    fn stim_is_halved_for_timed_steroids() {
        let mut god = Character::chiron();
        god.attack_speed_stim = 0.4;
        assert_eq!(god.effective_stim(), 0.4);
        god.stim_duration_class = 1;
        assert_eq!(god.effective_stim(), 0.2);
    }

    #[test]
    fn role_parsing_ignores_case_and_padding() {
        assert_eq!(" hunter ".parse::<Role>(), Ok(Role::Hunter));
        assert!(Role::Hunter.matches(" Hunter"));
        assert!(!Role::Hunter.matches("Mage"));
        assert!("ranger".parse::<Role>().is_err());
    }

    #[test]
    fn presets_describe_squishy_and_tank_fights() {
        let squishy = Scenario::squishy();
        let tank = Scenario::tank();
        assert!(squishy.target.is_squishy());
        assert!(!tank.target.is_squishy());
        assert!(tank.enemy_protections > squishy.enemy_protections);
        assert_eq!(tank.spectral_armor, 0.30);
    }
}

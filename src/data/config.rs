//! Analysis configuration: named scenarios and characters plus run defaults.
//!
//! Loaded from YAML when `SMITEBUILDS_CONFIG` points at a file; otherwise the
//! built-in squishy/tank scenarios and Chiron are used. Built-ins stay
//! available by name unless a file redefines them.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRules;
use crate::combat::{Character, Role, Scenario};
use crate::error::ConfigError;
use crate::optimizer::{EvaluationOptions, RankingMode};

pub const CONFIG_ENV: &str = "SMITEBUILDS_CONFIG";
pub const ITEMS_ENV: &str = "SMITEBUILDS_ITEMS";
pub const CHARACTERS_ENV: &str = "SMITEBUILDS_GODS";

pub const DEFAULT_BUILD_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub role: Role,
    pub build_size: usize,
    pub forced_items: Vec<String>,
    pub ranking: RankingMode,
    /// Key into [AnalysisConfig::characters].
    pub character: String,
    pub scenarios: BTreeMap<String, Scenario>,
    pub characters: BTreeMap<String, Character>,
    pub catalog: CatalogRules,
    pub evaluation: EvaluationOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let mut config = Self {
            role: Role::Hunter,
            build_size: DEFAULT_BUILD_SIZE,
            forced_items: Vec::new(),
            ranking: RankingMode::Dps,
            character: "chiron".to_string(),
            scenarios: BTreeMap::new(),
            characters: BTreeMap::new(),
            catalog: CatalogRules::default(),
            evaluation: EvaluationOptions::default(),
        };
        config.add_builtins();
        config
    }
}

impl AnalysisConfig {
    fn add_builtins(&mut self) {
        self.scenarios.entry("squishy".to_string()).or_insert_with(Scenario::squishy);
        self.scenarios.entry("tank".to_string()).or_insert_with(Scenario::tank);
        self.characters.entry("chiron".to_string()).or_insert_with(Character::chiron);
    }

    pub fn from_yaml_str(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.scenarios = lowercase_keys(config.scenarios);
        config.characters = lowercase_keys(config.characters);
        config.character = config.character.to_ascii_lowercase();
        config.add_builtins();
        for (name, scenario) in &config.scenarios {
            scenario.validate().map_err(|reason| ConfigError::InvalidScenario {
                name: name.clone(),
                reason,
            })?;
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw, &path.display().to_string())
    }

    /// Reads the file named by `SMITEBUILDS_CONFIG`, or returns the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::debug!(path = %path, "loading analysis config");
                Self::load(path.trim())
            }
            _ => Ok(Self::default()),
        }
    }

    /// Case-insensitive scenario lookup.
    pub fn scenario(&self, name: &str) -> Result<&Scenario, ConfigError> {
        self.scenarios
            .get(&name.trim().to_ascii_lowercase())
            .ok_or_else(|| ConfigError::UnknownScenario(name.to_string()))
    }

    /// Case-insensitive character lookup; `None` means the configured default.
    pub fn character(&self, name: Option<&str>) -> Result<&Character, ConfigError> {
        let name = name.unwrap_or(&self.character);
        self.characters
            .get(&name.trim().to_ascii_lowercase())
            .ok_or_else(|| ConfigError::UnknownCharacter(name.to_string()))
    }
}

fn lowercase_keys<V>(map: BTreeMap<String, V>) -> BTreeMap<String, V> {
    map.into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect()
}

/// Snapshot paths from `SMITEBUILDS_ITEMS` / `SMITEBUILDS_GODS`, or the defaults.
pub fn snapshot_paths_from_env() -> (String, String) {
    use crate::data::snapshot::{DEFAULT_CHARACTERS_PATH, DEFAULT_ITEMS_PATH};

    let read = |key: &str, fallback: &str| {
        env::var(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };
    (read(ITEMS_ENV, DEFAULT_ITEMS_PATH), read(CHARACTERS_ENV, DEFAULT_CHARACTERS_PATH))
}

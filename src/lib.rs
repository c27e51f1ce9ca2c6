//! Exhaustive item-build evaluator for hunter damage: every legal build is
//! scored for DPS and DPS per gold against fixed fight scenarios and ranked
//! relative to the best build in its set.

pub mod catalog;
pub mod cli;
pub mod combat;
pub mod data;
pub mod error;
pub mod export;
pub mod optimizer;
pub mod parallel;
pub mod passives;

pub use catalog::{build_catalog, build_catalog_with_rules, Catalog, CatalogItem, CatalogRules};
pub use combat::{compute_dps, damage_breakdown, Character, Role, Scenario, StatAggregate};
pub use error::{BuildError, ConfigError, SnapshotError};
pub use optimizer::build_generator::{generate_builds, Build};
pub use optimizer::ranking::{composite_results, BuildResult};
pub use optimizer::{
    evaluate, evaluate_multi, evaluate_with_progress, sort_results, EvaluationOptions, RankingMode,
};

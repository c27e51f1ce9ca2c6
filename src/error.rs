//! Error types surfaced by the evaluator, snapshot loaders and analysis config.

use thiserror::Error;

/// Configuration errors raised before any build is evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("{forced} forced item(s) do not fit in a build of size {build_size}")]
    TooManyForcedItems { forced: usize, build_size: usize },

    #[error("could not find item by name '{0}'")]
    UnknownItem(String),

    #[error("cannot force two starter items ('{first}' and '{second}')")]
    MultipleStarters { first: String, second: String },

    #[error("expected {expected} scenario weight(s), got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },

    #[error("scenario weights must be finite, non-negative and sum to a positive value")]
    InvalidWeights,

    #[error("scenario result sets disagree on build {index}: {detail}")]
    MismatchedScenarioSets { index: usize, detail: String },
}

/// Errors reading or writing flat snapshot files.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write snapshot '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading the YAML analysis configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    #[error("invalid scenario '{name}': {reason}")]
    InvalidScenario { name: String, reason: String },
}

/// Errors writing ranked results.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

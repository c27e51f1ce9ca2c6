use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::{DamageBreakdown, StatAggregate};
use crate::error::BuildError;
use crate::optimizer::build_generator::Build;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildResult {
    pub build: Build,
    /// Final aggregate after passives; `None` on composite results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<DamageBreakdown>,
    pub dps: f64,
    /// DPS over the best DPS in the same result set.
    pub dps_fraction: f64,
    pub dps_per_gold: f64,
    pub dpspg_fraction: f64,
    /// Per-scenario results a composite was averaged from.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenario_results: Vec<BuildResult>,
}

impl BuildResult {
    /// Single-scenario result; fractions are filled in by [normalize].
    pub fn scored(build: Build, stats: StatAggregate, breakdown: DamageBreakdown) -> Self {
        let dps_per_gold = if stats.price > 0.0 {
            breakdown.dps / stats.price
        } else {
            0.0
        };
        Self {
            build,
            stats: Some(stats),
            breakdown: Some(breakdown),
            dps: breakdown.dps,
            dps_fraction: 0.0,
            dps_per_gold,
            dpspg_fraction: 0.0,
            scenario_results: Vec::new(),
        }
    }

    pub fn fraction(&self, mode: RankingMode) -> f64 {
        match mode {
            RankingMode::Dps => self.dps_fraction,
            RankingMode::DpsPerGold => self.dpspg_fraction,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingMode {
    #[default]
    #[serde(rename = "dps")]
    Dps,
    #[serde(rename = "dpspg")]
    DpsPerGold,
}

impl RankingMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dps => "dps",
            Self::DpsPerGold => "dpspg",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dps" => Ok(Self::Dps),
            "dpspg" | "dps-per-gold" => Ok(Self::DpsPerGold),
            other => Err(format!("unknown ranking mode '{other}' (expected dps or dpspg)")),
        }
    }
}

/// Rewrites both fractions relative to the best value in the set. A set whose
/// best value is zero gets fractions of zero.
pub fn normalize(results: &mut [BuildResult]) {
    let max_dps = results.iter().map(|r| r.dps).fold(0.0_f64, f64::max);
    let max_dpspg = results.iter().map(|r| r.dps_per_gold).fold(0.0_f64, f64::max);
    for result in results.iter_mut() {
        result.dps_fraction = fraction_of(result.dps, max_dps);
        result.dpspg_fraction = fraction_of(result.dps_per_gold, max_dpspg);
    }
}

fn fraction_of(value: f64, best: f64) -> f64 {
    if best > 0.0 {
        value / best
    } else {
        0.0
    }
}

/// Stable sort, best first.
pub fn sort_results(results: &mut [BuildResult], mode: RankingMode) {
    results.sort_by(|left, right| right.fraction(mode).total_cmp(&left.fraction(mode)));
}

/// Weights for `count` scenario sets: equal when `None`, validated otherwise.
pub fn resolve_weights(count: usize, weights: Option<&[f64]>) -> Result<Vec<f64>, BuildError> {
    let Some(weights) = weights else {
        return Ok(vec![1.0; count]);
    };
    if weights.len() != count {
        return Err(BuildError::WeightCountMismatch {
            expected: count,
            actual: weights.len(),
        });
    }
    let valid = weights.iter().all(|w| w.is_finite() && *w >= 0.0);
    let total: f64 = weights.iter().sum();
    if !valid || total <= 0.0 {
        return Err(BuildError::InvalidWeights);
    }
    Ok(weights.to_vec())
}

/// Weighted mean of already-normalised result sets for the same builds, in the
/// same order. The per-scenario results are kept on each composite.
pub fn composite_results(
    per_scenario: Vec<Vec<BuildResult>>,
    weights: Option<&[f64]>,
) -> Result<Vec<BuildResult>, BuildError> {
    let weights = resolve_weights(per_scenario.len(), weights)?;
    let Some(reference) = per_scenario.first() else {
        return Ok(Vec::new());
    };

    for (set_index, set) in per_scenario.iter().enumerate().skip(1) {
        if set.len() != reference.len() {
            return Err(BuildError::MismatchedScenarioSets {
                index: set.len().min(reference.len()),
                detail: format!(
                    "set {set_index} has {} results, expected {}",
                    set.len(),
                    reference.len()
                ),
            });
        }
        if let Some(index) = set.iter().zip(reference).position(|(a, b)| a.build != b.build) {
            return Err(BuildError::MismatchedScenarioSets {
                index,
                detail: format!("set {set_index} lists {:?}, expected {:?}", set[index].build, reference[index].build),
            });
        }
    }

    let total_weight: f64 = weights.iter().sum();
    let weighted = |parts: &[BuildResult], field: fn(&BuildResult) -> f64| -> f64 {
        parts.iter().zip(&weights).map(|(r, w)| w * field(r)).sum::<f64>() / total_weight
    };

    let len = reference.len();
    let mut columns: Vec<_> = per_scenario.into_iter().map(Vec::into_iter).collect();
    let mut composites = Vec::with_capacity(len);
    for _ in 0..len {
        let parts: Vec<BuildResult> = columns.iter_mut().filter_map(Iterator::next).collect();
        let build = parts.first().map(|r| r.build.clone()).unwrap_or_default();
        composites.push(BuildResult {
            build,
            stats: None,
            breakdown: None,
            dps: weighted(&parts, |r| r.dps),
            dps_fraction: weighted(&parts, |r| r.dps_fraction),
            dps_per_gold: weighted(&parts, |r| r.dps_per_gold),
            dpspg_fraction: weighted(&parts, |r| r.dpspg_fraction),
            scenario_results: parts,
        });
    }
    Ok(composites)
}

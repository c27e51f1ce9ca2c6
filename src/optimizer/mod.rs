//! Build evaluator: generate → aggregate → passives → damage → normalise.

pub mod build_generator;
pub mod ranking;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::combat::{damage_breakdown, Character, Scenario};
use crate::error::BuildError;
use crate::optimizer::build_generator::{generate_builds, Build};
use crate::optimizer::ranking::{composite_results, normalize, resolve_weights, BuildResult};
use crate::parallel::{Batches, WorkerPool};
use crate::passives::{apply_in_phase_order, PassiveEffect};

pub use build_generator::{BuildGenerator, BuildIter};
pub use ranking::{sort_results, RankingMode};

/// Builds pulled from the generator per parallel batch (and per progress tick).
pub const DEFAULT_BATCH_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationOptions {
    pub batch_size: usize,
    pub parallel: bool,
    /// Worker threads; 0 uses the Rayon default.
    pub workers: usize,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
            workers: 0,
        }
    }
}

impl EvaluationOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

/// Scores one build. Names missing from the catalog contribute nothing.
pub fn evaluate_build(catalog: &Catalog, scenario: &Scenario, character: &Character, build: Build) -> BuildResult {
    let mut stats = catalog.baseline().seed(scenario, character);
    let mut passives: Vec<PassiveEffect> = Vec::with_capacity(build.len());
    for item in build.iter().filter_map(|name| catalog.get(name)) {
        stats += &item.stats;
        if let Some(passive) = item.passive {
            passives.push(passive);
        }
    }
    apply_in_phase_order(&mut passives, scenario, character, &mut stats);
    let breakdown = damage_breakdown(&stats, scenario.fight_length, scenario.enemy_protections);
    BuildResult::scored(build, stats, breakdown)
}

/// Every build for one scenario, in enumeration order, normalised.
pub fn evaluate(
    catalog: &Catalog,
    scenario: &Scenario,
    character: &Character,
    forced_items: &[String],
    build_size: usize,
) -> Result<Vec<BuildResult>, BuildError> {
    evaluate_with_progress(
        catalog,
        scenario,
        character,
        forced_items,
        build_size,
        &EvaluationOptions::default(),
        |_, _| {},
    )
}

/// Like [evaluate] but streams the generator in batches and invokes
/// `on_progress(done, total)` once before the first batch and after each one.
pub fn evaluate_with_progress<F>(
    catalog: &Catalog,
    scenario: &Scenario,
    character: &Character,
    forced_items: &[String],
    build_size: usize,
    options: &EvaluationOptions,
    mut on_progress: F,
) -> Result<Vec<BuildResult>, BuildError>
where
    F: FnMut(usize, usize),
{
    let generator = generate_builds(catalog, forced_items, build_size)?;
    let pool = if options.parallel {
        Some(WorkerPool::with_workers(options.workers))
    } else {
        None
    };
    let mut results = run_batches(catalog, scenario, character, &generator, options, pool.as_ref(), &mut on_progress);
    normalize(&mut results);
    Ok(results)
}

fn run_batches<F>(
    catalog: &Catalog,
    scenario: &Scenario,
    character: &Character,
    generator: &BuildGenerator,
    options: &EvaluationOptions,
    pool: Option<&WorkerPool>,
    on_progress: &mut F,
) -> Vec<BuildResult>
where
    F: FnMut(usize, usize),
{
    let total = generator.len();
    tracing::info!(
        builds = total,
        build_size = generator.build_size(),
        forced = generator.forced().len(),
        parallel = pool.is_some(),
        "evaluating builds"
    );
    on_progress(0, total);

    // Never pre-allocate the whole space; the count is combinatorial.
    let mut results = Vec::with_capacity(total.min(options.batch_size.max(1)));
    for batch in Batches::new(generator.iter(), options.batch_size) {
        let evaluated: Vec<BuildResult> = match pool {
            Some(pool) => pool.install(|| {
                batch
                    .into_par_iter()
                    .map(|build| evaluate_build(catalog, scenario, character, build))
                    .collect()
            }),
            None => batch
                .into_iter()
                .map(|build| evaluate_build(catalog, scenario, character, build))
                .collect(),
        };
        results.extend(evaluated);
        tracing::debug!(done = results.len(), total, "batch evaluated");
        on_progress(results.len(), total);
    }
    results
}

/// Weighted composite across scenarios. Each scenario is evaluated and
/// normalised on its own first; `weights` defaults to equal.
pub fn evaluate_multi(
    catalog: &Catalog,
    scenarios: &[Scenario],
    weights: Option<&[f64]>,
    character: &Character,
    forced_items: &[String],
    build_size: usize,
) -> Result<Vec<BuildResult>, BuildError> {
    evaluate_multi_with_progress(
        catalog,
        scenarios,
        weights,
        character,
        forced_items,
        build_size,
        &EvaluationOptions::default(),
        |_, _| {},
    )
}

/// [evaluate_multi] with progress counted over every scenario's builds.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_multi_with_progress<F>(
    catalog: &Catalog,
    scenarios: &[Scenario],
    weights: Option<&[f64]>,
    character: &Character,
    forced_items: &[String],
    build_size: usize,
    options: &EvaluationOptions,
    mut on_progress: F,
) -> Result<Vec<BuildResult>, BuildError>
where
    F: FnMut(usize, usize),
{
    // Fail on bad weights before any work is done.
    resolve_weights(scenarios.len(), weights)?;
    let generator = generate_builds(catalog, forced_items, build_size)?;
    let pool = if options.parallel {
        Some(WorkerPool::with_workers(options.workers))
    } else {
        None
    };

    let per_set = generator.len();
    let grand_total = per_set.saturating_mul(scenarios.len());
    let mut per_scenario = Vec::with_capacity(scenarios.len());
    for (index, scenario) in scenarios.iter().enumerate() {
        let offset = per_set.saturating_mul(index);
        let mut results = run_batches(
            catalog,
            scenario,
            character,
            &generator,
            options,
            pool.as_ref(),
            &mut |done: usize, _: usize| on_progress(offset.saturating_add(done), grand_total),
        );
        normalize(&mut results);
        per_scenario.push(results);
    }
    composite_results(per_scenario, weights)
}

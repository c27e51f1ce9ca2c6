use std::collections::BTreeSet;

use crate::catalog::stat_rows::is_recognized;
use crate::catalog::{build_catalog_with_rules, Catalog};
use crate::data::config::{snapshot_paths_from_env, AnalysisConfig};
use crate::data::snapshot::{load_characters, load_items};
use crate::error::SnapshotError;
use crate::export::{render_table, to_json, write_csv_file};
use crate::optimizer::{
    evaluate_multi_with_progress, evaluate_with_progress, sort_results, EvaluationOptions, RankingMode,
};
use crate::parallel::Progress;

pub const USAGE: &str = "usage: smitebuilds <rank|passives|stats|check>";
pub const RANK_USAGE: &str = "usage: smitebuilds rank <scenario>[,<scenario>...] [--god NAME] [--size N] \
[--force A;B] [--by dps|dpspg] [--top N] [--csv PATH] [--table] [--sequential] [--weights W1,W2]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rank,
    Passives,
    Stats,
    Check,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("rank") => Some(Command::Rank),
        Some("passives") => Some(Command::Passives),
        Some("stats") => Some(Command::Stats),
        Some("check") => Some(Command::Check),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Rank) => handle_rank(args),
        Some(Command::Passives) => handle_passives(),
        Some(Command::Stats) => handle_stats(),
        Some(Command::Check) => handle_check(),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

/// Options of `smitebuilds rank`. `None` fields fall back to the config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankArgs {
    pub scenarios: Vec<String>,
    pub god: Option<String>,
    pub size: Option<usize>,
    pub forced: Option<Vec<String>>,
    pub by: Option<RankingMode>,
    pub top: Option<usize>,
    pub csv: Option<String>,
    pub table: bool,
    pub sequential: bool,
    pub weights: Option<Vec<f64>>,
}

pub fn parse_rank_args(args: &[String]) -> Result<RankArgs, String> {
    let mut parsed = RankArgs::default();
    let mut rest = args.iter().skip(2);

    while let Some(arg) = rest.next() {
        let mut value = |flag: &str| {
            rest.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--god" => parsed.god = Some(value("--god")?),
            "--size" => parsed.size = Some(parse_number(&value("--size")?, "--size")?),
            "--force" => {
                let raw = value("--force")?;
                parsed.forced = Some(split_list(&raw, ';'));
            }
            "--by" => parsed.by = Some(value("--by")?.parse()?),
            "--top" => parsed.top = Some(parse_number(&value("--top")?, "--top")?),
            "--csv" => parsed.csv = Some(value("--csv")?),
            "--weights" => {
                let raw = value("--weights")?;
                let weights = split_list(&raw, ',')
                    .iter()
                    .map(|w| parse_number::<f64>(w, "--weights"))
                    .collect::<Result<Vec<_>, _>>()?;
                parsed.weights = Some(weights);
            }
            "--table" => parsed.table = true,
            "--sequential" => parsed.sequential = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            names if parsed.scenarios.is_empty() => parsed.scenarios = split_list(names, ','),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }

    if parsed.scenarios.is_empty() {
        return Err("missing scenario name".to_string());
    }
    if parsed.weights.is_some() && parsed.scenarios.len() < 2 {
        return Err("--weights needs at least two scenarios".to_string());
    }
    Ok(parsed)
}

fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| format!("invalid value '{raw}' for {flag}"))
}

fn handle_rank(args: &[String]) -> i32 {
    let rank_args = match parse_rank_args(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{RANK_USAGE}");
            return 2;
        }
    };

    let config = match AnalysisConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    let catalog = match load_catalog(&config) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("data error: {err}");
            return 1;
        }
    };

    let mut scenarios = Vec::with_capacity(rank_args.scenarios.len());
    for name in &rank_args.scenarios {
        match config.scenario(name) {
            Ok(scenario) => scenarios.push(scenario.clone()),
            Err(err) => {
                eprintln!("config error: {err}");
                return 1;
            }
        }
    }
    let character = match config.character(rank_args.god.as_deref()) {
        Ok(character) => character,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };

    let forced = rank_args.forced.clone().unwrap_or_else(|| config.forced_items.clone());
    let build_size = rank_args.size.unwrap_or(config.build_size);
    let mode = rank_args.by.unwrap_or(config.ranking);
    let options = EvaluationOptions {
        parallel: config.evaluation.parallel && !rank_args.sequential,
        ..config.evaluation
    };

    let mut progress = Progress::new("builds");
    let on_progress = |done: usize, total: usize| {
        progress.update(done, total);
    };
    let outcome = if scenarios.len() == 1 {
        evaluate_with_progress(&catalog, &scenarios[0], character, &forced, build_size, &options, on_progress)
    } else {
        evaluate_multi_with_progress(
            &catalog,
            &scenarios,
            rank_args.weights.as_deref(),
            character,
            &forced,
            build_size,
            &options,
            on_progress,
        )
    };
    let mut results = match outcome {
        Ok(results) => results,
        Err(err) => {
            eprintln!("build error: {err}");
            return 1;
        }
    };

    sort_results(&mut results, mode);
    if let Some(top) = rank_args.top {
        results.truncate(top);
    }

    if let Some(path) = &rank_args.csv {
        if let Err(err) = write_csv_file(path, &results, &rank_args.scenarios) {
            eprintln!("export error: {err}");
            return 1;
        }
        tracing::info!(path = %path, rows = results.len(), "wrote csv");
    }

    if rank_args.table {
        print!("{}", render_table(&results, &rank_args.scenarios));
        return 0;
    }
    match to_json(&results) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize results: {err}");
            1
        }
    }
}

fn handle_passives() -> i32 {
    let catalog = match load_default_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };
    for item in catalog.items() {
        if let Some(text) = &item.passive_text {
            println!("{}", item.name);
            println!("{text}");
            println!("---");
        }
    }
    0
}

fn handle_stats() -> i32 {
    let catalog = match load_default_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };
    let descriptions: BTreeSet<&str> = catalog
        .items()
        .flat_map(|item| item.stat_rows.iter())
        .map(|row| row.description.trim())
        .collect();
    for description in descriptions {
        if is_recognized(description) {
            println!("{description}");
        } else {
            println!("{description} (ignored)");
        }
    }
    0
}

fn handle_check() -> i32 {
    let catalog = match load_default_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };
    let report = catalog.diagnostics();
    println!(
        "catalog: role={}, starters={}, normals={}, diagnostics={}",
        catalog.role(),
        catalog.starters().len(),
        catalog.normals().len(),
        report.len()
    );
    for diagnostic in report.iter() {
        println!("- {diagnostic}");
    }
    if report.has_warnings() {
        1
    } else {
        0
    }
}

fn load_default_catalog() -> Result<Catalog, i32> {
    let config = AnalysisConfig::from_env().map_err(|err| {
        eprintln!("config error: {err}");
        1
    })?;
    load_catalog(&config).map_err(|err| {
        eprintln!("data error: {err}");
        1
    })
}

fn load_catalog(config: &AnalysisConfig) -> Result<Catalog, SnapshotError> {
    let (items_path, characters_path) = snapshot_paths_from_env();
    let items = load_items(&items_path)?;
    let characters = load_characters(&characters_path)?;
    tracing::debug!(items = items.len(), characters = characters.len(), "snapshots loaded");
    Ok(build_catalog_with_rules(&items, &characters, config.role, &config.catalog))
}

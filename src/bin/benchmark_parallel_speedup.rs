//! Evaluate the full build space once sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup
//!
//! Uses the snapshots named by SMITEBUILDS_ITEMS / SMITEBUILDS_GODS when they load,
//! otherwise a synthetic catalog of the same shape.

use std::time::Instant;

use smitebuilds::catalog::{build_catalog, ArchetypeBaseline, Catalog, CatalogItem};
use smitebuilds::combat::{Character, Role, Scenario, StatAggregate};
use smitebuilds::data::config::snapshot_paths_from_env;
use smitebuilds::data::snapshot::{load_characters, load_items};
use smitebuilds::optimizer::{evaluate_with_progress, EvaluationOptions};

const STARTERS: [&str; 5] = [
    "Gilded Arrow",
    "Ornate Arrow",
    "Hunter's Cowl",
    "Leader's Cowl",
    "Manikin Scepter",
];

const NORMALS: [&str; 16] = [
    "Deathbringer",
    "Rage",
    "Wind Demon",
    "Qin's Sais",
    "The Executioner",
    "Silverbranch Bow",
    "Odysseus' Bow",
    "Atalanta's Bow",
    "Titan's Bane",
    "The Crusher",
    "Evolved Transcendence",
    "Hydra's Lament",
    "Heartseeker",
    "Malice",
    "Dominance",
    "Bloodforge",
];

fn synthetic_catalog() -> Catalog {
    let baseline = ArchetypeBaseline {
        basic_attack: 84.0,
        attack_speed: 1.25,
        mana: 1030.0,
        characters: 1,
    };
    let starters = STARTERS.iter().enumerate().map(|(i, name)| {
        let stats = StatAggregate {
            physical_power: 10.0 + i as f64 * 2.0,
            attack_speed: 0.1,
            price: 700.0,
            ..StatAggregate::default()
        };
        CatalogItem::new(*name, stats)
    });
    let normals = NORMALS.iter().enumerate().map(|(i, name)| {
        let step = i as f64;
        let stats = StatAggregate {
            physical_power: 20.0 + (i % 5) as f64 * 10.0,
            attack_speed: 0.05 * (i % 4) as f64,
            crit_chance: if i % 3 == 0 { 0.2 } else { 0.0 },
            percent_pen: if i % 7 == 0 { 0.1 } else { 0.0 },
            mana: if i % 6 == 0 { 300.0 } else { 0.0 },
            price: 2300.0 + step * 75.0,
            ..StatAggregate::default()
        };
        CatalogItem::new(*name, stats)
    });

    let catalog = starters.fold(Catalog::new(Role::Hunter, baseline), Catalog::with_starter);
    normals.fold(catalog, Catalog::with_normal)
}

fn load_or_synthesize() -> (Catalog, &'static str) {
    let (items_path, characters_path) = snapshot_paths_from_env();
    match (load_items(&items_path), load_characters(&characters_path)) {
        (Ok(items), Ok(characters)) => (build_catalog(&items, &characters, Role::Hunter), "snapshot"),
        _ => (synthetic_catalog(), "synthetic"),
    }
}

fn main() {
    let (catalog, source) = load_or_synthesize();
    let scenario = Scenario::tank();
    let character = Character::chiron();
    let build_size = 6;

    let run = |options: &EvaluationOptions| {
        evaluate_with_progress(&catalog, &scenario, &character, &[], build_size, options, |_, _| {})
    };

    println!(
        "Build evaluation: {} starters, {} normals, build size {} ({} catalog, tank scenario)",
        catalog.starters().len(),
        catalog.normals().len(),
        build_size,
        source
    );
    println!();

    // Sequential
    let t0 = Instant::now();
    let results_seq = match run(&EvaluationOptions::sequential()) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("sequential evaluation failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    let n = results_seq.len();
    println!("Sequential:  {:.2} ms  ({:.1} builds/s)", seq_ms, n as f64 / elapsed_seq.as_secs_f64());

    // Parallel
    let t0 = Instant::now();
    let results_par = match run(&EvaluationOptions::default()) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("parallel evaluation failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!("Parallel:    {:.2} ms  ({:.1} builds/s)", par_ms, n as f64 / elapsed_par.as_secs_f64());

    let speedup = seq_ms / par_ms;
    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", speedup);

    assert_eq!(results_seq.len(), results_par.len());
    for (i, (a, b)) in results_seq.iter().zip(results_par.iter()).enumerate() {
        assert_eq!(a.build, b.build, "result {} build order mismatch", i);
        assert!((a.dps - b.dps).abs() < 1e-9, "result {} dps mismatch", i);
        assert!((a.dps_fraction - b.dps_fraction).abs() < 1e-12, "result {} dps_fraction mismatch", i);
    }
    println!("(Results match sequential vs parallel)");
}

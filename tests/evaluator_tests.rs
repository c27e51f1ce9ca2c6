use std::path::PathBuf;

use smitebuilds::catalog::{ArchetypeBaseline, Catalog, CatalogItem, DiagnosticKind};
use smitebuilds::combat::{Character, Role, Scenario, StatAggregate};
use smitebuilds::data::snapshot::{load_characters, load_items};
use smitebuilds::optimizer::evaluate_build;
use smitebuilds::{
    build_catalog, composite_results, evaluate, evaluate_multi, evaluate_with_progress, sort_results,
    BuildError, BuildResult, EvaluationOptions, RankingMode,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn fixture_catalog() -> Catalog {
    let items = load_items(fixture("items.json")).expect("fixture items");
    let characters = load_characters(fixture("gods.json")).expect("fixture gods");
    build_catalog(&items, &characters, Role::Hunter)
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

#[test]
fn fixture_catalog_keeps_only_buildable_hunter_items() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.starters().len(), 7);
    assert_eq!(catalog.normals().len(), 15);

    for excluded in [
        "Warrior's Axe",
        "Ichaival",
        "Shifter's Shield",
        "Bristlebush Acorn",
        "Retired Blade",
        "Breastplate of Valor",
        "Transcendence",
        "Hidden Dagger",
        "Katana",
    ] {
        assert!(catalog.get(excluded).is_none(), "{excluded} should be filtered out");
    }
    assert!(catalog.is_starter("Leader's Cowl"));

    let evolved = catalog.get("Evolved Transcendence").expect("evolved item kept");
    approx_eq(evolved.price(), 2200.0, 1e-9);
    let deathbringer = catalog.get("Deathbringer").expect("deathbringer");
    approx_eq(deathbringer.price(), 1150.0 + 900.0 + 650.0, 1e-9);
    approx_eq(deathbringer.stats.crit_chance, 0.25, 1e-12);

    assert_eq!(catalog.baseline().characters, 4);
    assert!(catalog.diagnostics().contains(DiagnosticKind::UnrecognizedPassive, "Soul Eater"));
    assert!(!catalog.diagnostics().contains(DiagnosticKind::UnrecognizedPassive, "Bloodforge"));
}

#[test]
fn full_space_is_evaluated_and_normalised() {
    let catalog = fixture_catalog();
    let results = evaluate(&catalog, &Scenario::squishy(), &Character::chiron(), &[], 6).expect("evaluation");

    // C(15, 6) builds without a starter plus 7 * C(15, 5) with one.
    assert_eq!(results.len(), 5005 + 7 * 3003);
    let best_dps = results.iter().map(|r| r.dps_fraction).fold(0.0, f64::max);
    let best_gold = results.iter().map(|r| r.dpspg_fraction).fold(0.0, f64::max);
    approx_eq(best_dps, 1.0, 1e-12);
    approx_eq(best_gold, 1.0, 1e-12);
    assert!(results
        .iter()
        .all(|r| (0.0..=1.0).contains(&r.dps_fraction) && (0.0..=1.0).contains(&r.dpspg_fraction)));
}

#[test]
fn forced_items_lead_every_build() {
    let catalog = fixture_catalog();
    let forced = names(&["Deathbringer", "Gilded Arrow"]);
    let results = evaluate(&catalog, &Scenario::tank(), &Character::chiron(), &forced, 4).expect("evaluation");

    assert_eq!(results.len(), 14 * 13 / 2);
    for result in &results {
        assert_eq!(&result.build[..2], &forced[..]);
        assert!(!result.build[2..].iter().any(|name| catalog.is_starter(name)));
    }
}

#[test]
fn rejects_invalid_forced_lists() {
    let catalog = fixture_catalog();
    let scenario = Scenario::squishy();
    let chiron = Character::chiron();

    let err = evaluate(&catalog, &scenario, &chiron, &names(&["Gilded Arrow", "Ornate Arrow"]), 6)
        .expect_err("two starters");
    assert!(matches!(err, BuildError::MultipleStarters { .. }));

    let err = evaluate(&catalog, &scenario, &chiron, &names(&["Transcendence"]), 6).expect_err("superseded item");
    assert!(matches!(err, BuildError::UnknownItem(_)));
}

#[test]
fn leaders_cowl_multiplies_power_once_after_flat_bonuses() {
    let blade = |power: f64| StatAggregate {
        physical_power: power,
        price: 1000.0,
        ..StatAggregate::default()
    };
    let catalog = Catalog::new(Role::Hunter, ArchetypeBaseline::default())
        .with_starter(CatalogItem::new("Leader's Cowl", StatAggregate::default()))
        .with_normal(CatalogItem::new("Blade", blade(100.0)))
        .with_normal(CatalogItem::new("Odd Blade", blade(101.0)));
    let scenario = Scenario::squishy();
    let chiron = Character::chiron();

    let result = evaluate_build(&catalog, &scenario, &chiron, names(&["Leader's Cowl", "Blade"]));
    assert_eq!(result.stats.expect("stats").physical_power, 105.0);

    let result = evaluate_build(&catalog, &scenario, &chiron, names(&["Leader's Cowl", "Odd Blade"]));
    assert_eq!(result.stats.expect("stats").physical_power, 106.0);

    let result = evaluate_build(&catalog, &scenario, &chiron, names(&["Blade"]));
    assert_eq!(result.stats.expect("stats").physical_power, 100.0);
}

#[test]
fn parallel_and_sequential_agree_on_the_fixture() {
    let catalog = fixture_catalog();
    let scenario = Scenario::tank();
    let chiron = Character::chiron();
    let forced = names(&["Qin's Sais"]);
    let run = |options: EvaluationOptions| {
        evaluate_with_progress(&catalog, &scenario, &chiron, &forced, 5, &options, |_, _| {}).expect("evaluation")
    };

    let sequential = run(EvaluationOptions::sequential());
    let parallel = run(EvaluationOptions {
        batch_size: 257,
        parallel: true,
        workers: 3,
    });
    assert_eq!(sequential, parallel);
}

#[test]
fn ranking_by_gold_efficiency_sorts_descending() {
    let catalog = fixture_catalog();
    let mut results = evaluate(&catalog, &Scenario::squishy(), &Character::chiron(), &names(&["Rage"]), 3)
        .expect("evaluation");
    sort_results(&mut results, RankingMode::DpsPerGold);
    approx_eq(results[0].dpspg_fraction, 1.0, 1e-12);
    assert!(results.windows(2).all(|pair| pair[0].dpspg_fraction >= pair[1].dpspg_fraction));
}

fn normalised(build: &[&str], dps_fraction: f64) -> BuildResult {
    BuildResult {
        build: names(build),
        stats: None,
        breakdown: None,
        dps: dps_fraction * 400.0,
        dps_fraction,
        dps_per_gold: dps_fraction / 10.0,
        dpspg_fraction: dps_fraction,
        scenario_results: Vec::new(),
    }
}

#[test]
fn composite_of_mirrored_scenarios_averages_to_three_quarters() {
    let squishy = vec![normalised(&["A"], 1.0), normalised(&["B"], 0.5)];
    let tank = vec![normalised(&["A"], 0.5), normalised(&["B"], 1.0)];

    let composite = composite_results(vec![squishy, tank], None).expect("composite");
    assert_eq!(composite.len(), 2);
    for result in &composite {
        approx_eq(result.dps_fraction, 0.75, 1e-12);
        assert_eq!(result.scenario_results.len(), 2);
        assert!(result.stats.is_none());
    }
}

#[test]
fn weighted_composite_over_fixture_scenarios() {
    let catalog = fixture_catalog();
    let scenarios = [Scenario::squishy(), Scenario::tank()];
    let forced = names(&["Deathbringer", "Wind Demon"]);
    let weights = [3.0, 1.0];

    let composite = evaluate_multi(&catalog, &scenarios, Some(&weights[..]), &Character::chiron(), &forced, 4)
        .expect("composite evaluation");
    assert!(!composite.is_empty());
    for result in &composite {
        let [squishy, tank] = &result.scenario_results[..] else {
            panic!("expected two scenario results");
        };
        approx_eq(
            result.dps_fraction,
            (3.0 * squishy.dps_fraction + tank.dps_fraction) / 4.0,
            1e-12,
        );
    }

    let err = evaluate_multi(&catalog, &scenarios, Some(&[1.0][..]), &Character::chiron(), &forced, 4)
        .expect_err("weight count");
    assert!(matches!(err, BuildError::WeightCountMismatch { expected: 2, actual: 1 }));
}

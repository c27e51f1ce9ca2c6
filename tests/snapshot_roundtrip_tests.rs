use std::path::PathBuf;

use smitebuilds::data::snapshot::{load_characters, load_items, load_manifest, save_characters, save_items};
use smitebuilds::{build_catalog, Role, SnapshotError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn resaved_snapshots_build_the_same_catalog() {
    let items = load_items(fixture("items.json")).expect("fixture items");
    let gods = load_characters(fixture("gods.json")).expect("fixture gods");

    let dir = tempfile::tempdir().expect("temp dir");
    let items_path = dir.path().join("snapshots").join("items.json");
    let gods_path = dir.path().join("snapshots").join("gods.json");
    save_items(&items_path, &items).expect("save items");
    save_characters(&gods_path, &gods).expect("save gods");

    let reloaded_items = load_items(&items_path).expect("reload items");
    let reloaded_gods = load_characters(&gods_path).expect("reload gods");
    assert_eq!(reloaded_items, items);
    assert_eq!(reloaded_gods, gods);

    let original = build_catalog(&items, &gods, Role::Hunter);
    let resaved = build_catalog(&reloaded_items, &reloaded_gods, Role::Hunter);
    assert_eq!(
        original.starter_names().collect::<Vec<_>>(),
        resaved.starter_names().collect::<Vec<_>>()
    );
    assert_eq!(
        original.normal_names().collect::<Vec<_>>(),
        resaved.normal_names().collect::<Vec<_>>()
    );
    assert_eq!(original.baseline(), resaved.baseline());
}

#[test]
fn manifest_tracks_both_datasets() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(load_manifest(dir.path()).expect("no manifest is fine").is_none());

    let items = load_items(fixture("items.json")).expect("fixture items");
    let gods = load_characters(fixture("gods.json")).expect("fixture gods");
    save_items(dir.path().join("items.json"), &items).expect("save items");
    save_characters(dir.path().join("gods.json"), &gods).expect("save gods");

    let manifest = load_manifest(dir.path()).expect("manifest parses").expect("manifest exists");
    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest["items"].path, "items.json");
    assert_eq!(manifest["items"].records, items.len());
    assert_eq!(manifest["characters"].path, "gods.json");
    assert_eq!(manifest["characters"].records, gods.len());
    assert!(manifest.values().all(|entry| entry.captured_at.is_some()));
}

#[test]
fn corrupt_manifest_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("manifest.json"), "[1, 2").expect("write manifest");
    let err = load_manifest(dir.path()).expect_err("corrupt manifest");
    assert!(matches!(err, SnapshotError::Parse { .. }));
}

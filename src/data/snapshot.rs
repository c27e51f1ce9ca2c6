//! Flat JSON snapshot files for the item catalog and roster.
//!
//! Snapshots are the only persistence: the evaluator reads them, nothing else
//! writes besides [save_items] / [save_characters] and the manifest.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data::raw::{RawCharacter, RawItem};
use crate::data::registry::{SnapshotEntry, SnapshotManifest, MANIFEST_FILE_NAME};
use crate::error::SnapshotError;

pub const DEFAULT_ITEMS_PATH: &str = "data/items.json";
pub const DEFAULT_CHARACTERS_PATH: &str = "data/gods.json";

pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<RawItem>, SnapshotError> {
    load_json(path.as_ref())
}

pub fn load_characters(path: impl AsRef<Path>) -> Result<Vec<RawCharacter>, SnapshotError> {
    load_json(path.as_ref())
}

pub fn save_items(path: impl AsRef<Path>, items: &[RawItem]) -> Result<(), SnapshotError> {
    save_json(path.as_ref(), items)?;
    record_in_manifest(path.as_ref(), "items", items.len())
}

pub fn save_characters(path: impl AsRef<Path>, characters: &[RawCharacter]) -> Result<(), SnapshotError> {
    save_json(path.as_ref(), characters)?;
    record_in_manifest(path.as_ref(), "characters", characters.len())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SnapshotError> {
    let payload = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SnapshotError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, payload).map_err(|source| SnapshotError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn record_in_manifest(snapshot_path: &Path, dataset: &str, records: usize) -> Result<(), SnapshotError> {
    let dir = snapshot_path.parent().unwrap_or_else(|| Path::new(""));
    let manifest_path = dir.join(MANIFEST_FILE_NAME);
    let mut manifest = if manifest_path.exists() {
        load_json::<SnapshotManifest>(&manifest_path)?
    } else {
        SnapshotManifest::default()
    };
    let file_name = snapshot_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    manifest.insert(dataset.to_string(), SnapshotEntry::captured_now(file_name, records));
    save_json(&manifest_path, &manifest)
}

/// Reads `manifest.json` from a snapshot directory, if present.
pub fn load_manifest(dir: impl AsRef<Path>) -> Result<Option<SnapshotManifest>, SnapshotError> {
    let path = dir.as_ref().join(MANIFEST_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    load_json(&path).map(Some)
}

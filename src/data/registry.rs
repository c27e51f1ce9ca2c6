//! Snapshot manifest: which file holds each dataset and when it was captured.
//! Written next to the snapshots on save; read by `snapshot_info` to show "data as of".

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub path: String,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
}

impl SnapshotEntry {
    pub fn captured_now(path: impl Into<String>, records: usize) -> Self {
        Self {
            path: path.into(),
            records,
            captured_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

pub type SnapshotManifest = BTreeMap<String, SnapshotEntry>;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

//! Per-item working directory layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory layout for one catalog item under the output root.
///
/// ```text
/// <out>/<identifier>/
///   raw/            downloaded source files
///   tracks/         exported output
///   metadata.json
///   report.json
///   names.json      optional, written by an external naming step
/// ```
///
/// An item directory is owned by one processing run at a time; no locking is
/// provided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLayout {
    /// Catalog identifier of the item.
    pub identifier: String,
    /// `<out>/<identifier>`.
    pub root: PathBuf,
}

impl ItemLayout {
    pub fn new(out_dir: impl AsRef<Path>, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            root: out_dir.as_ref().join(&identifier),
            identifier,
        }
    }

    /// Directory holding downloaded source files.
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    /// Directory holding exported tracks.
    pub fn tracks_dir(&self) -> PathBuf {
        self.root.join("tracks")
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join("metadata.json")
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join("report.json")
    }

    pub fn names_path(&self) -> PathBuf {
        self.root.join("names.json")
    }

    /// Default trash root for the output directory this item lives in.
    pub fn default_trash_root(&self) -> PathBuf {
        self.root
            .parent()
            .map(|p| p.join(".trash"))
            .unwrap_or_else(|| PathBuf::from(".trash"))
    }
}

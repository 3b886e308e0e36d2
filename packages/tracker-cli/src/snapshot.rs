//! Append-only roster snapshots.
//!
//! Every sync writes a new timestamped JSON file; snapshots are immutable
//! historical records and are never rewritten. Discovery is by filename
//! convention only, there is no index or manifest.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use meetup_client::Member;

pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Persist a roster as `<group>-results-<ISO-8601 seconds>.json`.
    ///
    /// Member order is written exactly as retrieved; consumers re-sort
    /// explicitly instead of relying on storage order.
    pub fn write(
        &self,
        group: &str,
        taken_at: DateTime<Local>,
        members: &[Member],
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create data directory {}", self.dir.display()))?;

        let filename = format!(
            "{}-results-{}.json",
            group,
            taken_at.format("%Y-%m-%dT%H:%M:%S")
        );
        let path = self.dir.join(filename);
        if path.exists() {
            bail!("snapshot {} already exists", path.display());
        }

        let json = serde_json::to_string(members).context("failed to serialize roster")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, path: &Path) -> Result<Vec<Member>> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))
    }
}

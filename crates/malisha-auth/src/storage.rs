//! Storage adapters for the persisted session snapshot.
//!
//! Snapshots are stored as JSON under the fixed key [`STORAGE_KEY`]. A
//! snapshot that cannot be read or parsed is treated as absent: the adapter
//! logs a warning and the client starts anonymous.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::session::SessionSnapshot;

/// Key under which the session snapshot is persisted.
pub const STORAGE_KEY: &str = "malisha-auth-storage";

pub trait SessionStorage {
    /// Loads the last saved snapshot, if any.
    fn load(&self) -> Option<SessionSnapshot>;

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()>;
}

fn parse_snapshot(raw: &str, source: &str) -> Option<SessionSnapshot> {
    match serde_json::from_str(raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(source = %source, error = %e, "Discarding corrupt session snapshot");
            None
        }
    }
}

/// Keeps the serialized snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    raw: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with raw contents, as another process left them.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<SessionSnapshot> {
        self.raw
            .as_deref()
            .and_then(|raw| parse_snapshot(raw, STORAGE_KEY))
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.raw = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }
}

/// Persists the snapshot as `<dir>/malisha-auth-storage.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Option<SessionSnapshot> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_snapshot(&raw, &self.path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session snapshot");
                None
            }
        }
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

use aibridge_core::Turn;
use chrono::TimeDelta;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};

/// Append-only conversation log backed by a single JSON file.
///
/// Every append rewrites the whole array through a temp file and a rename,
/// so readers only ever see a complete transcript.
#[derive(Debug)]
pub struct TranscriptStore {
    path: PathBuf,
    turns: Vec<Turn>,
}

impl TranscriptStore {
    /// Open the store, falling back to an empty transcript if the file
    /// cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let turns = match Self::load(&path) {
            Ok(turns) => {
                info!("Loaded {} turns from {}", turns.len(), path.display());
                turns
            }
            Err(e) => {
                warn!("Could not load transcript, starting empty: {e}");
                Vec::new()
            }
        };

        Self { path, turns }
    }

    /// Read a transcript file. A missing file is an empty transcript; a file
    /// with any malformed entry is rejected as a whole.
    pub fn load(path: &Path) -> Result<Vec<Turn>> {
        if !path.exists() {
            debug!("No transcript at {}", path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| Error::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Record a turn and flush the full transcript.
    ///
    /// The turn stays in memory even when the flush fails, so the next
    /// append retries with the complete history.
    pub fn append(&mut self, mut turn: Turn) -> Result<()> {
        if let Some(last) = self.turns.last() {
            if turn.timestamp <= last.timestamp {
                turn.timestamp = last.timestamp + TimeDelta::microseconds(1);
            }
        }

        self.turns.push(turn);

        if let Err(e) = self.save() {
            error!("{e}");
            return Err(e);
        }

        debug!("Saved {} turns to {}", self.turns.len(), self.path.display());
        Ok(())
    }

    fn save(&self) -> Result<()> {
        write_atomic(&self.path, &self.turns).map_err(|e| Error::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_atomic(path: &Path, turns: &[Turn]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(turns)?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = write_and_rename(&tmp_path, path, json.as_bytes());
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_and_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)
}

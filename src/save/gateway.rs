//! Save persistence - a single JSON slot with structural validation
//!
//! Save failures are the caller's problem to log and survive; load
//! failures of any kind collapse to `None` so a corrupt slot degrades
//! into "no save" rather than a crash.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::save::data::{LoadedRun, RunState, SaveDocument, SAVE_VERSION};

/// Errors that can occur while writing the save slot
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed-path persistence for the single save slot
#[derive(Debug, Clone)]
pub struct SaveGateway {
    path: PathBuf,
}

impl SaveGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize and overwrite the slot
    pub fn save(&self, run: &RunState) -> Result<(), SaveError> {
        let doc = SaveDocument {
            schema_version: SAVE_VERSION,
            run: run.clone(),
        };
        let json = serde_json::to_string(&doc)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Wrote save");
        Ok(())
    }

    /// Read and validate the slot. Absent, empty, unparseable, or
    /// structurally invalid saves all read as `None`.
    pub fn load(&self) -> Option<LoadedRun> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return None,
        };
        if content.trim().is_empty() {
            tracing::warn!(path = %self.path.display(), "Save file is empty");
            return None;
        }
        let doc: SaveDocument = match serde_json::from_str(&content) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Save file is unreadable");
                return None;
            }
        };
        Self::validate(doc)
    }

    /// Structural validation: a payload without a plausible world is a
    /// pre-schema or corrupted save even if it parsed.
    fn validate(doc: SaveDocument) -> Option<LoadedRun> {
        if doc.schema_version != SAVE_VERSION {
            tracing::warn!(
                found = doc.schema_version,
                expected = SAVE_VERSION,
                "Save has an incompatible schema version"
            );
            return None;
        }
        let Some(mut world) = doc.run.world else {
            tracing::warn!("Save has no world payload");
            return None;
        };
        if world.width == 0 || world.height == 0 {
            tracing::warn!(world.width, world.height, "Save world has degenerate dimensions");
            return None;
        }
        if world.terrain.is_empty() {
            tracing::warn!("Save world has no terrain");
            return None;
        }
        if world.terrain.len() != (world.width as usize) * (world.height as usize) {
            tracing::warn!(
                cells = world.terrain.len(),
                world.width,
                world.height,
                "Save terrain does not match its dimensions"
            );
            return None;
        }
        // Repair out-of-range node amounts rather than rejecting the run
        for node in &mut world.nodes {
            node.amount = node.amount.clamp(0.0, node.max_amount);
        }
        Some(LoadedRun {
            tick: doc.run.tick,
            player: doc.run.player,
            world,
        })
    }

    pub fn has_save(&self) -> bool {
        self.path.exists()
    }

    /// Remove the slot; missing files are fine
    pub fn delete(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Deleted save"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Could not delete save")
            }
        }
    }
}

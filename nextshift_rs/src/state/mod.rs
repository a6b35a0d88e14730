//! Migration bookkeeping persisted under `<project>/.migration/`.
//!
//! Two JSON documents live there: `progress.json` (phase tracking) and
//! `errors.json` (the migration error log). Both are rewritten whole on
//! every change.

pub mod errors;
pub mod progress;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result, read_to_string};

pub use errors::{ErrorDraft, MigrationError};
pub use progress::{DEFAULT_PHASES, MigrationState, PhaseState, PhaseStatus};

pub const MIGRATION_DIR: &str = ".migration";
pub const PROGRESS_FILE: &str = "progress.json";
pub const ERRORS_FILE: &str = "errors.json";

/// Handle on the state directory of one project.
#[derive(Clone, Debug)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            root: project_root.into(),
        }
    }

    pub fn dir(&self) -> PathBuf {
        self.root.join(MIGRATION_DIR)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.dir().join(PROGRESS_FILE)
    }

    pub fn errors_path(&self) -> PathBuf {
        self.dir().join(ERRORS_FILE)
    }

    /// `Ok(None)` when the document does not exist yet.
    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        let raw = match read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "state written");
        Ok(())
    }
}


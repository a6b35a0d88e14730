//! Migration error log (`errors.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StateStore;
use crate::analyzer::Severity;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationError {
    pub id: String,
    pub phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
}

/// An entry about to be logged. Missing fields are filled in by
/// [`StateStore::log_error`].
#[derive(Clone, Debug)]
pub struct ErrorDraft {
    pub id: Option<String>,
    pub phase: String,
    pub file: Option<String>,
    pub message: String,
    pub severity: Severity,
    pub timestamp: Option<DateTime<Utc>>,
    pub resolved: Option<bool>,
}

impl ErrorDraft {
    pub fn new(phase: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: None,
            phase: phase.into(),
            file: None,
            message: message.into(),
            severity,
            timestamp: None,
            resolved: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    fn complete(self) -> MigrationError {
        MigrationError {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            phase: self.phase,
            file: self.file,
            message: self.message,
            severity: self.severity,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            resolved: self.resolved.unwrap_or(false),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ErrorLog {
    #[serde(default)]
    errors: Vec<MigrationError>,
}

impl StateStore {
    /// Every logged entry, oldest first. Empty when nothing was logged yet.
    pub fn errors(&self) -> Result<Vec<MigrationError>> {
        Ok(self
            .read_json::<ErrorLog>(&self.errors_path())?
            .unwrap_or_default()
            .errors)
    }

    pub fn log_error(&self, draft: ErrorDraft) -> Result<MigrationError> {
        let mut errors = self.errors()?;
        let entry = draft.complete();
        errors.push(entry.clone());
        self.write_json(&self.errors_path(), &ErrorLog { errors })?;
        Ok(entry)
    }

    /// Mark an entry resolved. Returns `false` (and writes nothing) when
    /// there is no log or no entry with that id.
    pub fn resolve_error(&self, id: &str) -> Result<bool> {
        let Some(mut log) = self.read_json::<ErrorLog>(&self.errors_path())? else {
            return Ok(false);
        };
        let Some(entry) = log.errors.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.resolved = true;
        self.write_json(&self.errors_path(), &log)?;
        Ok(true)
    }
}

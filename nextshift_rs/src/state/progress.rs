//! Phase tracking (`progress.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StateStore;
use crate::error::{Error, Result};

pub const STATE_VERSION: &str = "1.0.0";

pub const DEFAULT_PHASES: [&str; 7] = [
    "assessment",
    "planning",
    "dependencies",
    "routes",
    "components",
    "data-layer",
    "validation",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseState {
    pub name: String,
    pub status: PhaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationState {
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub phases: Vec<PhaseState>,
}

impl MigrationState {
    fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            started_at: now,
            updated_at: now,
            phases: DEFAULT_PHASES
                .iter()
                .map(|name| PhaseState {
                    name: (*name).to_string(),
                    status: PhaseStatus::Pending,
                    started_at: None,
                    completed_at: None,
                })
                .collect(),
        }
    }

    /// First phase that still needs work.
    pub fn resume_point(&self) -> Option<&str> {
        self.phases
            .iter()
            .find(|p| p.status != PhaseStatus::Completed)
            .map(|p| p.name.as_str())
    }
}

impl StateStore {
    /// Start (or restart) tracking with every phase pending.
    pub fn init(&self) -> Result<MigrationState> {
        let state = MigrationState::fresh(Utc::now());
        self.write_json(&self.progress_path(), &state)?;
        Ok(state)
    }

    pub fn read(&self) -> Result<Option<MigrationState>> {
        self.read_json(&self.progress_path())
    }

    pub fn update_phase(&self, phase: &str, status: PhaseStatus) -> Result<MigrationState> {
        let path = self.progress_path();
        let mut state = self
            .read()?
            .ok_or_else(|| Error::StateNotInitialized { path: path.clone() })?;

        let now = Utc::now();
        let entry = state
            .phases
            .iter_mut()
            .find(|p| p.name == phase)
            .ok_or_else(|| Error::UnknownPhase(phase.to_string()))?;
        entry.status = status;
        match status {
            PhaseStatus::InProgress => entry.started_at = Some(now),
            PhaseStatus::Completed => entry.completed_at = Some(now),
            PhaseStatus::Pending | PhaseStatus::Failed => {}
        }
        state.updated_at = now;

        self.write_json(&path, &state)?;
        Ok(state)
    }

    /// `None` when tracking was never started or every phase is done.
    pub fn resume_point(&self) -> Result<Option<String>> {
        Ok(self
            .read()?
            .and_then(|state| state.resume_point().map(str::to_string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, StateStore) {
        let dir = TempDir::new().expect("tempdir");
        let store = StateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn init_writes_pending_phases() {
        let (_dir, store) = store();
        let state = store.init().expect("init");
        assert_eq!(state.version, "1.0.0");
        assert_eq!(state.phases.len(), 7);
        assert!(state.phases.iter().all(|p| p.status == PhaseStatus::Pending));
        assert!(store.progress_path().exists());

        let read = store.read().expect("read").expect("state");
        assert_eq!(read, state);
    }

    #[test]
    fn read_without_init_is_none() {
        let (_dir, store) = store();
        assert!(store.read().expect("read").is_none());
        assert_eq!(store.resume_point().expect("resume"), None);
    }

    #[test]
    fn update_stamps_timestamps() {
        let (_dir, store) = store();
        store.init().expect("init");

        let state = store
            .update_phase("assessment", PhaseStatus::InProgress)
            .expect("update");
        let phase = &state.phases[0];
        assert_eq!(phase.status, PhaseStatus::InProgress);
        assert!(phase.started_at.is_some());
        assert!(phase.completed_at.is_none());

        let state = store
            .update_phase("assessment", PhaseStatus::Completed)
            .expect("update");
        assert!(state.phases[0].completed_at.is_some());
        assert_eq!(store.resume_point().expect("resume").as_deref(), Some("planning"));
    }

    #[test]
    fn update_errors() {
        let (_dir, store) = store();
        let err = store
            .update_phase("assessment", PhaseStatus::Completed)
            .expect_err("not initialized");
        assert!(matches!(err, Error::StateNotInitialized { .. }));

        store.init().expect("init");
        let err = store
            .update_phase("deploy", PhaseStatus::Completed)
            .expect_err("unknown phase");
        assert!(matches!(err, Error::UnknownPhase(ref name) if name == "deploy"));
    }

    #[test]
    fn all_completed_has_no_resume_point() {
        let (_dir, store) = store();
        store.init().expect("init");
        for phase in DEFAULT_PHASES {
            store
                .update_phase(phase, PhaseStatus::Completed)
                .expect("update");
        }
        assert_eq!(store.resume_point().expect("resume"), None);
    }

    #[test]
    fn serialized_field_names() {
        let (_dir, store) = store();
        store.init().expect("init");
        store
            .update_phase("data-layer", PhaseStatus::InProgress)
            .expect("update");
        let raw = std::fs::read_to_string(store.progress_path()).expect("read");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert!(json.get("startedAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["phases"][5]["status"], "in-progress");
        assert!(json["phases"][5].get("startedAt").is_some());
        assert!(json["phases"][0].get("startedAt").is_none());
    }
}

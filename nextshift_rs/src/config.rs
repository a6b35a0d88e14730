//! Configuration file support for nextshift.
//!
//! Loads optional `.migration/config.toml` from the project root.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::fs_utils::ScanOptions;
use crate::state::MIGRATION_DIR;

pub const CONFIG_FILE: &str = "config.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    pub scan: ScanConfig,
    pub tables: TablesConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names skipped in addition to `node_modules`.
    /// Example: `["dist", "generated"]`
    pub ignore_dirs: Vec<String>,
}

/// Replacements for the bundled data tables. Relative paths resolve against
/// the project root.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    pub transform_rules: Option<PathBuf>,
    pub known_replacements: Option<PathBuf>,
}

impl ShiftConfig {
    /// Load config from `.migration/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(MIGRATION_DIR).join(CONFIG_FILE);
        let mut config = Self::load_from_path(&config_path);
        config.tables.resolve_against(root);
        config
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        let mut options = ScanOptions::default();
        for dir in &self.scan.ignore_dirs {
            if !options.ignore_dirs.contains(dir) {
                options.ignore_dirs.push(dir.clone());
            }
        }
        options
    }
}

impl TablesConfig {
    fn resolve_against(&mut self, root: &Path) {
        for path in [&mut self.transform_rules, &mut self.known_replacements]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }
}

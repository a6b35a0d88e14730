//! Static data tables: import transform rules and known package replacements.
//!
//! Both ship inside the binary and can be swapped for project files through
//! `[tables]` in `.migration/config.toml`. A table that fails to load is
//! fatal; there is no fallback.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::TablesConfig;
use crate::error::{Error, Result, read_to_string};

const BUNDLED_TRANSFORM_RULES: &str = include_str!("../data/transform-rules.json");
const BUNDLED_KNOWN_REPLACEMENTS: &str = include_str!("../data/known-replacements.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Remove,
}

/// What to do with one import specifier.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRule {
    pub replacement: Option<String>,
    #[serde(default)]
    pub action: Option<RuleAction>,
    /// Named imports to rename: old name -> new name.
    #[serde(default)]
    pub named_exports: Option<HashMap<String, String>>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TransformRule {
    pub fn removes(&self) -> bool {
        self.action == Some(RuleAction::Remove)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransformRules {
    pub imports: HashMap<String, TransformRule>,
}

impl TransformRules {
    pub fn bundled() -> Result<Self> {
        parse_table("transform-rules.json", BUNDLED_TRANSFORM_RULES)
    }

    pub fn load(config: &TablesConfig) -> Result<Self> {
        match &config.transform_rules {
            Some(path) => load_table(path),
            None => Self::bundled(),
        }
    }

    pub fn get(&self, specifier: &str) -> Option<&TransformRule> {
        self.imports.get(specifier)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Replacement {
    pub replacement: Option<String>,
    pub note: String,
}

/// Package name -> suggested replacement.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct KnownReplacements(pub HashMap<String, Replacement>);

impl KnownReplacements {
    pub fn bundled() -> Result<Self> {
        parse_table("known-replacements.json", BUNDLED_KNOWN_REPLACEMENTS)
    }

    pub fn load(config: &TablesConfig) -> Result<Self> {
        match &config.known_replacements {
            Some(path) => load_table(path),
            None => Self::bundled(),
        }
    }

    pub fn get(&self, package: &str) -> Option<&Replacement> {
        self.0.get(package)
    }
}

fn parse_table<T: for<'de> Deserialize<'de>>(name: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::Table {
        name: name.to_string(),
        source,
    })
}

fn load_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = read_to_string(path)?;
    let table = parse_table(&path.display().to_string(), &text)?;
    debug!(path = %path.display(), "loaded data table override");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bundled_tables_parse() {
        let rules = TransformRules::bundled().expect("rules");
        assert!(rules.get("next/head").is_some_and(TransformRule::removes));
        let router = rules.get("next/router").expect("router rule");
        assert_eq!(router.replacement.as_deref(), Some("next/navigation"));
        assert!(!router.removes());
        let auth = rules.get("next-auth/client").expect("auth rule");
        assert_eq!(
            auth.named_exports
                .as_ref()
                .and_then(|m| m.get("Provider"))
                .map(String::as_str),
            Some("SessionProvider")
        );

        let known = KnownReplacements::bundled().expect("replacements");
        let seo = known.get("next-seo").expect("next-seo");
        assert_eq!(seo.replacement.as_deref(), Some("@next/metadata"));
        assert!(known.get("next-redux-wrapper").is_some_and(|r| r.replacement.is_none()));
    }

    #[test]
    fn override_path_replaces_bundled_table() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("rules.json");
        std::fs::write(&path, r#"{"imports":{"legacy-lib":{"replacement":"modern-lib"}}}"#)
            .expect("write rules");
        let config = TablesConfig {
            transform_rules: Some(path),
            known_replacements: None,
        };
        let rules = TransformRules::load(&config).expect("rules");
        assert!(rules.get("next/router").is_none());
        assert!(rules.get("legacy-lib").is_some());
    }

    #[test]
    fn malformed_table_is_fatal() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("known.json");
        std::fs::write(&path, "{ not json").expect("write");
        let config = TablesConfig {
            transform_rules: None,
            known_replacements: Some(path),
        };
        let err = KnownReplacements::load(&config).unwrap_err();
        assert!(matches!(err, Error::Table { .. }));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = parse_table::<TransformRules>(
            "inline",
            r#"{"imports":{"a":{"replacement":null,"action":"explode"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Table { .. }));
    }
}

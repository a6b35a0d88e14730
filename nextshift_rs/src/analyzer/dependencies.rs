//! `package.json` dependency classification.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result, read_to_string};
use crate::tables::KnownReplacements;

use super::count;

const CORE_PACKAGES: &[&str] = &["next", "react", "react-dom"];

const TYPES_PREFIX: &str = "@types/";

const DEV_TOOLS: &[&str] = &[
    "typescript",
    "eslint",
    "prettier",
    "vitest",
    "jest",
    "ts-node",
    "tsx",
    "webpack",
    "turbopack",
    "postcss",
    "tailwindcss",
    "autoprefixer",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencySection {
    Dependencies,
    DevDependencies,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyClass {
    Core,
    Replaceable,
    DevTool,
    Unknown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyInfo {
    pub name: String,
    pub version: String,
    pub source: DependencySection,
    pub classification: DependencyClass,
    /// Only set for replaceable packages; the inner value may be `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySummary {
    pub total: usize,
    pub core: usize,
    pub replaceable: usize,
    pub dev_tool: usize,
    pub unknown: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct DependencyAnalysis {
    pub dependencies: Vec<DependencyInfo>,
    pub summary: DependencySummary,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    dependencies: Option<Map<String, Value>>,
    #[serde(default)]
    dev_dependencies: Option<Map<String, Value>>,
}

/// Core beats the replacement table, which beats the dev-tool heuristics.
pub fn classify(name: &str, known: &KnownReplacements) -> DependencyClass {
    if CORE_PACKAGES.contains(&name) {
        DependencyClass::Core
    } else if known.get(name).is_some() {
        DependencyClass::Replaceable
    } else if name.starts_with(TYPES_PREFIX) || DEV_TOOLS.contains(&name) {
        DependencyClass::DevTool
    } else {
        DependencyClass::Unknown
    }
}

fn version_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Classify every entry of `dependencies` then `devDependencies`.
/// A package listed in both sections yields two entries.
pub fn classify_manifest(
    text: &str,
    manifest_path: &Path,
    known: &KnownReplacements,
) -> Result<DependencyAnalysis> {
    let manifest: Manifest = serde_json::from_str(text).map_err(|source| Error::Manifest {
        path: manifest_path.to_path_buf(),
        source,
    })?;

    let mut dependencies = Vec::new();
    let sections = [
        (DependencySection::Dependencies, manifest.dependencies),
        (DependencySection::DevDependencies, manifest.dev_dependencies),
    ];
    for (section, entries) in sections {
        for (name, version) in entries.into_iter().flatten() {
            let classification = classify(&name, known);
            let entry = match classification {
                DependencyClass::Replaceable => known.get(&name),
                _ => None,
            };
            dependencies.push(DependencyInfo {
                version: version_text(&version),
                source: section,
                classification,
                replacement: entry.map(|e| e.replacement.clone()),
                note: entry.map(|e| e.note.clone()),
                name,
            });
        }
    }

    let summary = DependencySummary {
        total: dependencies.len(),
        core: count(&dependencies, |d| d.classification == DependencyClass::Core),
        replaceable: count(&dependencies, |d| d.classification == DependencyClass::Replaceable),
        dev_tool: count(&dependencies, |d| d.classification == DependencyClass::DevTool),
        unknown: count(&dependencies, |d| d.classification == DependencyClass::Unknown),
    };
    Ok(DependencyAnalysis {
        dependencies,
        summary,
    })
}

pub fn analyze_dependencies(
    manifest_path: &Path,
    known: &KnownReplacements,
) -> Result<DependencyAnalysis> {
    let text = read_to_string(manifest_path)?;
    classify_manifest(&text, manifest_path, known)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Replacement;
    use std::collections::HashMap;

    fn known() -> KnownReplacements {
        KnownReplacements::bundled().expect("bundled table")
    }

    #[test]
    fn buckets_follow_precedence() {
        let manifest = r#"{
          "dependencies": { "next": "13.4.0", "next-seo": "^6.0.0", "axios": "^1.4.0" },
          "devDependencies": { "@types/node": "20.0.0", "eslint": "8.0.0", "next": "13.4.0" }
        }"#;
        let analysis =
            classify_manifest(manifest, Path::new("package.json"), &known()).expect("analysis");
        let classes: Vec<_> = analysis
            .dependencies
            .iter()
            .map(|d| (d.name.as_str(), d.source, d.classification))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("next", DependencySection::Dependencies, DependencyClass::Core),
                ("next-seo", DependencySection::Dependencies, DependencyClass::Replaceable),
                ("axios", DependencySection::Dependencies, DependencyClass::Unknown),
                ("@types/node", DependencySection::DevDependencies, DependencyClass::DevTool),
                ("eslint", DependencySection::DevDependencies, DependencyClass::DevTool),
                ("next", DependencySection::DevDependencies, DependencyClass::Core),
            ]
        );
        assert_eq!(
            analysis.summary,
            DependencySummary {
                total: 6,
                core: 2,
                replaceable: 1,
                dev_tool: 2,
                unknown: 1,
            }
        );

        let seo = &analysis.dependencies[1];
        assert_eq!(seo.replacement, Some(Some("@next/metadata".to_string())));
        assert!(seo.note.is_some());
        assert!(analysis.dependencies[0].replacement.is_none());
    }

    #[test]
    fn core_wins_over_replacement_table() {
        let mut table = HashMap::new();
        table.insert(
            "react".to_string(),
            Replacement {
                replacement: Some("preact".to_string()),
                note: "n/a".to_string(),
            },
        );
        assert_eq!(classify("react", &KnownReplacements(table)), DependencyClass::Core);
    }

    #[test]
    fn null_replacement_serializes_as_null() {
        let analysis = classify_manifest(
            r#"{"dependencies":{"next-redux-wrapper":"8.0.0"}}"#,
            Path::new("package.json"),
            &known(),
        )
        .expect("analysis");
        let json = serde_json::to_value(&analysis.dependencies[0]).expect("json");
        assert!(json["replacement"].is_null());
        assert!(json.as_object().is_some_and(|o| o.contains_key("replacement")));
        assert_eq!(json["classification"], "replaceable");
    }

    #[test]
    fn missing_sections_are_empty() {
        let analysis =
            classify_manifest("{}", Path::new("package.json"), &known()).expect("analysis");
        assert_eq!(analysis.summary.total, 0);
    }

    #[test]
    fn invalid_manifest_is_reported() {
        let err = classify_manifest("{", Path::new("package.json"), &known()).unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let err = analyze_dependencies(Path::new("/no/such/package.json"), &known()).unwrap_err();
        assert!(err.is_not_found());
    }
}

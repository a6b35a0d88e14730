//! Dead export detection.
//!
//! Pass 1 collects every named export, pass 2 every named import whose
//! relative specifier resolves to a file. An export nobody imports is dead,
//! unless the framework itself consumes the file (`page`, `layout`, ...) or
//! it is an `index` barrel.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::fs_utils::SOURCE_EXTENSIONS;
use crate::source::SourceSet;
use crate::types::{DeclKind, file_stem};

const FRAMEWORK_FILE_NAMES: &[&str] = &[
    "page",
    "layout",
    "route",
    "loading",
    "error",
    "not-found",
    "template",
    "default",
    "middleware",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadExport {
    pub file_path: String,
    pub export_name: String,
    #[serde(rename = "type")]
    pub kind: DeclKind,
    pub line: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadCodeSummary {
    pub total_exports: usize,
    pub dead_exports: usize,
    pub files_with_dead_code: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadCodeAnalysis {
    pub dead_exports: Vec<DeadExport>,
    pub summary: DeadCodeSummary,
}

/// Drop a recognised source extension, keep anything else.
fn strip_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if SOURCE_EXTENSIONS.contains(&ext) => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

/// Resolve `..` and `.` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Resolve a relative specifier the way the bundler would: extensions first,
/// then `index` files, then the literal path, finally the stripped path.
/// Bare specifiers resolve to nothing.
pub fn resolve_specifier(importing_file: &Path, specifier: &str) -> Option<PathBuf> {
    if !specifier.starts_with('.') {
        return None;
    }
    let dir = importing_file.parent().unwrap_or(Path::new(""));
    let raw = normalize(&dir.join(specifier));
    let stripped = strip_extension(&raw);

    for ext in SOURCE_EXTENSIONS {
        let candidate = with_suffix(&stripped, &format!(".{ext}"));
        if candidate.exists() {
            return Some(candidate);
        }
    }
    for ext in SOURCE_EXTENSIONS {
        let candidate = stripped.join(format!("index.{ext}"));
        if candidate.exists() {
            return Some(candidate);
        }
    }
    if raw.exists() {
        return Some(raw);
    }
    Some(stripped)
}

fn symbol_key(file_without_ext: &Path, name: &str) -> String {
    format!("{}::{}", file_without_ext.display(), name)
}

fn is_framework_file(path: &str) -> bool {
    FRAMEWORK_FILE_NAMES.contains(&file_stem(path).as_str())
}

fn is_index_file(path: &str) -> bool {
    file_stem(path) == "index"
}

fn collect_exports(sources: &SourceSet) -> Vec<DeadExport> {
    sources
        .iter()
        .flat_map(|unit| {
            let file_path = unit.display_path();
            unit.exports.iter().map(move |export| DeadExport {
                file_path: file_path.clone(),
                export_name: export.name.clone(),
                kind: export.kind,
                line: export.line,
            })
        })
        .collect()
}

fn collect_imported_symbols(sources: &SourceSet) -> HashSet<String> {
    let mut imported = HashSet::new();
    for unit in sources.iter() {
        for decl in &unit.imports {
            let Some(resolved) = resolve_specifier(&unit.path, &decl.specifier) else {
                continue;
            };
            let target = strip_extension(&resolved);
            for named in &decl.named {
                imported.insert(symbol_key(&target, &named.name));
            }
        }
    }
    imported
}

pub fn detect_dead_exports(sources: &SourceSet) -> DeadCodeAnalysis {
    let all_exports = collect_exports(sources);
    let imported = collect_imported_symbols(sources);

    let mut dead_exports: Vec<DeadExport> = all_exports
        .iter()
        .filter(|export| !is_framework_file(&export.file_path) && !is_index_file(&export.file_path))
        .filter(|export| {
            let key = symbol_key(&strip_extension(Path::new(&export.file_path)), &export.export_name);
            !imported.contains(&key)
        })
        .cloned()
        .collect();

    dead_exports.sort_by(|a, b| a.file_path.cmp(&b.file_path).then(a.line.cmp(&b.line)));

    let files_with_dead_code = dead_exports
        .iter()
        .map(|d| d.file_path.as_str())
        .collect::<HashSet<_>>()
        .len();

    let summary = DeadCodeSummary {
        total_exports: all_exports.len(),
        dead_exports: dead_exports.len(),
        files_with_dead_code,
    };
    DeadCodeAnalysis {
        dead_exports,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, text).expect("write");
    }

    fn dead_names(analysis: &DeadCodeAnalysis) -> Vec<&str> {
        analysis
            .dead_exports
            .iter()
            .map(|d| d.export_name.as_str())
            .collect()
    }

    #[test]
    fn unreferenced_exports_are_dead() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        write(
            root,
            "lib/utils.ts",
            "export function used() {}\nexport function unused() {}\nexport const LIMIT = 3;\nexport interface Shape { a: number }\n",
        );
        write(
            root,
            "components/Card.tsx",
            "import { used as u, type Shape } from '../lib/utils';\nexport default function Card() { return null }\n",
        );

        let sources = SourceSet::open(root).expect("load");
        let analysis = detect_dead_exports(&sources);
        assert_eq!(dead_names(&analysis), vec!["unused", "LIMIT"]);
        assert_eq!(analysis.dead_exports[0].kind, DeclKind::Function);
        assert_eq!(analysis.dead_exports[0].line, 2);
        assert_eq!(analysis.dead_exports[1].kind, DeclKind::Variable);
        assert_eq!(
            analysis.summary,
            DeadCodeSummary {
                total_exports: 4,
                dead_exports: 2,
                files_with_dead_code: 1,
            }
        );
    }

    #[test]
    fn overloaded_export_is_reported_once() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        write(
            root,
            "lib/format.ts",
            "export function format(v: string): string;\nexport function format(v: number): string;\nexport function format(v: any) { return String(v); }\n",
        );

        let sources = SourceSet::open(root).expect("load");
        let analysis = detect_dead_exports(&sources);
        assert_eq!(dead_names(&analysis), vec!["format"]);
        assert_eq!(analysis.dead_exports[0].line, 3);
        assert_eq!(analysis.summary.total_exports, 1);
    }

    #[test]
    fn framework_and_index_files_are_exempt() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        write(root, "app/page.tsx", "export const metadata = {};\nexport default function P() { return null }\n");
        write(root, "app/layout.tsx", "export const revalidate = 60;\n");
        write(root, "lib/index.ts", "export const barrel = 1;\n");
        write(root, "middleware.ts", "export const config = {};\n");

        let sources = SourceSet::open(root).expect("load");
        let analysis = detect_dead_exports(&sources);
        assert!(analysis.dead_exports.is_empty());
        assert_eq!(analysis.summary.total_exports, 4);
    }

    #[test]
    fn directory_imports_resolve_to_index() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        write(root, "lib/hooks/index.ts", "export const useThing = () => 1;\n");
        write(root, "lib/hooks/useOther.ts", "export const useOther = () => 2;\n");
        write(
            root,
            "app/widget.tsx",
            "import { useThing } from '../lib/hooks';\nimport { useOther } from '../lib/hooks/useOther.ts';\n",
        );

        let sources = SourceSet::open(root).expect("load");
        let analysis = detect_dead_exports(&sources);
        assert!(dead_names(&analysis).is_empty());
    }

    #[test]
    fn bare_specifiers_do_not_resolve() {
        assert!(resolve_specifier(Path::new("/p/a.ts"), "react").is_none());
        assert!(resolve_specifier(Path::new("/p/a.ts"), "@/lib/utils").is_none());
    }

    #[test]
    fn unresolved_relative_specifier_falls_back_to_stripped_path() {
        let resolved = resolve_specifier(Path::new("/p/src/a.ts"), "../gone/thing.js");
        assert_eq!(resolved, Some(PathBuf::from("/p/gone/thing")));
    }
}

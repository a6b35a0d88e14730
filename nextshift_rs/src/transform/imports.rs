//! Rule-driven import rewriting.
//!
//! Each import declaration is looked up in the transform table and either
//! left alone, retargeted to a new module (optionally renaming named
//! bindings) or removed. Edits are spliced into the original text, so
//! formatting outside the touched ranges is preserved byte for byte.

use serde::Serialize;

use crate::analyzer::count;
use crate::tables::TransformRules;
use crate::types::{ImportDecl, SourceUnit};

use super::{TextEdit, apply_edits};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportAction {
    Rewrite,
    Remove,
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportChange {
    pub original: String,
    /// `None` when the import is removed.
    pub replacement: Option<String>,
    pub line: usize,
    pub action: ImportAction,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub rewritten: usize,
    pub removed: usize,
    pub unchanged: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportTransform {
    pub code: String,
    pub changes: Vec<ImportChange>,
    pub summary: ImportSummary,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TransformOptions {
    /// Report changes without touching the text.
    pub dry_run: bool,
}

/// Statement range plus its line terminator, if any.
fn removal_range(text: &str, decl: &ImportDecl) -> std::ops::Range<usize> {
    let rest = &text[decl.span.end..];
    let trailing = if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    };
    decl.span.start..decl.span.end + trailing
}

pub fn transform_imports(
    unit: &SourceUnit,
    rules: &TransformRules,
    options: TransformOptions,
) -> ImportTransform {
    let mut changes = Vec::with_capacity(unit.imports.len());
    let mut edits = Vec::new();

    for decl in &unit.imports {
        let specifier = decl.specifier.as_str();
        let Some(rule) = rules.get(specifier) else {
            changes.push(ImportChange {
                original: specifier.to_string(),
                replacement: Some(specifier.to_string()),
                line: decl.line,
                action: ImportAction::Unchanged,
            });
            continue;
        };

        if rule.removes() {
            changes.push(ImportChange {
                original: specifier.to_string(),
                replacement: None,
                line: decl.line,
                action: ImportAction::Remove,
            });
            if !options.dry_run {
                edits.push(TextEdit {
                    range: removal_range(&unit.text, decl),
                    text: String::new(),
                });
            }
            continue;
        }

        let replacement = rule.replacement.as_deref().unwrap_or(specifier);

        if let Some(renames) = rule.named_exports.as_ref().filter(|_| !options.dry_run) {
            for named in &decl.named {
                if let Some(mapped) = renames.get(&named.name).filter(|m| **m != named.name) {
                    edits.push(TextEdit {
                        range: named.name_span.clone(),
                        text: mapped.clone(),
                    });
                }
            }
        }

        let action = if replacement != specifier {
            if !options.dry_run {
                edits.push(TextEdit {
                    range: decl.specifier_span.clone(),
                    text: replacement.to_string(),
                });
            }
            ImportAction::Rewrite
        } else {
            ImportAction::Unchanged
        };
        changes.push(ImportChange {
            original: specifier.to_string(),
            replacement: Some(replacement.to_string()),
            line: decl.line,
            action,
        });
    }

    let code = if edits.is_empty() {
        unit.text.clone()
    } else {
        apply_edits(&unit.text, edits)
    };

    let summary = ImportSummary {
        total: changes.len(),
        rewritten: count(&changes, |c| c.action == ImportAction::Rewrite),
        removed: count(&changes, |c| c.action == ImportAction::Remove),
        unchanged: count(&changes, |c| c.action == ImportAction::Unchanged),
    };
    ImportTransform {
        code,
        changes,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_source;
    use std::path::Path;

    const PAGE: &str = "import Head from 'next/head';\r\nimport { useRouter } from \"next/router\";\nimport Image from 'next/legacy/image';\nimport Link from 'next/link';\nimport { Provider as AuthProvider, signIn } from 'next-auth/client';\nimport { Provider } from 'next-auth/client';\nimport axios from 'axios';\n\nexport default function Page() { return null }\n";

    fn run(text: &str, dry_run: bool) -> ImportTransform {
        let unit = parse_source(text, Path::new("pages/index.tsx")).expect("parse");
        let rules = TransformRules::bundled().expect("rules");
        transform_imports(&unit, &rules, TransformOptions { dry_run })
    }

    #[test]
    fn rewrites_removes_and_renames() {
        let result = run(PAGE, false);
        let actions: Vec<_> = result.changes.iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![
                ImportAction::Remove,
                ImportAction::Rewrite,
                ImportAction::Rewrite,
                ImportAction::Unchanged,
                ImportAction::Rewrite,
                ImportAction::Rewrite,
                ImportAction::Unchanged,
            ]
        );
        assert_eq!(
            result.code,
            "import { useRouter } from \"next/navigation\";\nimport Image from 'next/image';\nimport Link from 'next/link';\nimport { SessionProvider as AuthProvider, signIn } from 'next-auth/react';\nimport { SessionProvider } from 'next-auth/react';\nimport axios from 'axios';\n\nexport default function Page() { return null }\n"
        );
        assert_eq!(
            result.summary,
            ImportSummary {
                total: 7,
                rewritten: 4,
                removed: 1,
                unchanged: 2,
            }
        );
        assert_eq!(result.changes[0].replacement, None);
        assert_eq!(result.changes[3].replacement.as_deref(), Some("next/link"));
    }

    #[test]
    fn dry_run_leaves_text_untouched() {
        let result = run(PAGE, true);
        assert_eq!(result.code, PAGE);
        assert_eq!(result.summary.removed, 1);
        assert_eq!(result.summary.rewritten, 4);
    }

    #[test]
    fn rewriting_is_idempotent() {
        let first = run(PAGE, false);
        let second = run(&first.code, false);
        assert_eq!(second.code, first.code);
        assert!(
            second
                .changes
                .iter()
                .all(|c| c.action == ImportAction::Unchanged)
        );
    }

    #[test]
    fn removed_specifier_disappears() {
        let result = run("import Head from 'next/head';\nexport const x = 1;\n", false);
        assert!(!result.code.contains("next/head"));
        assert_eq!(result.code, "export const x = 1;\n");
        assert_eq!(result.summary.removed, 1);
    }
}

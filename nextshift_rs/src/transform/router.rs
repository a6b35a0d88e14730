//! Legacy router usage report.
//!
//! Plain text scanning: each pattern is matched over the whole file and
//! every hit is reported with its position. Patterns are not deduplicated
//! against each other.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::analyzer::{LEGACY_ROUTER_MODULE, count};
use crate::regexes::regex;
use crate::types::SourceUnit;

use super::line_column;

struct RouterPattern {
    regex: &'static str,
    pattern: &'static str,
    replacement: &'static str,
    breaking: bool,
    note: &'static str,
    suggests_import: Option<&'static str>,
}

const SAME_API_NOTE: &str = "Compatible with App Router's useRouter";

const ROUTER_PATTERNS: &[RouterPattern] = &[
    RouterPattern {
        regex: r"router\.push\(",
        pattern: "router.push",
        replacement: "router.push() (from next/navigation, same API)",
        breaking: false,
        note: SAME_API_NOTE,
        suggests_import: None,
    },
    RouterPattern {
        regex: r"router\.replace\(",
        pattern: "router.replace",
        replacement: "router.replace() (from next/navigation, same API)",
        breaking: false,
        note: SAME_API_NOTE,
        suggests_import: None,
    },
    RouterPattern {
        regex: r"router\.back\(",
        pattern: "router.back",
        replacement: "router.back() (from next/navigation, same API)",
        breaking: false,
        note: SAME_API_NOTE,
        suggests_import: None,
    },
    RouterPattern {
        regex: r"router\.query\b",
        pattern: "router.query",
        replacement: "useSearchParams() for query string, useParams() for dynamic route params",
        breaking: true,
        note: "router.query is removed in App Router",
        suggests_import: Some("useSearchParams"),
    },
    RouterPattern {
        regex: r"router\.pathname\b",
        pattern: "router.pathname",
        replacement: "usePathname() from next/navigation",
        breaking: true,
        note: "router.pathname is removed in App Router",
        suggests_import: Some("usePathname"),
    },
    RouterPattern {
        regex: r"router\.asPath\b",
        pattern: "router.asPath",
        replacement: "usePathname() from next/navigation",
        breaking: true,
        note: "router.asPath is removed in App Router",
        suggests_import: Some("usePathname"),
    },
    RouterPattern {
        regex: r"router\.isReady\b",
        pattern: "router.isReady",
        replacement: "Removed: App Router components are always ready",
        breaking: true,
        note: "isReady is not needed in App Router",
        suggests_import: None,
    },
    RouterPattern {
        regex: r"router\.events\b",
        pattern: "router.events",
        replacement: "Use usePathname() + useSearchParams() in useEffect",
        breaking: true,
        note: "Router events are removed in App Router",
        suggests_import: Some("usePathname"),
    },
    RouterPattern {
        regex: r"router\.locale\b",
        pattern: "router.locale",
        replacement: "Use middleware or next-intl for i18n",
        breaking: true,
        note: "Built-in i18n routing is removed in App Router",
        suggests_import: None,
    },
    RouterPattern {
        regex: r"router\.isFallback\b",
        pattern: "router.isFallback",
        replacement: "Use loading.tsx for fallback states",
        breaking: true,
        note: "isFallback is removed; use loading.tsx or Suspense",
        suggests_import: None,
    },
    RouterPattern {
        regex: r"withRouter\b",
        pattern: "withRouter",
        replacement: "Use useRouter(), usePathname(), useSearchParams() hooks directly",
        breaking: true,
        note: "withRouter HOC is removed; use hooks instead",
        suggests_import: Some("useRouter"),
    },
];

fn compiled_patterns() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| ROUTER_PATTERNS.iter().map(|p| regex(p.regex)).collect())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterUsage {
    pub pattern: String,
    pub line: usize,
    pub column: usize,
    pub replacement: String,
    pub breaking: bool,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_import: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RouterSummary {
    pub total: usize,
    pub breaking: usize,
    pub compatible: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterAnalysis {
    pub usages: Vec<RouterUsage>,
    pub has_router_import: bool,
    pub suggested_imports: Vec<String>,
    pub summary: RouterSummary,
}

pub fn analyze_router(unit: &SourceUnit) -> RouterAnalysis {
    let text = unit.text.as_str();
    let has_router_import = unit.imports_from(LEGACY_ROUTER_MODULE);

    let mut usages = Vec::new();
    let mut suggested_imports: Vec<String> = Vec::new();
    let mut suggest = |name: &str| {
        if !suggested_imports.iter().any(|s| s == name) {
            suggested_imports.push(name.to_string());
        }
    };

    for (entry, re) in ROUTER_PATTERNS.iter().zip(compiled_patterns()) {
        for found in re.find_iter(text) {
            let (line, column) = line_column(text, found.start());
            usages.push(RouterUsage {
                pattern: entry.pattern.to_string(),
                line,
                column,
                replacement: entry.replacement.to_string(),
                breaking: entry.breaking,
                note: entry.note.to_string(),
                suggested_import: entry.suggests_import.map(str::to_string),
            });
            if let Some(hook) = entry.suggests_import {
                suggest(hook);
            }
        }
    }

    if has_router_import {
        suggest("useRouter");
    }

    let breaking = count(&usages, |u| u.breaking);
    let summary = RouterSummary {
        total: usages.len(),
        breaking,
        compatible: usages.len() - breaking,
    };
    RouterAnalysis {
        usages,
        has_router_import,
        suggested_imports,
        summary,
    }
}

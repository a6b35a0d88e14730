//! Post-migration validation of an `app/` directory.

use serde::Serialize;

use crate::regexes::regex_client_only_tokens;
use crate::source::SourceSet;
use crate::types::SourceUnit;

use super::{LEGACY_DATA_FETCHERS, LEGACY_ROUTER_MODULE, Severity, count};

/// Validation rule identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationRule {
    NoNextRouter,
    NoOldDataFetching,
    MissingClientDirective,
}

impl ValidationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoNextRouter => "no-next-router",
            Self::NoOldDataFetching => "no-old-data-fetching",
            Self::MissingClientDirective => "missing-client-directive",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NoNextRouter | Self::NoOldDataFetching => Severity::Error,
            Self::MissingClientDirective => Severity::Warning,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub file_path: String,
    pub line: usize,
    pub rule: String,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn new(unit: &SourceUnit, line: usize, rule: ValidationRule, message: String) -> Self {
        Self {
            file_path: unit.display_path(),
            line,
            rule: rule.as_str().to_string(),
            severity: rule.severity(),
            message,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub passed: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
    pub files_checked: usize,
    pub summary: ValidationSummary,
}

fn check_unit(unit: &SourceUnit, issues: &mut Vec<ValidationIssue>) {
    for decl in unit.imports.iter().filter(|d| d.specifier == LEGACY_ROUTER_MODULE) {
        issues.push(ValidationIssue::new(
            unit,
            decl.line,
            ValidationRule::NoNextRouter,
            "Import from 'next/router' is not compatible with App Router. Use 'next/navigation' instead."
                .to_string(),
        ));
    }

    for function in &unit.functions {
        let Some(name) = function.name.as_deref() else {
            continue;
        };
        if function.is_exported && LEGACY_DATA_FETCHERS.contains(&name) {
            issues.push(ValidationIssue::new(
                unit,
                function.line,
                ValidationRule::NoOldDataFetching,
                format!(
                    "'{name}' is not supported in App Router. Use server components or route handlers."
                ),
            ));
        }
    }

    if !unit.has_client_directive()
        && regex_client_only_tokens()
            .iter()
            .any(|re| re.is_match(&unit.text))
    {
        issues.push(ValidationIssue::new(
            unit,
            1,
            ValidationRule::MissingClientDirective,
            "File uses client-side features but is missing 'use client' directive.".to_string(),
        ));
    }
}

pub fn validate_migration(sources: &SourceSet) -> ValidationResult {
    let mut issues = Vec::new();
    for unit in sources.iter() {
        check_unit(unit, &mut issues);
    }
    issues.sort_by(|a, b| a.file_path.cmp(&b.file_path).then(a.line.cmp(&b.line)));

    let errors = count(&issues, |i| i.severity == Severity::Error);
    let warnings = count(&issues, |i| i.severity == Severity::Warning);
    let summary = ValidationSummary {
        total: issues.len(),
        errors,
        warnings,
        passed: errors == 0,
    };
    ValidationResult {
        issues,
        files_checked: sources.units.len(),
        summary,
    }
}

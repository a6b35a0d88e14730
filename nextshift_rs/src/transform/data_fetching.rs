//! Data-fetching export analysis and replacement suggestions.

use serde::Serialize;

use crate::analyzer::count;
use crate::regexes::{
    regex_complex_body, regex_data_source, regex_request_context, regex_revalidate_key,
    regex_revalidate_value,
};
use crate::types::SourceUnit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DataFetchingKind {
    #[serde(rename = "getStaticProps")]
    GetStaticProps,
    #[serde(rename = "getServerSideProps")]
    GetServerSideProps,
    #[serde(rename = "getStaticPaths")]
    GetStaticPaths,
    #[serde(rename = "getInitialProps")]
    GetInitialProps,
}

impl DataFetchingKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "getStaticProps" => Some(Self::GetStaticProps),
            "getServerSideProps" => Some(Self::GetServerSideProps),
            "getStaticPaths" => Some(Self::GetStaticPaths),
            "getInitialProps" => Some(Self::GetInitialProps),
            _ => None,
        }
    }

    /// Replacement snippet, parameterized by the ISR interval when known.
    pub fn suggestion(&self, revalidate: Option<u64>) -> String {
        match (self, revalidate) {
            (Self::GetStaticProps, Some(seconds)) => format!(
                "// Fetch data with ISR\nconst data = await fetch('...', {{ next: {{ revalidate: {seconds} }} }});"
            ),
            (Self::GetStaticProps, None) => "// Fetch data in Server Component\nconst data = await fetch('...', { cache: 'force-cache' });".to_string(),
            (Self::GetServerSideProps, _) => "// Fetch data on every request\nconst data = await fetch('...', { cache: 'no-store' });".to_string(),
            (Self::GetStaticPaths, _) => "export async function generateStaticParams() {\n  // Return array of params\n  return [{ slug: '...' }];\n}".to_string(),
            (Self::GetInitialProps, _) => "// MANUAL MIGRATION: Move data fetching to Server Component or Route Handler".to_string(),
        }
    }

    pub fn complexity(&self, body: &str, has_revalidate: bool) -> Complexity {
        match self {
            Self::GetStaticProps if has_revalidate => Complexity::Moderate,
            Self::GetStaticProps if regex_complex_body().iter().any(|re| re.is_match(body)) => {
                Complexity::Complex
            }
            Self::GetStaticProps => Complexity::Simple,
            Self::GetServerSideProps if regex_request_context().is_match(body) => {
                Complexity::Complex
            }
            Self::GetServerSideProps => Complexity::Simple,
            Self::GetStaticPaths if regex_data_source().is_match(body) => Complexity::Moderate,
            Self::GetStaticPaths => Complexity::Simple,
            Self::GetInitialProps => Complexity::Complex,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFetchingPattern {
    pub name: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: DataFetchingKind,
    pub has_revalidate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revalidate_value: Option<u64>,
    pub suggested_replacement: String,
    pub complexity: Complexity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFetchingSummary {
    pub total: usize,
    pub get_static_props: usize,
    pub get_server_side_props: usize,
    pub get_static_paths: usize,
    pub get_initial_props: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct DataFetchingAnalysis {
    pub patterns: Vec<DataFetchingPattern>,
    pub summary: DataFetchingSummary,
}

fn analyze_body(name: &str, kind: DataFetchingKind, body: &str, line: usize) -> DataFetchingPattern {
    let has_revalidate = regex_revalidate_key().is_match(body);
    let revalidate_value = if has_revalidate {
        regex_revalidate_value()
            .captures(body)
            .and_then(|caps| caps[1].parse().ok())
    } else {
        None
    };
    DataFetchingPattern {
        name: name.to_string(),
        line,
        kind,
        has_revalidate,
        revalidate_value,
        suggested_replacement: kind.suggestion(revalidate_value),
        complexity: kind.complexity(body, has_revalidate),
    }
}

/// Exported function declarations first, then exported variables. A
/// variable's "body" is its whole initializer.
pub fn analyze_data_fetching(unit: &SourceUnit) -> DataFetchingAnalysis {
    let mut patterns = Vec::new();

    for function in unit.functions.iter().filter(|f| f.is_exported) {
        let Some(name) = function.name.as_deref() else {
            continue;
        };
        if let Some(kind) = DataFetchingKind::from_name(name) {
            patterns.push(analyze_body(name, kind, &function.body_text, function.line));
        }
    }

    for variable in unit.variables.iter().filter(|v| v.is_exported) {
        let (Some(kind), Some(init)) = (
            DataFetchingKind::from_name(&variable.name),
            variable.init_text.as_deref(),
        ) else {
            continue;
        };
        patterns.push(analyze_body(&variable.name, kind, init, variable.line));
    }

    let of = |kind: DataFetchingKind| count(&patterns, |p| p.kind == kind);
    let summary = DataFetchingSummary {
        total: patterns.len(),
        get_static_props: of(DataFetchingKind::GetStaticProps),
        get_server_side_props: of(DataFetchingKind::GetServerSideProps),
        get_static_paths: of(DataFetchingKind::GetStaticPaths),
        get_initial_props: of(DataFetchingKind::GetInitialProps),
    };
    DataFetchingAnalysis { patterns, summary }
}

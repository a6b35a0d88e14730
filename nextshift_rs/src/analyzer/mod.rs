//! Whole-project and single-file analyzers.
//!
//! Every analyzer is a pure function over parsed sources (or raw text for
//! the manifest and config file) returning a serializable result whose
//! `summary` is derived from the result list.

pub mod components;
pub mod dead_exports;
pub mod dependencies;
pub mod next_config;
pub mod props;
pub mod routes;
pub mod validator;

use serde::{Deserialize, Serialize};

use crate::types::SourceUnit;

/// The module the pages router exposes its router through.
pub const LEGACY_ROUTER_MODULE: &str = "next/router";

/// Page-level data loaders detected by the route extractor.
pub const PAGE_DATA_FETCHERS: [&str; 3] = ["getStaticProps", "getServerSideProps", "getStaticPaths"];

/// Every data-loading export the app router no longer calls.
pub const LEGACY_DATA_FETCHERS: [&str; 4] = [
    "getStaticProps",
    "getServerSideProps",
    "getStaticPaths",
    "getInitialProps",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// `name` is exported either as a function declaration or as a variable.
pub(crate) fn exports_binding(unit: &SourceUnit, name: &str) -> bool {
    unit.function(name).is_some_and(|f| f.is_exported)
        || unit.variable(name).is_some_and(|v| v.is_exported)
}

pub(crate) fn count<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(*item)).count()
}

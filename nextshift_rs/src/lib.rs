//! # nextshift
//!
//! Static analysis and import rewriting for moving a Next.js project from
//! the `pages/` router to the `app/` router.
//!
//! ## Features
//!
//! - **Route Extraction** - map `pages/` files to URL paths and route types
//! - **Component Classification** - client vs server, with the reasons
//! - **Dependency Classification** - core, replaceable, dev tool or unknown
//! - **Dead Export Detection** - exports nothing in the tree imports
//! - **Config Analysis** - `next.config.js` options that change meaning
//! - **Import Rewriting** - rule-driven, formatting-preserving
//! - **Router / Data-Fetching / Image Reports** - what a file still uses
//! - **Migration Validation** - checks over already-migrated `app/` files
//! - **Migration State** - phase progress and an error log in `.migration/`
//! - **Scaffolds** - layout, page, route, loading and error files
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use nextshift::analyzer::routes::extract_routes;
//! use nextshift::source::SourceSet;
//! use std::path::Path;
//!
//! let pages = SourceSet::open(Path::new("pages"))?;
//! let routes = extract_routes(&pages);
//! println!("{} routes", routes.summary.total);
//! # Ok::<(), nextshift::Error>(())
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! nextshift analyze routes pages
//! nextshift analyze dead-code src
//! nextshift transform imports pages/index.tsx --dry-run
//! nextshift validate app
//! nextshift state init
//! nextshift scaffold route GET,POST
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Parsing: turns source text into owned [`types::SourceUnit`] summaries.
pub mod source;

/// Whole-project and single-file analyzers.
pub mod analyzer;

/// Import rewriting and per-file migration reports.
pub mod transform;

/// Persisted phase progress and error log.
pub mod state;

/// `app/` file scaffolds.
pub mod templates;

// ============================================================================
// Support Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod fs_utils;
pub mod output;
pub mod regexes;
pub mod tables;
pub mod types;

pub use error::{Error, Result};

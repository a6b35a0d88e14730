//! Source loading and the OXC-backed tree provider.
//!
//! Every analyzer consumes [`SourceUnit`]s, never the syntax tree itself.
//! The provider parses one file into an arena, walks it once and hands back
//! an owned summary, so the arena never outlives the call.
//!
//! # Module Structure
//!
//! - `visitor`: the visitor struct and span helpers
//! - `imports`: import declaration lowering
//! - `exports`: top-level declarations and exports

mod exports;
mod imports;
mod visitor;

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::SourceType;
use tracing::debug;

use crate::error::{Error, Result, read_to_string};
use crate::fs_utils::{ScanOptions, gather_source_files};
use crate::types::{JsxAttribute, SourceUnit};

use visitor::UnitVisitor;

/// Turns source text into a [`SourceUnit`].
pub trait TreeProvider {
    fn parse(&self, text: &str, path: &Path) -> Result<SourceUnit>;
}

/// The default provider, backed by the OXC parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct OxcProvider;

impl TreeProvider for OxcProvider {
    fn parse(&self, text: &str, path: &Path) -> Result<SourceUnit> {
        parse_source(text, path)
    }
}

/// Read and parse a single file from disk.
pub fn parse_file(path: &Path) -> Result<SourceUnit> {
    let text = read_to_string(path)?;
    parse_source(&text, path)
}

/// Parse one file. Any syntax error is fatal for the file.
pub fn parse_source(text: &str, path: &Path) -> Result<SourceUnit> {
    let allocator = Allocator::default();

    // JSX is common in plain .js pages; .ts stays JSX-free so `<T>(x) =>` parses as a generic.
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let is_jsx = matches!(ext, "tsx" | "jsx" | "js");
    let source_type = SourceType::from_path(path)
        .unwrap_or_default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(is_jsx);

    let ret = Parser::new(&allocator, text, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(Error::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    let mut visitor = UnitVisitor::new(path, text);
    visitor.visit_program(&ret.program);
    visitor.lower_program(&ret.program);
    Ok(visitor.finish())
}

impl<'a> Visit<'a> for UnitVisitor<'a> {
    fn visit_jsx_attribute(&mut self, attr: &JSXAttribute<'a>) {
        let name = match &attr.name {
            JSXAttributeName::Identifier(id) => id.name.to_string(),
            JSXAttributeName::NamespacedName(ns) => {
                format!("{}:{}", ns.namespace.name, ns.name.name)
            }
        };
        let line = self.get_line(attr.span);
        self.unit.jsx_attributes.push(JsxAttribute { name, line });
        walk::walk_jsx_attribute(self, attr);
    }

    fn visit_ts_type_annotation(&mut self, ann: &TSTypeAnnotation<'a>) {
        let shape = self.type_shape(&ann.type_annotation);
        self.annotations
            .push((ann.span.start as usize, ann.span.end as usize, shape));
        walk::walk_ts_type_annotation(self, ann);
    }
}

/// All parsed sources under one project root.
#[derive(Debug)]
pub struct SourceSet {
    pub root: PathBuf,
    pub units: Vec<SourceUnit>,
}

impl SourceSet {
    /// Walk `dir` and parse every source file with `provider`.
    pub fn load(dir: &Path, options: &ScanOptions, provider: &dyn TreeProvider) -> Result<Self> {
        let root = dir.canonicalize().map_err(|e| Error::io(dir, e))?;
        let files = gather_source_files(&root, options)?;
        let mut units = Vec::with_capacity(files.len());
        for path in files {
            let text = read_to_string(&path)?;
            units.push(provider.parse(&text, &path)?);
        }
        debug!(root = %root.display(), files = units.len(), "parsed source set");
        Ok(Self { root, units })
    }

    /// [`SourceSet::load`] with default options and the OXC provider.
    pub fn open(dir: &Path) -> Result<Self> {
        Self::load(dir, &ScanOptions::default(), &OxcProvider)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceUnit> {
        self.units.iter()
    }
}

//! UnitVisitor struct and helper methods for lowering the AST.
//!
//! Holds the summary under construction plus a few side tables that only
//! live for the duration of one parse (type annotations seen by the walker,
//! local declarations, `export { .. }` specifiers awaiting resolution).

use std::path::Path;

use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};

use crate::types::{DeclKind, ParamShape, SourceUnit, TypeMember, TypeShape};

/// `{ local as exported }` seen in an `export { .. }` clause without a source.
pub(super) struct ExportSpecifier {
    pub local: String,
    pub exported: String,
    pub line: usize,
}

pub(super) struct LocalDecl {
    pub name: String,
    pub kind: DeclKind,
    pub line: usize,
}

/// Visitor for traversing a JS/TS AST and collecting a [`SourceUnit`].
pub(super) struct UnitVisitor<'a> {
    pub unit: SourceUnit,
    pub source_text: &'a str,
    /// Every `: Type` annotation in the file: (start, end, shape).
    pub annotations: Vec<(usize, usize, TypeShape)>,
    pub locals: Vec<LocalDecl>,
    pub export_specifiers: Vec<ExportSpecifier>,
}

impl<'a> UnitVisitor<'a> {
    pub(super) fn new(path: &Path, source_text: &'a str) -> Self {
        Self {
            unit: SourceUnit {
                path: path.to_path_buf(),
                text: source_text.to_string(),
                ..SourceUnit::default()
            },
            source_text,
            annotations: Vec::new(),
            locals: Vec::new(),
            export_specifiers: Vec::new(),
        }
    }

    /// Get line number from span position.
    pub(super) fn get_line(&self, span: Span) -> usize {
        let start = span.start as usize;
        let capped = std::cmp::min(start, self.source_text.len());
        self.source_text[..capped]
            .bytes()
            .filter(|b| *b == b'\n')
            .count()
            + 1
    }

    pub(super) fn slice(&self, span: Span) -> &'a str {
        let end = std::cmp::min(span.end as usize, self.source_text.len());
        let start = std::cmp::min(span.start as usize, end);
        &self.source_text[start..end]
    }

    /// Text between the delimiters of a braced span, trimmed.
    pub(super) fn inner_text(&self, span: Span) -> String {
        let text = self.slice(span);
        let inner = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(text);
        inner.trim().to_string()
    }

    pub(super) fn declare_local(&mut self, name: &str, kind: DeclKind, line: usize) {
        self.locals.push(LocalDecl {
            name: name.to_string(),
            kind,
            line,
        });
    }

    pub(super) fn type_shape(&self, ty: &TSType<'a>) -> TypeShape {
        match ty {
            TSType::TSTypeReference(r) => TypeShape::Reference(self.slice(r.span).to_string()),
            TSType::TSTypeLiteral(lit) => {
                TypeShape::Literal(lit.members.iter().map(|m| self.type_member(m)).collect())
            }
            other => TypeShape::Other(self.slice(other.span()).to_string()),
        }
    }

    pub(super) fn type_member(&self, sig: &TSSignature<'a>) -> TypeMember {
        match sig {
            TSSignature::TSPropertySignature(prop) => TypeMember {
                name: self.slice(prop.key.span()).to_string(),
                type_text: prop
                    .type_annotation
                    .as_ref()
                    .map(|ann| self.slice(ann.type_annotation.span()).to_string()),
                optional: prop.optional,
                is_property: true,
            },
            other => TypeMember {
                name: self
                    .slice(other.span())
                    .trim_end_matches([';', ','])
                    .to_string(),
                type_text: None,
                optional: false,
                is_property: false,
            },
        }
    }

    /// Parameter count plus the annotation attached to the first parameter.
    ///
    /// The annotation is looked up among the ones the walker recorded: the
    /// earliest one that starts after the binding pattern and ends inside the
    /// parameter. Default values nested in the pattern cannot match.
    pub(super) fn param_shape(&self, params: &FormalParameters<'a>) -> ParamShape {
        let count = params.items.len() + usize::from(params.rest.is_some());
        let first_annotation = params.items.first().and_then(|param| {
            let from = param.pattern.span().end as usize;
            let to = param.span.end as usize;
            self.annotations
                .iter()
                .filter(|(start, end, _)| *start >= from && *end <= to)
                .min_by_key(|(start, _, _)| *start)
                .map(|(_, _, shape)| shape.clone())
        });
        ParamShape {
            count,
            first_annotation,
        }
    }

    pub(super) fn finish(mut self) -> SourceUnit {
        self.resolve_export_specifiers();
        self.unit
    }
}

pub(super) fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.to_string(),
        ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        ModuleExportName::StringLiteral(str) => str.value.to_string(),
    }
}

//! Top-level declaration and export lowering.
//!
//! Handles:
//! - Named exports: `export const x = 1;`, `export function foo() {}`
//! - Default exports: `export default function Page() {}`
//! - Specifier exports: `export { foo, bar as baz };`
//! - Re-exports: `export { foo } from './bar'` (recorded with an unknown kind)
//! - Namespace re-exports: `export * as ns from './bar'`
//! - TypeScript interfaces and type aliases (kept for prop extraction)
//!
//! `export * from '...'` carries no names and is skipped. Each exported name
//! is recorded once; overload signatures only contribute through their
//! implementation.

use std::mem;

use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};

use crate::types::{DeclKind, ExportedSymbol, FunctionDecl, NamedType, TypeShape, VariableDecl};

use super::visitor::{ExportSpecifier, UnitVisitor, module_export_name};

impl<'a> UnitVisitor<'a> {
    /// Walk `program.body` once, in source order.
    pub(super) fn lower_program(&mut self, program: &Program<'a>) {
        self.unit.directives = program
            .directives
            .iter()
            .map(|d| d.expression.value.to_string())
            .collect();

        for stmt in &program.body {
            match stmt {
                Statement::ImportDeclaration(decl) => self.handle_import_declaration(decl),
                Statement::ExportNamedDeclaration(decl) => self.handle_export_named(decl),
                Statement::ExportDefaultDeclaration(decl) => self.handle_export_default(decl),
                Statement::ExportAllDeclaration(decl) => {
                    if let Some(exported) = &decl.exported {
                        let line = self.get_line(decl.span);
                        self.push_export(module_export_name(exported), DeclKind::Unknown, line);
                    }
                }
                Statement::FunctionDeclaration(f) => self.record_function(f, f.span, false, false),
                Statement::VariableDeclaration(var) => self.record_variables(var, var.span, false),
                Statement::ClassDeclaration(c) => {
                    if let Some(id) = &c.id {
                        let line = self.get_line(c.span);
                        self.declare_local(&id.name, DeclKind::Class, line);
                    }
                }
                Statement::TSInterfaceDeclaration(i) => self.record_interface(i),
                Statement::TSTypeAliasDeclaration(t) => self.record_type_alias(t),
                Statement::TSEnumDeclaration(e) => {
                    let line = self.get_line(e.span);
                    self.declare_local(&e.id.name, DeclKind::Unknown, line);
                }
                _ => {}
            }
        }
    }

    fn handle_export_named(&mut self, decl: &ExportNamedDeclaration<'a>) {
        let line = self.get_line(decl.span);

        if decl.source.is_some() {
            for spec in &decl.specifiers {
                let exported = module_export_name(&spec.exported);
                if exported == "default" {
                    self.unit.has_default_export = true;
                } else {
                    self.push_export(exported, DeclKind::Unknown, line);
                }
            }
            return;
        }

        if let Some(declaration) = &decl.declaration {
            match declaration {
                Declaration::VariableDeclaration(var) => self.record_variables(var, decl.span, true),
                Declaration::FunctionDeclaration(f) => {
                    self.record_function(f, decl.span, true, false)
                }
                Declaration::ClassDeclaration(c) => {
                    if let Some(id) = &c.id {
                        self.declare_local(&id.name, DeclKind::Class, line);
                        self.push_export(id.name.to_string(), DeclKind::Class, line);
                    }
                }
                Declaration::TSInterfaceDeclaration(i) => {
                    self.record_interface(i);
                    self.push_export(i.id.name.to_string(), DeclKind::Interface, line);
                }
                Declaration::TSTypeAliasDeclaration(t) => {
                    self.record_type_alias(t);
                    self.push_export(t.id.name.to_string(), DeclKind::Type, line);
                }
                Declaration::TSEnumDeclaration(e) => {
                    self.declare_local(&e.id.name, DeclKind::Unknown, line);
                    self.push_export(e.id.name.to_string(), DeclKind::Unknown, line);
                }
                _ => {}
            }
        }

        for spec in &decl.specifiers {
            self.export_specifiers.push(ExportSpecifier {
                local: module_export_name(&spec.local),
                exported: module_export_name(&spec.exported),
                line,
            });
        }
    }

    fn handle_export_default(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        self.unit.has_default_export = true;
        match &decl.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(f) => {
                self.record_function(f, decl.span, true, true)
            }
            ExportDefaultDeclarationKind::ClassDeclaration(c) => {
                if let Some(id) = &c.id {
                    let line = self.get_line(decl.span);
                    self.declare_local(&id.name, DeclKind::Class, line);
                }
            }
            _ => {}
        }
    }

    fn record_function(&mut self, f: &Function<'a>, stmt_span: Span, exported: bool, default: bool) {
        // Overload signature; the implementation that follows is recorded.
        if f.body.is_none() && !f.declare {
            return;
        }
        let line = self.get_line(stmt_span);
        let name = f.id.as_ref().map(|id| id.name.to_string());
        if let Some(name) = &name {
            self.declare_local(name, DeclKind::Function, line);
            if exported && !default {
                self.push_export(name.clone(), DeclKind::Function, line);
            }
        }
        let body_text = f
            .body
            .as_ref()
            .map(|body| self.inner_text(body.span))
            .unwrap_or_default();
        let params = self.param_shape(&f.params);
        self.unit.functions.push(FunctionDecl {
            name,
            is_exported: exported,
            is_default_export: default,
            line,
            body_text,
            params,
        });
    }

    fn record_variables(&mut self, var: &VariableDeclaration<'a>, stmt_span: Span, exported: bool) {
        let line = self.get_line(stmt_span);
        for d in &var.declarations {
            let BindingPattern::BindingIdentifier(id) = &d.id else {
                continue;
            };
            let name = id.name.to_string();
            let init_text = d.init.as_ref().map(|init| self.slice(init.span()).to_string());
            let arrow = match &d.init {
                Some(Expression::ArrowFunctionExpression(arrow)) => {
                    Some(self.param_shape(&arrow.params))
                }
                _ => None,
            };
            self.declare_local(&name, DeclKind::Variable, line);
            if exported {
                self.push_export(name.clone(), DeclKind::Variable, line);
            }
            self.unit.variables.push(VariableDecl {
                name,
                is_exported: exported,
                line,
                init_text,
                arrow,
            });
        }
    }

    fn record_interface(&mut self, decl: &TSInterfaceDeclaration<'a>) {
        let members = decl
            .body
            .body
            .iter()
            .map(|m| self.type_member(m))
            .collect();
        let line = self.get_line(decl.span);
        self.declare_local(&decl.id.name, DeclKind::Interface, line);
        self.unit.interfaces.push(NamedType {
            name: decl.id.name.to_string(),
            shape: TypeShape::Literal(members),
        });
    }

    fn record_type_alias(&mut self, decl: &TSTypeAliasDeclaration<'a>) {
        let line = self.get_line(decl.span);
        self.declare_local(&decl.id.name, DeclKind::Type, line);
        let shape = self.type_shape(&decl.type_annotation);
        self.unit.type_aliases.push(NamedType {
            name: decl.id.name.to_string(),
            shape,
        });
    }

    fn push_export(&mut self, name: String, kind: DeclKind, line: usize) {
        if self.unit.exports.iter().any(|e| e.name == name) {
            return;
        }
        self.unit.exports.push(ExportedSymbol { name, kind, line });
    }

    /// Attach `export { a, b as c }` clauses to the declarations they name.
    pub(super) fn resolve_export_specifiers(&mut self) {
        for spec in mem::take(&mut self.export_specifiers) {
            let is_default = spec.exported == "default";
            if is_default {
                self.unit.has_default_export = true;
            }
            for f in &mut self.unit.functions {
                if f.name.as_deref() == Some(spec.local.as_str()) {
                    f.is_exported = true;
                    f.is_default_export |= is_default;
                }
            }
            for v in &mut self.unit.variables {
                if v.name == spec.local {
                    v.is_exported = true;
                }
            }
            if is_default {
                continue;
            }
            let (kind, line) = self
                .locals
                .iter()
                .find(|l| l.name == spec.local)
                .map(|l| (l.kind, l.line))
                .unwrap_or((DeclKind::Unknown, spec.line));
            self.push_export(spec.exported, kind, line);
        }
    }
}

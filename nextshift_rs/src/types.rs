//! Owned summary of one parsed source file.
//!
//! The tree provider lowers the borrowed syntax tree into these plain
//! structs so every analyzer can work without holding an arena alive.

use std::ops::Range;
use std::path::PathBuf;

use serde::Serialize;

/// The directive marking a module as a client component.
pub const CLIENT_DIRECTIVE: &str = "use client";

/// Declaration kind of an exported symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Function,
    Variable,
    Class,
    Interface,
    Type,
    Unknown,
}

#[derive(Clone, Debug)]
pub struct ImportDecl {
    pub specifier: String,
    /// 1-based line of the statement.
    pub line: usize,
    /// Byte range of the whole `import ...;` statement.
    pub span: Range<usize>,
    /// Byte range of the specifier text, quotes excluded.
    pub specifier_span: Range<usize>,
    pub default_binding: Option<String>,
    pub namespace_binding: Option<String>,
    pub named: Vec<NamedImport>,
    pub type_only: bool,
}

/// `{ name as alias }` inside an import clause.
#[derive(Clone, Debug)]
pub struct NamedImport {
    /// Name exported by the target module.
    pub name: String,
    pub alias: Option<String>,
    /// Byte range of `name` in the source text.
    pub name_span: Range<usize>,
}

#[derive(Clone, Debug)]
pub struct ExportedSymbol {
    pub name: String,
    pub kind: DeclKind,
    pub line: usize,
}

/// A top-level `function` declaration.
#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub is_exported: bool,
    pub is_default_export: bool,
    /// Line of the enclosing statement, `export` keyword included.
    pub line: usize,
    /// Text between the body braces, trimmed.
    pub body_text: String,
    pub params: ParamShape,
}

/// One declarator of a top-level `const`/`let`/`var` statement.
#[derive(Clone, Debug)]
pub struct VariableDecl {
    pub name: String,
    pub is_exported: bool,
    pub line: usize,
    pub init_text: Option<String>,
    /// Present when the initializer is an arrow function.
    pub arrow: Option<ParamShape>,
}

#[derive(Clone, Debug, Default)]
pub struct ParamShape {
    pub count: usize,
    /// Annotation on the first parameter, if any.
    pub first_annotation: Option<TypeShape>,
}

/// Just enough of a type annotation to recover component props.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeShape {
    /// `Props`, `ns.Props`, `Props<T>`: the full reference text.
    Reference(String),
    /// `{ a: string; b?: number }`
    Literal(Vec<TypeMember>),
    Other(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeMember {
    pub name: String,
    pub type_text: Option<String>,
    pub optional: bool,
    /// False for method, index and call signatures.
    pub is_property: bool,
}

/// A named interface or type alias declared at the top level.
#[derive(Clone, Debug)]
pub struct NamedType {
    pub name: String,
    pub shape: TypeShape,
}

#[derive(Clone, Debug)]
pub struct JsxAttribute {
    pub name: String,
    pub line: usize,
}

/// One parsed file. Immutable once the provider hands it out.
#[derive(Clone, Debug, Default)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
    /// Leading directive prologue (`"use client"`, `"use strict"`, ...), in order.
    pub directives: Vec<String>,
    pub imports: Vec<ImportDecl>,
    /// Non-default exports, re-exports included.
    pub exports: Vec<ExportedSymbol>,
    pub functions: Vec<FunctionDecl>,
    pub variables: Vec<VariableDecl>,
    pub interfaces: Vec<NamedType>,
    pub type_aliases: Vec<NamedType>,
    pub jsx_attributes: Vec<JsxAttribute>,
    pub has_default_export: bool,
}

impl SourceUnit {
    /// The file's very first statement is the `"use client"` string literal.
    pub fn has_client_directive(&self) -> bool {
        self.directives
            .first()
            .is_some_and(|d| d == CLIENT_DIRECTIVE)
    }

    pub fn imports_from(&self, specifier: &str) -> bool {
        self.imports.iter().any(|i| i.specifier == specifier)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }

    pub fn variable(&self, name: &str) -> Option<&VariableDecl> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn interface(&self, name: &str) -> Option<&NamedType> {
        self.interfaces.iter().find(|t| t.name == name)
    }

    pub fn type_alias(&self, name: &str) -> Option<&NamedType> {
        self.type_aliases.iter().find(|t| t.name == name)
    }

    /// File name without directory and last extension (`Header.tsx` -> `Header`).
    pub fn stem(&self) -> String {
        file_stem(&self.path.to_string_lossy())
    }

    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Base name with the final extension removed. Mirrors `a.test.tsx` -> `a.test`.
pub fn file_stem(path: &str) -> String {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match base.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_drops_only_last_extension() {
        assert_eq!(file_stem("/src/components/Header.tsx"), "Header");
        assert_eq!(file_stem("lib/a.test.ts"), "a.test");
        assert_eq!(file_stem("Makefile"), "Makefile");
    }

    #[test]
    fn client_directive_must_come_first() {
        let mut unit = SourceUnit {
            directives: vec!["use strict".into(), CLIENT_DIRECTIVE.into()],
            ..SourceUnit::default()
        };
        assert!(!unit.has_client_directive());
        unit.directives.remove(0);
        assert!(unit.has_client_directive());
    }
}

//! Import declaration lowering.
//!
//! Keeps byte ranges for the statement, the module specifier and each named
//! binding so the import rewriter can edit the original text in place.

use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::types::{ImportDecl, NamedImport};

use super::visitor::{UnitVisitor, module_export_name};

impl<'a> UnitVisitor<'a> {
    pub(super) fn handle_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let source_span = decl.source.span;
        // The literal span includes its quotes.
        let specifier_span = (source_span.start as usize + 1)..(source_span.end as usize - 1);

        let mut entry = ImportDecl {
            specifier: decl.source.value.to_string(),
            line: self.get_line(decl.span),
            span: decl.span.start as usize..decl.span.end as usize,
            specifier_span,
            default_binding: None,
            namespace_binding: None,
            named: Vec::new(),
            type_only: matches!(decl.import_kind, ImportOrExportKind::Type),
        };

        if let Some(specifiers) = &decl.specifiers {
            for spec in specifiers {
                match spec {
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        entry.default_binding = Some(s.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        entry.namespace_binding = Some(s.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        let name = module_export_name(&s.imported);
                        let alias = if s.local.name.as_str() != name {
                            Some(s.local.name.to_string())
                        } else {
                            None
                        };
                        let name_span = s.imported.span();
                        entry.named.push(NamedImport {
                            name,
                            alias,
                            name_span: name_span.start as usize..name_span.end as usize,
                        });
                    }
                }
            }
        }

        self.unit.imports.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::source::parse_source;

    #[test]
    fn records_bindings_and_ranges() {
        let text = "import Router, { useRouter as useR, type NextRouter } from 'next/router';\n\
                    import * as Img from \"next/image\";\n\
                    import './styles.css';\n";
        let unit = parse_source(text, Path::new("page.tsx")).expect("parse");
        assert_eq!(unit.imports.len(), 3);

        let router = &unit.imports[0];
        assert_eq!(router.specifier, "next/router");
        assert_eq!(router.line, 1);
        assert_eq!(router.default_binding.as_deref(), Some("Router"));
        assert_eq!(&text[router.specifier_span.clone()], "next/router");
        assert_eq!(router.named.len(), 2);
        assert_eq!(router.named[0].name, "useRouter");
        assert_eq!(router.named[0].alias.as_deref(), Some("useR"));
        assert_eq!(&text[router.named[0].name_span.clone()], "useRouter");
        assert!(text[router.span.clone()].ends_with("'next/router';"));

        let image = &unit.imports[1];
        assert_eq!(image.line, 2);
        assert_eq!(image.namespace_binding.as_deref(), Some("Img"));

        let side_effect = &unit.imports[2];
        assert!(side_effect.named.is_empty());
        assert!(side_effect.default_binding.is_none());
    }

    #[test]
    fn type_only_imports_are_flagged() {
        let unit = parse_source(
            "import type { AppProps } from 'next/app';\n",
            Path::new("_app.tsx"),
        )
        .expect("parse");
        assert!(unit.imports[0].type_only);
    }
}

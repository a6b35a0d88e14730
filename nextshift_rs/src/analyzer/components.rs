//! Client/server component classification.
//!
//! A default-exported component is a client component when it pulls in
//! React state hooks, router hooks, DOM event handlers or browser globals,
//! or already carries the `"use client"` directive.

use serde::Serialize;

use crate::regexes::regex_event_handler_name;
use crate::source::SourceSet;
use crate::types::{CLIENT_DIRECTIVE, SourceUnit};

use super::count;

const REACT_MODULE: &str = "react";

const REACT_HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useRef",
    "useReducer",
    "useCallback",
    "useMemo",
    "useContext",
    "useLayoutEffect",
    "useImperativeHandle",
    "useDebugValue",
    "useSyncExternalStore",
    "useTransition",
    "useDeferredValue",
    "useId",
];

const NAVIGATION_MODULES: &[&str] = &["next/router", "next/navigation"];

const NAVIGATION_HOOKS: &[&str] = &["useRouter", "usePathname", "useSearchParams", "useParams"];

/// Handlers outside this list are ignored even when they look like `onXxx`.
const EVENT_HANDLERS: &[&str] = &[
    "onClick",
    "onChange",
    "onSubmit",
    "onKeyDown",
    "onKeyUp",
    "onMouseEnter",
    "onMouseLeave",
    "onFocus",
    "onBlur",
    "onScroll",
];

/// Plain substring probes, reported without their trailing `.` or `(`.
const BROWSER_APIS: &[&str] = &[
    "document.",
    "window.",
    "localStorage.",
    "sessionStorage.",
    "navigator.",
    "alert(",
    "confirm(",
    "prompt(",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Client,
    Server,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub file_path: String,
    pub name: String,
    pub classification: Classification,
    pub client_indicators: Vec<String>,
    pub has_client_directive: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    pub total: usize,
    pub client: usize,
    pub server: usize,
    pub with_client_directive: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComponentInventory {
    pub components: Vec<ComponentInfo>,
    pub summary: ComponentSummary,
}

fn component_name(unit: &SourceUnit) -> String {
    let stem = unit.stem();
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => stem,
    }
}

fn has_default_export_component(unit: &SourceUnit) -> bool {
    unit.has_default_export || unit.text.contains("export default ")
}

fn named_imports_matching(unit: &SourceUnit, modules: &[&str], allowed: &[&str]) -> Vec<String> {
    unit.imports
        .iter()
        .filter(|decl| modules.contains(&decl.specifier.as_str()))
        .flat_map(|decl| decl.named.iter())
        .filter(|named| allowed.contains(&named.name.as_str()))
        .map(|named| named.name.clone())
        .collect()
}

fn detect_event_handlers(unit: &SourceUnit) -> Vec<String> {
    let mut handlers: Vec<String> = Vec::new();
    for attr in &unit.jsx_attributes {
        let name = attr.name.as_str();
        if regex_event_handler_name().is_match(name)
            && EVENT_HANDLERS.contains(&name)
            && !handlers.iter().any(|h| h == name)
        {
            handlers.push(name.to_string());
        }
    }
    handlers
}

fn detect_browser_apis(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for api in BROWSER_APIS {
        if text.contains(api) {
            let name = api.trim_end_matches(['.', '(']).to_string();
            if !found.contains(&name) {
                found.push(name);
            }
        }
    }
    found
}

/// Classify one file; `None` when it has no default export.
pub fn classify_component(unit: &SourceUnit) -> Option<ComponentInfo> {
    if !has_default_export_component(unit) {
        return None;
    }

    let has_client_directive = unit.has_client_directive();

    let mut indicators = named_imports_matching(unit, &[REACT_MODULE], REACT_HOOKS);
    indicators.extend(named_imports_matching(unit, NAVIGATION_MODULES, NAVIGATION_HOOKS));
    indicators.extend(detect_event_handlers(unit));
    indicators.extend(detect_browser_apis(&unit.text));

    if has_client_directive && !indicators.iter().any(|i| i == CLIENT_DIRECTIVE) {
        indicators.insert(0, CLIENT_DIRECTIVE.to_string());
    }

    let classification = if indicators.is_empty() {
        Classification::Server
    } else {
        Classification::Client
    };

    Some(ComponentInfo {
        file_path: unit.display_path(),
        name: component_name(unit),
        classification,
        client_indicators: indicators,
        has_client_directive,
    })
}

pub fn inventory_components(sources: &SourceSet) -> ComponentInventory {
    let mut components: Vec<ComponentInfo> = sources.iter().filter_map(classify_component).collect();
    components.sort_by(|a, b| a.file_path.cmp(&b.file_path));

    let summary = ComponentSummary {
        total: components.len(),
        client: count(&components, |c| c.classification == Classification::Client),
        server: count(&components, |c| c.classification == Classification::Server),
        with_client_directive: count(&components, |c| c.has_client_directive),
    };
    ComponentInventory {
        components,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_source;
    use std::path::Path;

    fn classify(text: &str, file: &str) -> Option<ComponentInfo> {
        let unit = parse_source(text, Path::new(file)).expect("parse");
        classify_component(&unit)
    }

    #[test]
    fn indicators_follow_category_order() {
        let text = r#"'use client';
import { useState, useEffect, forwardRef } from 'react';
import { useRouter } from 'next/router';

export default function Header() {
  const [open, setOpen] = useState(false);
  const router = useRouter();
  useEffect(() => { document.title = 'x'; }, []);
  return <button onClick={() => setOpen(!open)} onCustomThing={1}>menu</button>;
}
"#;
        let info = classify(text, "components/header.tsx").expect("component");
        assert_eq!(info.name, "Header");
        assert!(info.has_client_directive);
        assert_eq!(info.classification, Classification::Client);
        assert_eq!(
            info.client_indicators,
            vec!["use client", "useState", "useEffect", "useRouter", "onClick", "document"]
        );
    }

    #[test]
    fn plain_markup_is_server() {
        let text = "export default function Footer() {\n  return <footer className=\"f\">(c)</footer>;\n}\n";
        let info = classify(text, "Footer.tsx").expect("component");
        assert_eq!(info.classification, Classification::Server);
        assert!(info.client_indicators.is_empty());
        assert!(!info.has_client_directive);
    }

    #[test]
    fn directive_alone_makes_a_client_component() {
        let info = classify(
            "\"use client\";\nexport default function A() { return null }\n",
            "a.tsx",
        )
        .expect("component");
        assert_eq!(info.client_indicators, vec!["use client"]);
        assert_eq!(info.classification, Classification::Client);
    }

    #[test]
    fn files_without_default_export_are_skipped() {
        assert!(classify("export const helper = 1;\n", "lib/helper.ts").is_none());
    }

    #[test]
    fn re_exported_default_is_a_component() {
        let info = classify("export { default } from '../components/Home';\n", "pages/index.tsx")
            .expect("component");
        assert_eq!(info.name, "Index");
        assert_eq!(info.classification, Classification::Server);
    }

    #[test]
    fn browser_tokens_are_reported_once() {
        let text = "export default function W() {\n  window.scrollTo(0, 0);\n  window.alert('a');\n  alert('b');\n  return null;\n}\n";
        let info = classify(text, "W.tsx").expect("component");
        assert_eq!(info.client_indicators, vec!["window", "alert"]);
    }
}

//! App Router file scaffolds.
//!
//! Renders starting points for `layout.tsx`, `page.tsx`, `route.ts`,
//! `loading.tsx` and `error.tsx`. `name` is used verbatim as the prefix of
//! the exported component (`Dashboard` becomes `DashboardLayout`).

use serde::Deserialize;

use crate::types::CLIENT_DIRECTIVE;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutData {
    pub name: String,
    /// Root layouts own the `<html>` and `<body>` elements.
    pub is_root: bool,
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PageProp {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DefaultImport {
    pub default: String,
    pub from: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchData {
    pub url: String,
    /// Raw object literal passed as the second `fetch` argument.
    pub options: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageData {
    pub name: String,
    pub is_client: bool,
    pub is_async: bool,
    pub props: Vec<PageProp>,
    pub imports: Vec<DefaultImport>,
    pub fetch: Option<FetchData>,
}

/// A JS string literal for `value`.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

fn directive_line(out: &mut String) {
    out.push_str(&format!("'{CLIENT_DIRECTIVE}';\n\n"));
}

fn metadata_block(metadata: &Metadata) -> String {
    format!(
        "export const metadata: Metadata = {{\n  title: {},\n  description: {},\n}};\n\n",
        js_string(&metadata.title),
        js_string(&metadata.description),
    )
}

pub fn render_layout(data: &LayoutData) -> String {
    let mut out = String::new();
    if let Some(metadata) = &data.metadata {
        out.push_str("import type { Metadata } from 'next';\n\n");
        out.push_str(&metadata_block(metadata));
    }

    out.push_str(&format!(
        "export default function {}Layout({{\n  children,\n}}: {{\n  children: React.ReactNode;\n}}) {{\n",
        data.name
    ));
    if data.is_root {
        out.push_str(
            "  return (\n    <html lang=\"en\">\n      <body>{children}</body>\n    </html>\n  );\n",
        );
    } else {
        out.push_str("  return <section>{children}</section>;\n");
    }
    out.push_str("}\n");
    out
}

/// Client pages are never rendered `async`, and the data fetch is only
/// emitted for async server pages.
pub fn render_page(data: &PageData) -> String {
    let is_async = data.is_async && !data.is_client;
    let component = format!("{}Page", data.name);
    let props_type = format!("{component}Props");
    let mut out = String::new();

    if data.is_client {
        directive_line(&mut out);
    }

    if !data.imports.is_empty() {
        for import in &data.imports {
            out.push_str(&format!("import {} from '{}';\n", import.default, import.from));
        }
        out.push('\n');
    }

    let params = if data.props.is_empty() {
        String::new()
    } else {
        out.push_str(&format!("interface {props_type} {{\n"));
        for prop in &data.props {
            let optional = if prop.optional { "?" } else { "" };
            out.push_str(&format!("  {}{optional}: {};\n", prop.name, prop.type_text));
        }
        out.push_str("}\n\n");
        let names: Vec<&str> = data.props.iter().map(|p| p.name.as_str()).collect();
        format!("{{ {} }}: {props_type}", names.join(", "))
    };

    let async_kw = if is_async { "async " } else { "" };
    out.push_str(&format!(
        "export default {async_kw}function {component}({params}) {{\n"
    ));

    if let Some(fetch) = data.fetch.as_ref().filter(|_| is_async) {
        let options = fetch
            .options
            .as_deref()
            .map(|o| format!(", {o}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "  const res = await fetch({}{options});\n  const data = await res.json();\n\n",
            js_string(&fetch.url)
        ));
    }

    out.push_str(&format!(
        "  return (\n    <main>\n      <h1>{}</h1>\n    </main>\n  );\n}}\n",
        data.name
    ));
    out
}

/// One handler per method, in the given order. Method names are upper-cased
/// and repeated methods are emitted once.
pub fn render_route(methods: &[String]) -> String {
    let mut seen: Vec<String> = Vec::new();
    for method in methods {
        let method = method.trim().to_ascii_uppercase();
        if !method.is_empty() && !seen.contains(&method) {
            seen.push(method);
        }
    }

    let mut handlers = vec!["import { NextRequest, NextResponse } from 'next/server';\n".to_string()];
    for method in &seen {
        let reads_body = matches!(method.as_str(), "POST" | "PUT" | "PATCH");
        let body = if reads_body {
            "  const body = await request.json();\n  return NextResponse.json({ received: body });\n"
                .to_string()
        } else {
            format!("  return NextResponse.json({{ method: '{method}' }});\n")
        };
        handlers.push(format!(
            "export async function {method}(request: NextRequest) {{\n{body}}}\n"
        ));
    }
    handlers.join("\n")
}

pub fn render_loading(name: &str) -> String {
    format!(
        "export default function {name}Loading() {{\n  return (\n    <div role=\"status\">\n      <p>Loading...</p>\n    </div>\n  );\n}}\n"
    )
}

/// Error boundaries must be client components.
pub fn render_error(name: &str) -> String {
    let mut out = String::new();
    directive_line(&mut out);
    out.push_str("import { useEffect } from 'react';\n\n");
    out.push_str(&format!(
        "export default function {name}Error({{\n  error,\n  reset,\n}}: {{\n  error: Error & {{ digest?: string }};\n  reset: () => void;\n}}) {{\n"
    ));
    out.push_str("  useEffect(() => {\n    console.error(error);\n  }, [error]);\n\n");
    out.push_str(
        "  return (\n    <div>\n      <h2>Something went wrong!</h2>\n      <button onClick={() => reset()}>Try again</button>\n    </div>\n  );\n}\n",
    );
    out
}

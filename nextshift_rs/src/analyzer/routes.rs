//! Route extraction from a `pages/` directory.
//!
//! File paths map to URL routes the way the pages router resolves them:
//! `index` collapses, `[slug]` becomes `:slug`, `[...rest]` becomes `*rest`.

use std::path::{Component, Path};

use serde::Serialize;

use crate::regexes::{
    regex_api_method, regex_catch_all_segment, regex_dynamic_segment, regex_source_extension,
};
use crate::source::SourceSet;
use crate::types::SourceUnit;

use super::{PAGE_DATA_FETCHERS, count, exports_binding};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteType {
    Static,
    Dynamic,
    CatchAll,
    Api,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub file_path: String,
    pub route_path: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub data_fetching: Vec<String>,
    pub has_default_export: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_methods: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total: usize,
    #[serde(rename = "static")]
    pub static_routes: usize,
    pub dynamic: usize,
    pub api: usize,
    pub catch_all: usize,
    pub with_get_static_props: usize,
    pub with_get_server_side_props: usize,
    pub with_get_static_paths: usize,
}

impl RouteSummary {
    fn from_routes(routes: &[RouteInfo]) -> Self {
        let fetches = |name: &str| count(routes, |r| r.data_fetching.iter().any(|f| f == name));
        Self {
            total: routes.len(),
            static_routes: count(routes, |r| r.route_type == RouteType::Static),
            dynamic: count(routes, |r| r.route_type == RouteType::Dynamic),
            api: count(routes, |r| r.route_type == RouteType::Api),
            catch_all: count(routes, |r| r.route_type == RouteType::CatchAll),
            with_get_static_props: fetches("getStaticProps"),
            with_get_server_side_props: fetches("getServerSideProps"),
            with_get_static_paths: fetches("getStaticPaths"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RouteAnalysis {
    pub routes: Vec<RouteInfo>,
    pub summary: RouteSummary,
}

/// Map a path relative to the pages root (forward slashes) to its route.
pub fn file_path_to_route(relative: &str) -> String {
    let mut route = regex_source_extension().replace(relative, "").into_owned();

    if route == "index" {
        route = "/".to_string();
    } else if let Some(stripped) = route.strip_suffix("/index") {
        route = stripped.to_string();
    }

    let route = regex_catch_all_segment().replace_all(&route, "*${1}");
    let route = regex_dynamic_segment().replace_all(&route, ":${1}");

    if route.starts_with('/') {
        route.into_owned()
    } else {
        format!("/{route}")
    }
}

/// Classification looks at the rewritten route for `/api` and at the raw
/// relative path for brackets.
pub fn classify_route(route_path: &str, relative: &str) -> RouteType {
    if route_path.starts_with("/api") {
        RouteType::Api
    } else if relative.contains("[...") {
        RouteType::CatchAll
    } else if relative.contains('[') {
        RouteType::Dynamic
    } else {
        RouteType::Static
    }
}

fn detect_data_fetching(unit: &SourceUnit) -> Vec<String> {
    PAGE_DATA_FETCHERS
        .iter()
        .filter(|name| exports_binding(unit, name))
        .map(|name| name.to_string())
        .collect()
}

/// HTTP verbs compared against `req.method`, unique, in first-seen order.
fn detect_api_methods(text: &str) -> Vec<String> {
    let mut methods: Vec<String> = Vec::new();
    for caps in regex_api_method().captures_iter(text) {
        let verb = &caps[1];
        if !methods.iter().any(|m| m == verb) {
            methods.push(verb.to_string());
        }
    }
    methods
}

fn relative_slash_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn extract_routes(sources: &SourceSet) -> RouteAnalysis {
    let mut routes: Vec<RouteInfo> = sources
        .iter()
        .map(|unit| {
            let relative = relative_slash_path(&unit.path, &sources.root);
            let route_path = file_path_to_route(&relative);
            let route_type = classify_route(&route_path, &relative);
            let api_methods =
                (route_type == RouteType::Api).then(|| detect_api_methods(&unit.text));
            RouteInfo {
                file_path: unit.display_path(),
                route_path,
                route_type,
                data_fetching: detect_data_fetching(unit),
                has_default_export: unit.has_default_export,
                api_methods,
            }
        })
        .collect();

    routes.sort_by(|a, b| a.route_path.cmp(&b.route_path));

    let summary = RouteSummary::from_routes(&routes);
    RouteAnalysis { routes, summary }
}

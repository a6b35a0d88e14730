//! Component prop extraction for a single file.

use serde::Serialize;

use crate::types::{ParamShape, SourceUnit, TypeMember, TypeShape};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProps {
    pub component_name: String,
    pub props_type_name: Option<String>,
    pub props: Vec<PropInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSummary {
    pub total_components: usize,
    pub total_props: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropAnalysis {
    pub components: Vec<ComponentProps>,
    pub summary: PropSummary,
}

fn is_pascal_case(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
}

fn prop_from_member(member: &TypeMember) -> PropInfo {
    if !member.is_property {
        return PropInfo {
            name: member.name.clone(),
            type_text: "unknown".to_string(),
            optional: false,
        };
    }
    PropInfo {
        name: member.name.clone(),
        type_text: member
            .type_text
            .clone()
            .unwrap_or_else(|| "any".to_string()),
        optional: member.optional,
    }
}

fn props_from_params(unit: &SourceUnit, params: &ParamShape) -> (Option<String>, Vec<PropInfo>) {
    match &params.first_annotation {
        Some(TypeShape::Reference(type_name)) => {
            let props = if let Some(iface) = unit.interface(type_name) {
                match &iface.shape {
                    // Interfaces contribute property signatures only.
                    TypeShape::Literal(members) => members
                        .iter()
                        .filter(|m| m.is_property)
                        .map(prop_from_member)
                        .collect(),
                    _ => Vec::new(),
                }
            } else {
                match unit.type_alias(type_name).map(|alias| &alias.shape) {
                    Some(TypeShape::Literal(members)) => members.iter().map(prop_from_member).collect(),
                    _ => Vec::new(),
                }
            };
            (Some(type_name.clone()), props)
        }
        Some(TypeShape::Literal(members)) => (None, members.iter().map(prop_from_member).collect()),
        Some(TypeShape::Other(_)) | None => (None, Vec::new()),
    }
}

/// Exported PascalCase function components first, then exported
/// PascalCase arrow components.
pub fn extract_props(unit: &SourceUnit) -> PropAnalysis {
    let mut components = Vec::new();

    for function in &unit.functions {
        let Some(name) = function.name.as_deref() else {
            continue;
        };
        if !is_pascal_case(name) || !(function.is_exported || function.is_default_export) {
            continue;
        }
        let (props_type_name, props) = props_from_params(unit, &function.params);
        components.push(ComponentProps {
            component_name: name.to_string(),
            props_type_name,
            props,
        });
    }

    for variable in &unit.variables {
        if !is_pascal_case(&variable.name) || !variable.is_exported {
            continue;
        }
        let Some(arrow) = &variable.arrow else {
            continue;
        };
        let (props_type_name, props) = props_from_params(unit, arrow);
        components.push(ComponentProps {
            component_name: variable.name.clone(),
            props_type_name,
            props,
        });
    }

    let summary = PropSummary {
        total_components: components.len(),
        total_props: components.iter().map(|c| c.props.len()).sum(),
    };
    PropAnalysis {
        components,
        summary,
    }
}

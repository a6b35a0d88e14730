//! Image component import report.

use serde::Serialize;

use crate::analyzer::count;
use crate::types::SourceUnit;

pub const LEGACY_IMAGE_MODULE: &str = "next/legacy/image";
pub const IMAGE_MODULE: &str = "next/image";

const LEGACY_ACTION: &str =
    "Replace import with 'next/image' and update props (layout -> fill/sizes, objectFit -> style)";
const CURRENT_ACTION: &str = "No import change needed. Verify width/height or fill prop is set.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUsage {
    pub line: usize,
    pub import_source: String,
    pub is_legacy: bool,
    pub suggested_action: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub total: usize,
    pub legacy: usize,
    pub current: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImageAnalysis {
    pub usages: Vec<ImageUsage>,
    pub summary: ImageSummary,
}

pub fn analyze_images(unit: &SourceUnit) -> ImageAnalysis {
    let usages: Vec<ImageUsage> = unit
        .imports
        .iter()
        .filter_map(|decl| {
            let (is_legacy, action) = match decl.specifier.as_str() {
                LEGACY_IMAGE_MODULE => (true, LEGACY_ACTION),
                IMAGE_MODULE => (false, CURRENT_ACTION),
                _ => return None,
            };
            Some(ImageUsage {
                line: decl.line,
                import_source: decl.specifier.clone(),
                is_legacy,
                suggested_action: action.to_string(),
            })
        })
        .collect();

    let summary = ImageSummary {
        total: usages.len(),
        legacy: count(&usages, |u| u.is_legacy),
        current: count(&usages, |u| !u.is_legacy),
    };
    ImageAnalysis { usages, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_source;
    use std::path::Path;

    #[test]
    fn legacy_and_current_imports() {
        let text = "import Legacy from 'next/legacy/image';\nimport Link from 'next/link';\nimport Image from 'next/image';\n";
        let unit = parse_source(text, Path::new("a.tsx")).expect("parse");
        let analysis = analyze_images(&unit);
        assert_eq!(analysis.usages.len(), 2);
        assert!(analysis.usages[0].is_legacy);
        assert_eq!(analysis.usages[0].line, 1);
        assert!(analysis.usages[0].suggested_action.starts_with("Replace import"));
        assert!(!analysis.usages[1].is_legacy);
        assert_eq!(analysis.usages[1].line, 3);
        assert_eq!(
            analysis.summary,
            ImageSummary {
                total: 2,
                legacy: 1,
                current: 1,
            }
        );
    }

    #[test]
    fn no_image_imports() {
        let unit = parse_source("import React from 'react';\n", Path::new("a.tsx")).expect("parse");
        assert_eq!(analyze_images(&unit).summary.total, 0);
    }
}

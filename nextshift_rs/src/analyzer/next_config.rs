//! `next.config.js` compatibility checks.
//!
//! Each rule reports at most once per file: the first line it matches.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Result, read_to_string};
use crate::regexes::regex;

use super::{Severity, count};

/// One `next.config.js` key to look for.
///
/// Object-valued keys end in `:` or `{`, function-valued ones in `:` or `(`.
pub struct ConfigRuleDef {
    pub property: &'static str,
    pub regex: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub suggested_action: &'static str,
}

/// Evaluation order.
pub const CONFIG_RULES: &[ConfigRuleDef] = &[
    ConfigRuleDef {
        property: "i18n",
        regex: r"\bi18n\s*[:{]",
        severity: Severity::Error,
        message: "Built-in i18n routing is not supported in App Router",
        suggested_action: "Use middleware-based i18n (next-intl) or implement i18n via route groups [locale]/",
    },
    ConfigRuleDef {
        property: "rewrites",
        regex: r"\brewrites\s*[:(]",
        severity: Severity::Warning,
        message: "Rewrites still work but consider using route groups and middleware",
        suggested_action: "Review rewrites - many can be replaced with route structure or middleware",
    },
    ConfigRuleDef {
        property: "redirects",
        regex: r"\bredirects\s*[:(]",
        severity: Severity::Info,
        message: "Redirects are still supported in next.config.js",
        suggested_action: "No change required. Can also use redirect() in middleware or route handlers.",
    },
    ConfigRuleDef {
        property: "webpack",
        regex: r"\bwebpack\s*[:(]",
        severity: Severity::Warning,
        message: "Custom webpack config still works but Turbopack does not support it",
        suggested_action: "Review webpack customizations for Turbopack compatibility",
    },
    ConfigRuleDef {
        property: "pageExtensions",
        regex: r"\bpageExtensions\s*[:{]",
        severity: Severity::Warning,
        message: "pageExtensions affects both pages/ and app/ directories",
        suggested_action: "Verify pageExtensions are compatible with App Router file conventions",
    },
    ConfigRuleDef {
        property: "experimental",
        regex: r"\bexperimental\s*[:{]",
        severity: Severity::Info,
        message: "Experimental features detected - some may now be stable in App Router",
        suggested_action: "Review experimental flags; appDir, serverActions are now stable",
    },
    ConfigRuleDef {
        property: "images",
        regex: r"\bimages\s*[:{]",
        severity: Severity::Info,
        message: "Image configuration is still supported",
        suggested_action: "No change required. Verify remotePatterns config is up to date.",
    },
    ConfigRuleDef {
        property: "headers",
        regex: r"\bheaders\s*[:(]",
        severity: Severity::Info,
        message: "Custom headers are still supported in next.config.js",
        suggested_action: "No change required. Can also set headers in middleware or route handlers.",
    },
];

fn compiled_rules() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| CONFIG_RULES.iter().map(|r| regex(r.regex)).collect())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigIssue {
    pub property: String,
    pub line: usize,
    pub severity: Severity,
    pub message: String,
    pub suggested_action: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConfigAnalysis {
    pub issues: Vec<ConfigIssue>,
    pub summary: ConfigSummary,
}

pub fn analyze_config_text(text: &str) -> ConfigAnalysis {
    let lines: Vec<&str> = text.split('\n').collect();
    let issues: Vec<ConfigIssue> = CONFIG_RULES
        .iter()
        .zip(compiled_rules())
        .filter_map(|(rule, re)| {
            let index = lines.iter().position(|line| re.is_match(line))?;
            Some(ConfigIssue {
                property: rule.property.to_string(),
                line: index + 1,
                severity: rule.severity,
                message: rule.message.to_string(),
                suggested_action: rule.suggested_action.to_string(),
            })
        })
        .collect();

    let summary = ConfigSummary {
        total: issues.len(),
        errors: count(&issues, |i| i.severity == Severity::Error),
        warnings: count(&issues, |i| i.severity == Severity::Warning),
        info: count(&issues, |i| i.severity == Severity::Info),
    };
    ConfigAnalysis { issues, summary }
}

pub fn analyze_config(config_path: &Path) -> Result<ConfigAnalysis> {
    let text = read_to_string(config_path)?;
    Ok(analyze_config_text(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"/** @type {import('next').NextConfig} */
module.exports = {
  reactStrictMode: true,
  i18n: {
    locales: ['en', 'fr'],
    defaultLocale: 'en',
  },
  images: { domains: ['example.com'] },
  async rewrites() {
    return [{ source: '/old', destination: '/new' }];
  },
  async redirects() {
    return [];
  },
  webpack: (config) => config,
  async rewrites() { return []; },
};
"#;

    #[test]
    fn rules_report_first_match_in_rule_order() {
        let analysis = analyze_config_text(CONFIG);
        let found: Vec<_> = analysis
            .issues
            .iter()
            .map(|i| (i.property.as_str(), i.line, i.severity))
            .collect();
        assert_eq!(
            found,
            vec![
                ("i18n", 4, Severity::Error),
                ("rewrites", 9, Severity::Warning),
                ("redirects", 12, Severity::Info),
                ("webpack", 15, Severity::Warning),
                ("images", 8, Severity::Info),
            ]
        );
        assert_eq!(
            analysis.summary,
            ConfigSummary {
                total: 5,
                errors: 1,
                warnings: 2,
                info: 2,
            }
        );
    }

    #[test]
    fn plain_config_has_no_issues() {
        let analysis = analyze_config_text("module.exports = { reactStrictMode: true };\n");
        assert!(analysis.issues.is_empty());
        assert_eq!(analysis.summary.total, 0);
    }

    #[test]
    fn word_boundary_avoids_partial_keys() {
        let analysis = analyze_config_text("const myimages = {};\nconst x = { customHeaders: [] };\n");
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn every_rule_matches_its_own_key() {
        for (rule, re) in CONFIG_RULES.iter().zip(compiled_rules()) {
            let object_form = format!("{}: {{", rule.property);
            let method_form = format!("{}(", rule.property);
            assert!(
                re.is_match(&object_form) || re.is_match(&method_form),
                "{} does not match its key",
                rule.property
            );
        }
        let properties: Vec<_> = CONFIG_RULES.iter().map(|r| r.property).collect();
        assert_eq!(
            properties,
            vec![
                "i18n",
                "rewrites",
                "redirects",
                "webpack",
                "pageExtensions",
                "experimental",
                "images",
                "headers",
            ]
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = analyze_config(Path::new("/no/such/next.config.js")).unwrap_err();
        assert!(err.is_not_found());
    }
}

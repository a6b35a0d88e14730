//! Runs a parsed [`Cli`] and returns the document to print.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, info};

use crate::analyzer::components::inventory_components;
use crate::analyzer::dead_exports::detect_dead_exports;
use crate::analyzer::dependencies::analyze_dependencies;
use crate::analyzer::next_config::analyze_config;
use crate::analyzer::props::extract_props;
use crate::analyzer::routes::extract_routes;
use crate::analyzer::validator::validate_migration;
use crate::config::ShiftConfig;
use crate::output::{format_diff, format_json};
use crate::source::{OxcProvider, SourceSet, parse_file};
use crate::state::{ErrorDraft, StateStore};
use crate::tables::{KnownReplacements, TransformRules};
use crate::templates::{
    LayoutData, Metadata, PageData, render_error, render_layout, render_loading, render_page,
    render_route,
};
use crate::transform::data_fetching::analyze_data_fetching;
use crate::transform::image::analyze_images;
use crate::transform::imports::{TransformOptions, transform_imports};
use crate::transform::router::analyze_router;

use super::command::*;

/// Execute `cli` and return what should go to stdout.
pub fn execute(cli: &Cli) -> Result<String> {
    let project = cli.global.project.as_path();
    let config = ShiftConfig::load(project);
    debug!(project = %project.display(), "config loaded");

    match &cli.command {
        Command::Analyze(cmd) => run_analyze(cmd, &config),
        Command::Transform(cmd) => run_transform(cmd, &config),
        Command::Validate { app_dir } => {
            let sources = load_sources(app_dir, &config)?;
            json_out(&validate_migration(&sources))
        }
        Command::State(cmd) => run_state(cmd, &StateStore::new(project)),
        Command::Errors(cmd) => run_errors(cmd, &StateStore::new(project)),
        Command::Scaffold(cmd) => Ok(run_scaffold(cmd)),
    }
}

fn json_out<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(format_json(value)?)
}

fn load_sources(dir: &Path, config: &ShiftConfig) -> Result<SourceSet> {
    SourceSet::load(dir, &config.scan_options(), &OxcProvider)
        .with_context(|| format!("failed to load sources from {}", dir.display()))
}

fn run_analyze(cmd: &AnalyzeCommand, config: &ShiftConfig) -> Result<String> {
    match cmd {
        AnalyzeCommand::Routes { pages_dir } => {
            json_out(&extract_routes(&load_sources(pages_dir, config)?))
        }
        AnalyzeCommand::Components { src_dir } => {
            json_out(&inventory_components(&load_sources(src_dir, config)?))
        }
        AnalyzeCommand::Dependencies { package_json } => {
            let known = KnownReplacements::load(&config.tables)?;
            let analysis = analyze_dependencies(package_json, &known)
                .with_context(|| format!("failed to analyze {}", package_json.display()))?;
            json_out(&analysis)
        }
        AnalyzeCommand::DeadCode { src_dir } => {
            json_out(&detect_dead_exports(&load_sources(src_dir, config)?))
        }
        AnalyzeCommand::Props { file } => json_out(&extract_props(&parse_file(file)?)),
        AnalyzeCommand::Config { config_path } => {
            let analysis = analyze_config(config_path)
                .with_context(|| format!("failed to analyze {}", config_path.display()))?;
            json_out(&analysis)
        }
    }
}

fn run_transform(cmd: &TransformCommand, config: &ShiftConfig) -> Result<String> {
    match cmd {
        TransformCommand::Imports(args) => {
            let unit = parse_file(&args.file)?;
            let rules = TransformRules::load(&config.tables)?;
            let result = transform_imports(
                &unit,
                &rules,
                TransformOptions {
                    dry_run: args.dry_run,
                },
            );
            if args.write && result.code != unit.text {
                std::fs::write(&args.file, &result.code)
                    .with_context(|| format!("failed to write {}", args.file.display()))?;
                info!(file = %args.file.display(), "imports rewritten");
            }
            if args.diff {
                Ok(format_diff(
                    &unit.text,
                    &result.code,
                    &args.file.to_string_lossy(),
                ))
            } else {
                json_out(&result)
            }
        }
        TransformCommand::DataFetching { file } => {
            json_out(&analyze_data_fetching(&parse_file(file)?))
        }
        TransformCommand::Router { file } => json_out(&analyze_router(&parse_file(file)?)),
        TransformCommand::Image { file } => json_out(&analyze_images(&parse_file(file)?)),
    }
}

fn run_state(cmd: &StateCommand, store: &StateStore) -> Result<String> {
    match cmd {
        StateCommand::Init => json_out(&store.init()?),
        StateCommand::Show => json_out(&store.read()?),
        StateCommand::Update { phase, status } => json_out(&store.update_phase(phase, *status)?),
        StateCommand::Resume => json_out(&json!({ "resumePoint": store.resume_point()? })),
    }
}

fn run_errors(cmd: &ErrorsCommand, store: &StateStore) -> Result<String> {
    match cmd {
        ErrorsCommand::List => json_out(&store.errors()?),
        ErrorsCommand::Log {
            phase,
            message,
            file,
            severity,
        } => {
            let mut draft = ErrorDraft::new(phase, message, *severity);
            draft.file = file.clone();
            json_out(&store.log_error(draft)?)
        }
        ErrorsCommand::Resolve { id } => {
            json_out(&json!({ "id": id, "resolved": store.resolve_error(id)? }))
        }
    }
}

fn run_scaffold(cmd: &ScaffoldCommand) -> String {
    match cmd {
        ScaffoldCommand::Layout {
            name,
            is_root,
            title,
            description,
        } => render_layout(&LayoutData {
            name: name.clone(),
            is_root: *is_root,
            metadata: title.clone().zip(description.clone()).map(|(title, description)| Metadata {
                title,
                description,
            }),
        }),
        ScaffoldCommand::Page {
            name,
            is_client,
            is_async,
        } => render_page(&PageData {
            name: name.clone(),
            is_client: *is_client,
            is_async: *is_async,
            ..Default::default()
        }),
        ScaffoldCommand::Route { methods } => render_route(methods),
        ScaffoldCommand::Loading { name } => render_loading(name),
        ScaffoldCommand::Error { name } => render_error(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> Result<String> {
        execute(&Cli::try_parse_from(args).expect("parse"))
    }

    #[test]
    fn state_round_trip_through_commands() {
        let dir = TempDir::new().expect("tempdir");
        let project = dir.path().to_str().expect("utf-8 path");

        run(&["nextshift", "--project", project, "state", "init"]).expect("init");
        run(&[
            "nextshift",
            "--project",
            project,
            "state",
            "update",
            "assessment",
            "completed",
        ])
        .expect("update");
        let out = run(&["nextshift", "--project", project, "state", "resume"]).expect("resume");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["resumePoint"], "planning");
    }

    #[test]
    fn show_without_state_is_null() {
        let dir = TempDir::new().expect("tempdir");
        let project = dir.path().to_str().expect("utf-8 path");
        let out = run(&["nextshift", "--project", project, "state", "show"]).expect("show");
        assert_eq!(out, "null");
    }

    #[test]
    fn imports_diff_and_write() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("page.tsx");
        fs::write(&file, "import Head from 'next/head';\nexport const x = 1;\n").expect("write");
        let path = file.to_str().expect("utf-8 path");

        let diff = run(&["nextshift", "transform", "imports", path, "--diff"]).expect("diff");
        assert!(diff.contains("-import Head from 'next/head';"));
        assert!(diff.contains("+export const x = 1;"));

        run(&["nextshift", "transform", "imports", path, "--write"]).expect("write");
        assert_eq!(fs::read_to_string(&file).expect("read"), "export const x = 1;\n");
    }

    #[test]
    fn scaffold_root_layout() {
        let out = run(&[
            "nextshift",
            "scaffold",
            "layout",
            "Root",
            "--root",
            "--title",
            "My App",
            "--description",
            "A great app",
        ])
        .expect("scaffold");
        assert!(out.contains("export default function RootLayout("));
        assert!(out.contains("<html lang=\"en\">"));
        assert!(out.contains("description: \"A great app\""));
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("nope");
        let err = run(&[
            "nextshift",
            "analyze",
            "routes",
            missing.to_str().expect("utf-8 path"),
        ])
        .expect_err("missing dir");
        assert!(format!("{err:#}").contains("failed to load sources"));
    }
}

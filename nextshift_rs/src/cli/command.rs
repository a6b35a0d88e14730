//! Command and option types. clap derives the parser from these.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::analyzer::Severity;
use crate::state::PhaseStatus;

#[derive(Parser, Debug)]
#[command(name = "nextshift")]
#[command(about = "Static analysis and codemods for moving a Next.js project from pages/ to app/")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Project root; holds `.migration/` (config, progress, error log)
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Log level (trace, debug, info, warn, error). RUST_LOG wins when set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run analysis on source files
    #[command(subcommand)]
    Analyze(AnalyzeCommand),

    /// Rewrite imports or report what a file needs to migrate
    #[command(subcommand)]
    Transform(TransformCommand),

    /// Validate migrated app/ files
    Validate {
        /// Path to the app/ directory
        app_dir: PathBuf,
    },

    /// Track migration phases in .migration/progress.json
    #[command(subcommand)]
    State(StateCommand),

    /// Record migration problems in .migration/errors.json
    #[command(subcommand)]
    Errors(ErrorsCommand),

    /// Print an app/ file scaffold
    #[command(subcommand)]
    Scaffold(ScaffoldCommand),
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeCommand {
    /// Extract and classify routes from a pages/ directory
    Routes { pages_dir: PathBuf },
    /// Inventory components and classify client vs server
    Components { src_dir: PathBuf },
    /// Classify package.json dependencies for app-router compatibility
    Dependencies { package_json: PathBuf },
    /// Find exports nothing imports
    DeadCode { src_dir: PathBuf },
    /// Extract prop types from a component file
    Props { file: PathBuf },
    /// Flag next.config.js options that change under the app router
    Config { config_path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum TransformCommand {
    /// Rewrite framework imports
    Imports(ImportsArgs),
    /// Report getStaticProps / getServerSideProps / getStaticPaths / getInitialProps
    DataFetching { file: PathBuf },
    /// Report legacy router API usage
    Router { file: PathBuf },
    /// Report image component imports
    Image { file: PathBuf },
}

#[derive(Args, Debug)]
pub struct ImportsArgs {
    pub file: PathBuf,

    /// Report changes without rewriting the code
    #[arg(long)]
    pub dry_run: bool,

    /// Print a line diff instead of the JSON report
    #[arg(long)]
    pub diff: bool,

    /// Write the rewritten code back to the file
    #[arg(long, conflicts_with = "dry_run")]
    pub write: bool,
}

#[derive(Subcommand, Debug)]
pub enum StateCommand {
    /// Start tracking; every phase begins pending
    Init,
    /// Print the current progress document
    Show,
    /// Set one phase's status
    Update {
        phase: String,
        #[arg(value_enum)]
        status: PhaseStatus,
    },
    /// Print the first phase that is not completed
    Resume,
}

#[derive(Subcommand, Debug)]
pub enum ErrorsCommand {
    /// Print every logged error
    List,
    /// Append an entry to the log
    Log {
        #[arg(long)]
        phase: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        file: Option<String>,
        #[arg(long, value_enum, default_value = "error")]
        severity: Severity,
    },
    /// Mark an entry resolved
    Resolve { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ScaffoldCommand {
    /// layout.tsx
    Layout {
        name: String,
        /// Root layout with <html> and <body>
        #[arg(long = "root")]
        is_root: bool,
        #[arg(long, requires = "description")]
        title: Option<String>,
        #[arg(long, requires = "title")]
        description: Option<String>,
    },
    /// page.tsx
    Page {
        name: String,
        #[arg(long = "client")]
        is_client: bool,
        #[arg(long = "async")]
        is_async: bool,
    },
    /// route.ts with one handler per method
    Route {
        #[arg(required = true, value_delimiter = ',')]
        methods: Vec<String>,
    },
    /// loading.tsx
    Loading { name: String },
    /// error.tsx
    Error { name: String },
}

//! Command-line surface.
//!
//! ```text
//! nextshift [--project DIR] [--log-level LEVEL] <command>
//!
//!   analyze   routes | components | dependencies | dead-code | props | config
//!   transform imports | data-fetching | router | image
//!   validate  <appDir>
//!   state     init | show | update <phase> <status> | resume
//!   errors    list | log | resolve <id>
//! ```
//!
//! Every command writes exactly one document to stdout (JSON, or a diff for
//! `transform imports --diff`). Logs go to stderr.
//!
//! - [`command`] - clap definitions
//! - [`dispatch`] - runs a parsed command against the library

pub mod command;
pub mod dispatch;

pub use command::{Cli, Command, GlobalOptions};
pub use dispatch::execute;

use std::any::Any;
use std::io::Write;
use std::panic;
use std::process::ExitCode;

use clap::Parser;

use nextshift::cli::{Cli, execute};

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Downstream closed the pipe (e.g. `| head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn main() -> ExitCode {
    install_broken_pipe_handler();

    let cli = Cli::parse();

    // stdout carries the JSON document, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.global.log_level.parse().unwrap_or_default()),
        )
        .init();

    match execute(&cli) {
        Ok(document) => {
            let mut stdout = std::io::stdout().lock();
            if !document.is_empty() {
                let _ = writeln!(stdout, "{document}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[nextshift] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

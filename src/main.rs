//! gm CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use gm::cli::{Cli, CommandDispatcher};
use gm::config::Paths;
use gm::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so `gm message` output stays clean.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("gm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gm=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("gm starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let paths = Paths::resolve(cli.config.as_deref(), cli.cache.as_deref());
    tracing::debug!(
        "Config {}, cache {}",
        paths.config().display(),
        paths.cache().display()
    );

    let mut ui = create_ui(true, output_mode);
    let dispatcher = CommandDispatcher::new(paths);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

pub mod cli;
pub mod commands;
pub mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// per-mod progress lines.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,modinstaller_lib=debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("ModInstaller starting...");
    cli::execute(cli).await;
}

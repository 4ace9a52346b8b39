use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use crate::commands::{self, BatchEvent};
use crate::core::resolver::{ResolutionOutcome, Resolver};
use crate::core::state::InstallerSettings;

#[derive(Debug, Parser)]
#[command(name = "modinstaller")]
#[command(version)]
#[command(about = "Download Fabric builds of Modrinth mods for a Minecraft version")]
#[command(after_help = "Examples:\n  \
    modinstaller mods.txt 1.21.3 ./downloads\n  \
    modinstaller \"itemlore,xaeros-minimap\" 1.21.3 ./downloads")]
pub struct Cli {
    /// Comma-separated slugs or Modrinth URLs, or a .txt file with one per line
    pub slugs: String,

    /// Minecraft version the builds must support (e.g. 1.21.3)
    pub game_version: String,

    /// Directory the files are written to (created if missing)
    pub destination: PathBuf,

    /// Settings file to use instead of the default location
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Override the registry API base URL
    #[arg(long)]
    pub api_base: Option<String>,

    /// Verbose mode: debug logging for the installer
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// A line of console output and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub to_stderr: bool,
    pub text: String,
}

impl ConsoleLine {
    fn out(text: String) -> Self {
        Self {
            to_stderr: false,
            text,
        }
    }

    fn err(text: String) -> Self {
        Self {
            to_stderr: true,
            text,
        }
    }

    fn print(&self) {
        if self.to_stderr {
            eprintln!("{}", self.text);
        } else {
            println!("{}", self.text);
        }
    }
}

pub fn render_event(event: &BatchEvent) -> ConsoleLine {
    match event {
        BatchEvent::Started { index, total, slug } => {
            ConsoleLine::out(format!("[{}/{}] Processing mod: {}", index + 1, total, slug))
        }
        BatchEvent::Finished { slug, outcome, .. } => match outcome {
            ResolutionOutcome::Downloaded(record) => ConsoleLine::out(format!(
                "[INFO] {}: downloaded {} ({} bytes) to {}",
                slug,
                record.filename,
                record.bytes_written,
                record.path.display()
            )),
            ResolutionOutcome::Unresolved(reason) if reason.is_error() => {
                ConsoleLine::err(format!("[ERROR] {slug}: {reason}"))
            }
            ResolutionOutcome::Unresolved(reason) => {
                ConsoleLine::out(format!("[INFO] {slug}: {reason}"))
            }
        },
        BatchEvent::Completed(summary) => ConsoleLine::out(format!(
            "Done: {} downloaded, {} skipped, {} failed",
            summary.downloaded, summary.skipped, summary.failed
        )),
    }
}

/// Run a parsed command line to completion. Problems are reported, never
/// turned into a failing exit status.
pub async fn execute(cli: Cli) {
    let settings = InstallerSettings::load(cli.settings.as_deref()).with_api_base(cli.api_base);

    let resolver = match Resolver::from_settings(&settings) {
        Ok(resolver) => Arc::new(resolver),
        Err(err) => {
            ConsoleLine::err(format!("[ERROR] Cannot set up registry client: {err}")).print();
            return;
        }
    };

    let requests =
        match commands::requests_from_input(&cli.slugs, &cli.game_version, &cli.destination).await
        {
            Ok(requests) => requests,
            Err(err) => {
                ConsoleLine::err(format!("Error reading file: {}: {err}", cli.slugs)).print();
                return;
            }
        };

    if requests.is_empty() {
        ConsoleLine::err("[WARN] No mod slugs given".to_string()).print();
        return;
    }

    let (worker, mut events) = commands::spawn_batch(resolver, requests);
    while let Some(event) = events.recv().await {
        render_event(&event).print();
    }

    if let Err(err) = worker.await {
        error!("Batch worker stopped unexpectedly: {}", err);
    }
}

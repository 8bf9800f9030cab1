//! decklist-dl - download card images for a decklist
//!
//! Reads a decklist from a file or standard input, resolves every card against the
//! Scryfall collection endpoint and saves the images into an output folder.

use clap::Parser;
use decklist_dl::{DeckDownloader, Error, Result, RunReport};
use std::io::IsTerminal;
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

mod cli;
mod progress;

use cli::Cli;
use progress::ProgressDisplay;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(report) => {
            if let Err(e) = write_summary(&mut std::io::stderr().lock(), &report) {
                tracing::debug!(error = %e, "failed to write summary");
            }
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, Error::EmptyInput) {
                eprintln!("Tip: lines look like \"4 Lightning Bolt\" or \"1 Opt (XLN) 65\".");
            }
            std::process::ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok(), debug))
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

/// `RUST_LOG` directives (default `warn`), plus crate debug logging with `--debug`
fn log_filter(rust_log: Option<String>, debug: bool) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    if !debug {
        return filter;
    }
    match "decklist_dl=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

async fn run(cli: Cli) -> Result<RunReport> {
    let config = cli.to_config();
    let text = read_input(&cli).await?;

    let mut display = ProgressDisplay::new(config.output_dir.clone());
    let downloader = DeckDownloader::new(config)?;
    let mut events = downloader.subscribe();
    let listener = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => display.handle(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "progress display lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
        display.abandon();
    });

    let result = downloader.run(&text).await;

    // Closing the channel ends the listener
    drop(downloader);
    if let Err(e) = listener.await {
        tracing::warn!(error = %e, "progress display task failed");
    }

    result
}

async fn read_input(cli: &Cli) -> Result<String> {
    let text = match &cli.input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            if std::io::stdin().is_terminal() {
                eprintln!("Paste your decklist, then press Ctrl-D (Ctrl-Z and Enter on Windows):");
            }
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };

    if text.trim().is_empty() {
        match &cli.input {
            Some(path) => eprintln!("Warning: {} is empty", path.display()),
            None => eprintln!("Warning: no input received on standard input"),
        }
    }
    Ok(text)
}

/// Write the end-of-run report (missing cards, per-card errors, totals)
fn write_summary(out: &mut impl std::io::Write, report: &RunReport) -> std::io::Result<()> {
    if !report.missing.is_empty() {
        writeln!(out, "\nNot found ({}):", report.missing.len())?;
        for identifier in &report.missing {
            writeln!(out, "  - {identifier}")?;
        }
    }

    if !report.errors.is_empty() {
        writeln!(out, "\nErrors ({}):", report.errors.len())?;
        for error in &report.errors {
            writeln!(out, "  - {error}")?;
        }
    }

    writeln!(
        out,
        "Saved {} file(s), skipped {} existing.",
        report.saved.len(),
        report.skipped.len()
    )?;
    writeln!(out, "Done.")
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use decklist_dl::{DownloadError, Identifier};
    use std::path::PathBuf;

    #[test]
    fn summary_lists_missing_cards_and_errors_before_done() {
        let report = RunReport {
            saved: vec![PathBuf::from("cards/Opt (xln) 65.png")],
            missing: vec![Identifier::Name {
                name: "Llightning Bolt".into(),
            }],
            errors: vec![DownloadError::new(
                "Ponder",
                &Error::HttpStatus {
                    url: "https://img.example/ponder.png".into(),
                    status: 503,
                },
            )],
            ..Default::default()
        };

        let mut out = Vec::new();
        write_summary(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "\nNot found (1):\n  - Llightning Bolt\n\
             \nErrors (1):\n  - Ponder: HTTP 503 fetching https://img.example/ponder.png\n\
             Saved 1 file(s), skipped 0 existing.\nDone.\n"
        );
    }

    #[test]
    fn clean_summary_only_reports_totals() {
        let mut out = Vec::new();
        write_summary(&mut out, &RunReport::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Saved 0 file(s), skipped 0 existing.\nDone.\n"
        );
    }

    #[test]
    fn log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None, false).to_string().to_lowercase(), "warn");
    }

    #[test]
    fn debug_flag_keeps_rust_log_directives() {
        let filter = log_filter(Some("reqwest=trace".into()), true)
            .to_string()
            .to_lowercase();
        assert!(filter.contains("reqwest=trace"), "{filter}");
        assert!(filter.contains("decklist_dl=debug"), "{filter}");
    }

    #[test]
    fn rust_log_is_used_without_debug_flag() {
        let filter = log_filter(Some("decklist_dl=info".into()), false)
            .to_string()
            .to_lowercase();
        assert_eq!(filter, "decklist_dl=info");
    }
}

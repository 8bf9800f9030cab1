//! Progress bar display driven by downloader events

use decklist_dl::Event;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Terminal progress for one run
pub struct ProgressDisplay {
    output_dir: PathBuf,
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a display for a run writing into `output_dir`
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            bar: ProgressBar::hidden(),
        }
    }

    /// Update the display for one event
    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::Parsed { entries, unique } => {
                eprintln!("Output folder: {}", self.output_dir.display());
                eprintln!("Found {unique} unique identifiers from {entries} lines.");
                self.bar = ProgressBar::new_spinner();
                self.bar.enable_steady_tick(Duration::from_millis(120));
            }
            Event::Resolving { batch, batches } => {
                self.bar
                    .set_message(format!("Looking up batch {}/{batches}", batch + 1));
            }
            Event::Resolved { found, .. } => {
                self.bar.disable_steady_tick();
                self.bar.set_style(bar_style());
                self.bar.set_length(*found as u64);
                self.bar.set_position(0);
            }
            Event::CardStarted { name, .. } => {
                self.bar.set_message(truncate(name));
            }
            Event::FileSaved { .. } => {}
            Event::FileSkipped { path } => {
                self.bar
                    .println(format!("Skipping existing file {}", path.display()));
            }
            Event::CardFailed { name, error } => {
                self.bar.println(format!("Failed {name}: {error}"));
            }
            Event::CardFinished { .. } => self.bar.inc(1),
            Event::Finished { .. } => self.bar.finish_and_clear(),
        }
    }

    /// Abandon the bar if the run ended without a `Finished` event
    pub fn abandon(&self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

// Keep long card names from wrapping the bar
fn truncate(name: &str) -> String {
    const MAX: usize = 50;
    if name.chars().count() > MAX {
        let tail: String = name.chars().take(MAX - 3).collect();
        format!("{tail}...")
    } else {
        name.to_string()
    }
}

//! Download orchestration: decklist text in, image files and a report out.
//!
//! The `DeckDownloader` drives the pipeline sequentially:
//! - parse and aggregate the decklist ([`crate::deck`])
//! - resolve entries in batches ([`crate::scryfall::resolve`])
//! - select images, name files and fetch them one at a time ([`fetch`])
//!
//! Per-card failures are recorded in the [`RunReport`] and never stop the run.

pub mod fetch;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use fetch::{HttpFetcher, ImageFetcher};

use crate::config::Config;
use crate::deck::{aggregate, parse_decklist};
use crate::error::{DownloadError, Error, Result};
use crate::naming::{build_filename, claim_unique_path, infer_extension};
use crate::scryfall::{CardLookup, ScryfallClient, build_http_client, resolve, select_images};
use crate::types::{Event, FetchOutcome, Resolution, ResolvedCard, RunReport};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct DeckDownloader {
    /// Configuration (wrapped in Arc for sharing)
    pub(crate) config: Arc<Config>,
    /// Collection lookup used by the batch resolver
    pub(crate) lookup: Arc<dyn CardLookup>,
    /// Image fetcher used for every file
    pub(crate) fetcher: Arc<dyn ImageFetcher>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl DeckDownloader {
    /// Create a downloader talking to the configured API over HTTP
    ///
    /// One HTTP client (timeout and User-Agent from the config) is shared by the
    /// lookups and the image downloads.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config)?;
        let lookup = Arc::new(ScryfallClient::with_client(client.clone(), &config.api_url));
        let fetcher = Arc::new(HttpFetcher::new(client));
        Self::with_services(config, lookup, fetcher)
    }

    /// Create a downloader with custom lookup and fetch implementations
    pub fn with_services(
        config: Config,
        lookup: Arc<dyn CardLookup>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Result<Self> {
        config.validate()?;
        let (event_tx, _rx) = tokio::sync::broadcast::channel(1000);
        Ok(Self {
            config: Arc::new(config),
            lookup,
            fetcher,
            event_tx,
        })
    }

    /// Subscribe to progress events
    ///
    /// Events sent before subscribing are not replayed.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline over decklist text
    ///
    /// Fails only for fatal conditions: no parsable cards (checked before any network
    /// access), a failed or misaligned batch lookup, or an output directory that cannot
    /// be created. Everything else ends up in the returned report.
    pub async fn run(&self, decklist: &str) -> Result<RunReport> {
        let entries = parse_decklist(decklist);
        if entries.is_empty() {
            return Err(Error::EmptyInput);
        }
        let parsed_entries = entries.len();

        let aggregated = aggregate(entries, self.config.unique);
        tracing::info!(
            entries = parsed_entries,
            unique = aggregated.len(),
            output = %self.config.output_dir.display(),
            "parsed decklist"
        );
        self.emit(Event::Parsed {
            entries: parsed_entries,
            unique: aggregated.len(),
        });

        let Resolution { cards, missing } = resolve(
            self.lookup.as_ref(),
            &aggregated,
            self.config.batch_size,
            Some(&self.event_tx),
        )
        .await?;

        let mut report = RunReport {
            parsed_entries,
            unique_cards: aggregated.len(),
            missing,
            ..Default::default()
        };
        self.download_all(&cards, &mut report).await?;

        self.emit(Event::Finished {
            processed: report.processed,
        });
        Ok(report)
    }

    /// Download every resolved card into the output directory
    ///
    /// Creates the output directory first. Per-card failures are appended to
    /// `report.errors`.
    pub async fn download_all(&self, cards: &[ResolvedCard], report: &mut RunReport) -> Result<()> {
        let output_dir = &self.config.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| Error::OutputDir {
                path: output_dir.clone(),
                source,
            })?;

        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let total = cards.len();

        for (index, resolved) in cards.iter().enumerate() {
            let name = resolved.card.name.clone();
            self.emit(Event::CardStarted {
                index,
                total,
                name: name.clone(),
            });

            if let Err(e) = self.download_card(resolved, &mut claimed, report).await {
                tracing::debug!(card = %name, error = %e, "card download failed");
                self.emit(Event::CardFailed {
                    name: name.clone(),
                    error: e.to_string(),
                });
                report.errors.push(DownloadError::new(name, &e));
            }

            report.processed += 1;
            self.emit(Event::CardFinished { index });
        }

        Ok(())
    }

    /// Download all images of one card
    async fn download_card(
        &self,
        resolved: &ResolvedCard,
        claimed: &mut HashSet<PathBuf>,
        report: &mut RunReport,
    ) -> Result<()> {
        let images = select_images(&resolved.card, self.config.image_size)?;

        for image in images {
            let stem = build_filename(&resolved.card, resolved.quantity, &image.face_suffix);
            let extension = infer_extension(&image.url);
            let dest = claim_unique_path(
                &self.config.output_dir,
                &stem,
                &extension,
                claimed,
                self.config.collisions,
            );

            match self
                .fetcher
                .fetch(&image.url, &dest, self.config.overwrite)
                .await?
            {
                FetchOutcome::Saved { bytes } => {
                    self.emit(Event::FileSaved {
                        path: dest.clone(),
                        bytes,
                    });
                    report.saved.push(dest);
                    if !self.config.delay.is_zero() {
                        tokio::time::sleep(self.config.delay).await;
                    }
                }
                FetchOutcome::Skipped => {
                    self.emit(Event::FileSkipped { path: dest.clone() });
                    report.skipped.push(dest);
                }
            }
        }

        Ok(())
    }

    fn emit(&self, event: Event) {
        // No subscribers is fine
        self.event_tx.send(event).ok();
    }
}

//! Core types and events for decklist-dl

use crate::error::DownloadError;
use crate::scryfall::{Card, Identifier};
use serde::Serialize;
use std::path::PathBuf;

/// One card line from a decklist
///
/// Produced by [`parse_line`](crate::deck::parse_line). After aggregation the same
/// type carries the summed quantity for its identity key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CardEntry {
    /// Number of copies (always at least 1)
    pub quantity: u32,
    /// Card name, with double-faced names joined by `" // "`
    pub name: String,
    /// Lowercase set code, e.g. `lea`
    pub set_code: Option<String>,
    /// Collector number within the set, e.g. `162` or `12a`
    pub collector_number: Option<String>,
}

impl CardEntry {
    /// Create an entry with just a name and quantity
    pub fn new(quantity: u32, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
            set_code: None,
            collector_number: None,
        }
    }

    /// Attach a set code (stored lowercase)
    #[must_use]
    pub fn with_set(mut self, set_code: impl AsRef<str>) -> Self {
        self.set_code = Some(set_code.as_ref().to_lowercase());
        self
    }

    /// Attach a collector number
    #[must_use]
    pub fn with_collector_number(mut self, collector_number: impl Into<String>) -> Self {
        self.collector_number = Some(collector_number.into());
        self
    }
}

/// Canonical decklist form: `qty name (set) number`
impl std::fmt::Display for CardEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)?;
        if let Some(set) = &self.set_code {
            write!(f, " ({set})")?;
        }
        if let Some(number) = &self.collector_number {
            write!(f, " {number}")?;
        }
        Ok(())
    }
}

/// A card object returned by the lookup API, paired with the quantity requested for it
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedCard {
    /// Card data as returned by the API
    pub card: Card,
    /// Summed (or unique-mode) quantity from the aggregated entry
    pub quantity: u32,
}

/// Output of the batch resolver
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Resolved cards in decklist order
    pub cards: Vec<ResolvedCard>,
    /// Identifiers the API could not resolve, across all batches
    pub missing: Vec<Identifier>,
}

/// Summary of a complete run
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    /// Number of card entries parsed from the input
    pub parsed_entries: usize,
    /// Number of distinct cards after aggregation
    pub unique_cards: usize,
    /// Number of resolved cards the orchestrator attempted to download
    pub processed: usize,
    /// Files written during this run
    pub saved: Vec<PathBuf>,
    /// Files left untouched because they already existed
    pub skipped: Vec<PathBuf>,
    /// Identifiers the API reported as not found
    pub missing: Vec<Identifier>,
    /// Per-card failures
    pub errors: Vec<DownloadError>,
}

impl RunReport {
    /// True when every identifier resolved and every card downloaded
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.errors.is_empty()
    }
}

/// Outcome of a single image fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The image was downloaded and written
    Saved {
        /// Number of bytes written
        bytes: u64,
    },
    /// The destination already existed and overwrite was not requested
    Skipped,
}

/// Progress events broadcast by [`DeckDownloader`](crate::DeckDownloader)
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Input parsed and aggregated
    Parsed {
        /// Card entries parsed from the input
        entries: usize,
        /// Distinct cards after aggregation
        unique: usize,
    },
    /// A lookup request is about to be sent
    Resolving {
        /// Zero-based batch index
        batch: usize,
        /// Total number of batches
        batches: usize,
    },
    /// All batches resolved
    Resolved {
        /// Cards found
        found: usize,
        /// Identifiers not found
        missing: usize,
    },
    /// Downloads for a card are starting
    CardStarted {
        /// Zero-based position in the resolved list
        index: usize,
        /// Number of resolved cards
        total: usize,
        /// Card name
        name: String,
    },
    /// An image was written to disk
    FileSaved {
        /// Destination path
        path: PathBuf,
        /// Bytes written
        bytes: u64,
    },
    /// An image already existed and was left alone
    FileSkipped {
        /// Destination path
        path: PathBuf,
    },
    /// A card's download was abandoned
    CardFailed {
        /// Card name
        name: String,
        /// Failure description
        error: String,
    },
    /// Processing of a card ended, successfully or not
    CardFinished {
        /// Zero-based position in the resolved list
        index: usize,
    },
    /// The run completed
    Finished {
        /// Number of cards processed
        processed: usize,
    },
}

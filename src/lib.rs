//! # decklist-dl
//!
//! Download card images for every card in a trading-card decklist.
//!
//! ## Pipeline
//!
//! decklist-dl runs one strictly sequential pipeline:
//! - **Parse** - loose decklist text into [`CardEntry`] values ([`deck::parse_decklist`])
//! - **Aggregate** - merge duplicates by card identity ([`deck::aggregate`])
//! - **Resolve** - batch lookups against the Scryfall collection endpoint ([`scryfall`])
//! - **Download** - one file per card face, named after the card ([`downloader`])
//!
//! Per-card failures never stop a run; they are collected into the [`RunReport`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use decklist_dl::{Config, DeckDownloader, ImageSize};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         image_size: ImageSize::Large,
//!         output_dir: "burn_cards".into(),
//!         ..Default::default()
//!     };
//!
//!     let downloader = DeckDownloader::new(config)?;
//!
//!     // Subscribe to events
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let report = downloader.run("4 Lightning Bolt (LEA) 162\n2 Counterspell").await?;
//!     println!("saved {} files", report.saved.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Decklist parsing and aggregation
pub mod deck;
/// Download orchestration
pub mod downloader;
/// Error types
pub mod error;
/// Output filenames
pub mod naming;
/// Scryfall collection lookup and image selection
pub mod scryfall;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, FileCollisionAction, ImageSize};
pub use downloader::{DeckDownloader, HttpFetcher, ImageFetcher};
pub use error::{DownloadError, Error, Result};
pub use scryfall::{Card, CardLookup, Identifier, ScryfallClient};
pub use types::{CardEntry, Event, FetchOutcome, ResolvedCard, RunReport};

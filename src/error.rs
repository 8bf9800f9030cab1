//! Error types for decklist-dl
//!
//! Errors fall into two groups:
//! - **Fatal** errors abort the whole run (bad configuration, empty input, a failed or
//!   misaligned batch lookup, an unusable output directory).
//! - **Per-card** errors (missing image size, failed download) are caught by the
//!   orchestrator and recorded as [`DownloadError`] entries in the final report.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for decklist-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for decklist-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "batch_size")
        key: Option<String>,
    },

    /// No card entries could be parsed from the input text
    #[error("no cards parsed from input")]
    EmptyInput,

    /// The collection lookup request for a batch failed at the HTTP level
    #[error("lookup of batch {batch} failed: {message}")]
    BatchLookup {
        /// Zero-based batch index
        batch: usize,
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Description of the failure
        message: String,
    },

    /// The lookup response cannot be paired positionally with the request
    #[error(
        "lookup of batch {batch} returned {returned} cards for {expected} identifiers; refusing to pair results"
    )]
    BatchMisaligned {
        /// Zero-based batch index
        batch: usize,
        /// Number of identifiers that should have resolved
        expected: usize,
        /// Number of card objects actually returned
        returned: usize,
    },

    /// The requested image size is not available for a card or one of its faces
    #[error("{}", image_unavailable_message(card, face.as_deref(), size))]
    ImageUnavailable {
        /// Card name as reported by the API
        card: String,
        /// Face label (e.g. "face 2") for multi-faced cards
        face: Option<String>,
        /// Requested image size
        size: String,
    },

    /// The card object has neither top-level images nor faces with images
    #[error("no image_uris found for {card}")]
    MissingImages {
        /// Card name as reported by the API
        card: String,
    },

    /// An image download returned a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// URL that was requested
        url: String,
        /// HTTP status code returned
        status: u16,
    },

    /// The output directory could not be created
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an image to disk
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn image_unavailable_message(card: &str, face: Option<&str>, size: &str) -> String {
    match face {
        Some(face) => format!("no '{size}' image for {face} of {card}"),
        None => format!("no '{size}' image for {card}"),
    }
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Returns true if this error must abort the whole run.
    ///
    /// Per-card failures (image selection, image download, disk writes) return false;
    /// the orchestrator records them and moves on to the next card.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Config { .. }
            | Error::EmptyInput
            | Error::BatchLookup { .. }
            | Error::BatchMisaligned { .. }
            | Error::OutputDir { .. } => true,
            Error::ImageUnavailable { .. }
            | Error::MissingImages { .. }
            | Error::HttpStatus { .. }
            | Error::Write { .. }
            | Error::Network(_)
            | Error::Io(_)
            | Error::Serialization(_) => false,
        }
    }

    /// Process exit code for this error when it terminates the binary
    ///
    /// Configuration problems exit with 2 (usage error); every other failure with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config { .. } => 2,
            _ => 1,
        }
    }
}

/// A recoverable per-card failure kept for the end-of-run report
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DownloadError {
    /// Name of the card whose download was abandoned
    pub card_name: String,
    /// Human-readable failure description
    pub message: String,
}

impl DownloadError {
    /// Record a failure for the given card
    pub fn new(card_name: impl Into<String>, error: &Error) -> Self {
        Self {
            card_name: card_name.into(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.card_name, self.message)
    }
}

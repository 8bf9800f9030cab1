//! Shared test helpers for creating DeckDownloader instances with in-memory services.

use crate::config::Config;
use crate::downloader::{DeckDownloader, ImageFetcher};
use crate::error::{Error, Result};
use crate::scryfall::{Card, CardFace, CardLookup, CollectionResponse, Identifier};
use crate::types::FetchOutcome;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Lookup backed by a name → card table; unknown identifiers are reported as not found.
#[derive(Default)]
pub(crate) struct TableLookup {
    cards: HashMap<String, Card>,
    pub(crate) requests: Mutex<Vec<Vec<Identifier>>>,
}

impl TableLookup {
    pub(crate) fn with_cards(cards: impl IntoIterator<Item = (&'static str, Card)>) -> Self {
        Self {
            cards: cards
                .into_iter()
                .map(|(key, card)| (key.to_lowercase(), card))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn key(identifier: &Identifier) -> String {
        match identifier {
            Identifier::Name { name } | Identifier::NameInSet { name, .. } => name.to_lowercase(),
            Identifier::CollectorNumber {
                set,
                collector_number,
            } => format!("{set}#{collector_number}"),
            Identifier::Other(_) => String::new(),
        }
    }
}

#[async_trait::async_trait]
impl CardLookup for TableLookup {
    async fn lookup(&self, identifiers: &[Identifier]) -> Result<CollectionResponse> {
        self.requests.lock().unwrap().push(identifiers.to_vec());
        let mut response = CollectionResponse::default();
        for identifier in identifiers {
            match self.cards.get(&Self::key(identifier)) {
                Some(card) => response.data.push(card.clone()),
                None => response.not_found.push(identifier.clone()),
            }
        }
        Ok(response)
    }
}

/// Fetcher that writes the URL into the destination file and can fail chosen URLs.
#[derive(Default)]
pub(crate) struct RecordingFetcher {
    pub(crate) failing_urls: Vec<String>,
    pub(crate) calls: Mutex<Vec<(String, PathBuf)>>,
}

#[async_trait::async_trait]
impl ImageFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str, dest: &Path, overwrite: bool) -> Result<FetchOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        if !overwrite && dest.exists() {
            return Ok(FetchOutcome::Skipped);
        }
        if self.failing_urls.iter().any(|u| u == url) {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: 500,
            });
        }
        std::fs::write(dest, url.as_bytes())?;
        Ok(FetchOutcome::Saved {
            bytes: url.len() as u64,
        })
    }
}

/// Single-faced card with a png and a normal image
pub(crate) fn single_card(name: &str, set: &str, number: &str) -> Card {
    let slug = name.to_lowercase().replace(' ', "-");
    Card {
        name: name.to_string(),
        set: Some(set.to_string()),
        collector_number: Some(number.to_string()),
        image_uris: Some(HashMap::from([
            ("png".to_string(), format!("https://img.example/{slug}.png")),
            ("normal".to_string(), format!("https://img.example/{slug}.jpg?1")),
        ])),
        card_faces: None,
    }
}

/// Two-faced card with `normal` images on both faces
pub(crate) fn double_faced_card(front: &str, back: &str, set: &str, number: &str) -> Card {
    let face = |name: &str| CardFace {
        name: Some(name.to_string()),
        image_uris: Some(HashMap::from([(
            "normal".to_string(),
            format!("https://img.example/{}.jpg", name.to_lowercase()),
        )])),
    };
    Card {
        name: format!("{front} // {back}"),
        set: Some(set.to_string()),
        collector_number: Some(number.to_string()),
        image_uris: None,
        card_faces: Some(vec![face(front), face(back)]),
    }
}

/// Helper to create a test DeckDownloader writing into a fresh temp directory.
/// Returns the downloader, its fakes and the tempdir (which must be kept alive).
pub(crate) fn create_test_downloader(
    lookup: TableLookup,
    fetcher: RecordingFetcher,
    configure: impl FnOnce(&mut Config),
) -> (
    DeckDownloader,
    Arc<TableLookup>,
    Arc<RecordingFetcher>,
    tempfile::TempDir,
) {
    let temp_dir = tempdir().unwrap();
    let mut config = Config {
        output_dir: temp_dir.path().join("cards"),
        ..Default::default()
    };
    configure(&mut config);

    let lookup = Arc::new(lookup);
    let fetcher = Arc::new(fetcher);
    let downloader =
        DeckDownloader::with_services(config, lookup.clone(), fetcher.clone()).unwrap();
    (downloader, lookup, fetcher, temp_dir)
}

//! Test configuration helpers for creating downloaders against a mock server

use decklist_dl::{Config, DeckDownloader};
use tempfile::TempDir;
use wiremock::MockServer;

use super::fixtures::COLLECTION_PATH;

/// Config pointing at the mock collection endpoint, writing into `temp_dir/cards`
pub fn test_config(server: &MockServer, temp_dir: &TempDir) -> Config {
    Config {
        api_url: format!("{}{COLLECTION_PATH}", server.uri()),
        output_dir: temp_dir.path().join("cards"),
        ..Default::default()
    }
}

/// Production downloader (real HTTP client) wired to the mock server
///
/// Returns the downloader and the tempdir, which must be kept alive.
pub fn create_downloader(
    server: &MockServer,
    configure: impl FnOnce(&mut Config),
) -> (DeckDownloader, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = test_config(server, &temp_dir);
    configure(&mut config);
    let downloader = DeckDownloader::new(config).unwrap();
    (downloader, temp_dir)
}

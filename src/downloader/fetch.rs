//! Image fetching: the [`ImageFetcher`] seam and its HTTP implementation.

use crate::error::{Error, Result};
use crate::naming::partial_path;
use crate::types::FetchOutcome;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Abstraction over "save this URL to this path, skip if it already exists".
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch `url` into `dest`
    ///
    /// Returns [`FetchOutcome::Skipped`] without touching the network when `dest`
    /// exists and `overwrite` is false.
    async fn fetch(&self, url: &str, dest: &Path, overwrite: bool) -> Result<FetchOutcome>;
}

/// Production [`ImageFetcher`] streaming response bodies to disk.
///
/// Bytes are written to `<dest>.part` and renamed into place once the body is
/// complete, so an interrupted download never leaves a truncated image under the
/// final name.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher using the given HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path, overwrite: bool) -> Result<FetchOutcome> {
        if !overwrite && tokio::fs::try_exists(dest).await.unwrap_or(false) {
            tracing::debug!(path = %dest.display(), "file exists, skipping");
            return Ok(FetchOutcome::Skipped);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let part = partial_path(dest);
        match write_body(response, &part).await {
            Ok(bytes) => {
                tokio::fs::rename(&part, dest)
                    .await
                    .map_err(|source| Error::Write {
                        path: dest.to_path_buf(),
                        source,
                    })?;
                tracing::debug!(path = %dest.display(), bytes, "saved image");
                Ok(FetchOutcome::Saved { bytes })
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                    tracing::trace!(path = %part.display(), error = %cleanup, "no partial file to remove");
                }
                Err(e)
            }
        }
    }
}

/// Stream a response body into `path`, returning the number of bytes written
async fn write_body(mut response: reqwest::Response, path: &Path) -> Result<u64> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::create(path).await.map_err(write_error)?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(write_error)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(write_error)?;
    Ok(written)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_fetch_writes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/front/opt.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PNGDATA".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("Opt (xln) 65.png");
        let url = format!("{}/front/opt.png", server.uri());

        let outcome = fetcher().fetch(&url, &dest, false).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Saved { bytes: 7 });
        assert_eq!(std::fs::read(&dest).unwrap(), b"PNGDATA");
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_existing_file_is_skipped_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"NEW".to_vec()))
            .expect(0)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("Opt.png");
        std::fs::write(&dest, b"OLD").unwrap();
        let url = format!("{}/opt.png", server.uri());

        let outcome = fetcher().fetch(&url, &dest, false).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Skipped);
        assert_eq!(std::fs::read(&dest).unwrap(), b"OLD");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_existing_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"NEW".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("Opt.png");
        std::fs::write(&dest, b"OLD").unwrap();
        let url = format!("{}/opt.png", server.uri());

        let outcome = fetcher().fetch(&url, &dest, true).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Saved { bytes: 3 });
        assert_eq!(std::fs::read(&dest).unwrap(), b"NEW");
    }

    #[tokio::test]
    async fn test_http_error_leaves_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("Missing.png");
        let url = format!("{}/missing.png", server.uri());

        match fetcher().fetch(&url, &dest, false).await {
            Err(Error::HttpStatus { status, url: failed }) => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected HttpStatus error, got {other:?}"),
        }
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"DATA".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("no-such-dir").join("Opt.png");
        let url = format!("{}/opt.png", server.uri());

        assert!(matches!(
            fetcher().fetch(&url, &dest, false).await,
            Err(Error::Write { .. })
        ));
    }
}

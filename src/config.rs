//! Configuration types for decklist-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scryfall collection endpoint
pub const DEFAULT_API_URL: &str = "https://api.scryfall.com/cards/collection";

/// Maximum number of identifiers the collection endpoint accepts per request
pub const MAX_BATCH_SIZE: usize = 75;

/// Output directory used when the decklist comes from standard input
pub const FALLBACK_OUTPUT_DIR: &str = "cards";

/// Image size variants offered by the card API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    /// Full-resolution PNG with transparent corners (default)
    #[default]
    Png,
    /// Large JPG
    Large,
    /// Normal JPG
    Normal,
    /// Small JPG
    Small,
    /// Artwork only
    ArtCrop,
    /// Full card with the border cropped
    BorderCrop,
}

impl ImageSize {
    /// Every supported size, in the order they are listed to users
    pub const ALL: [ImageSize; 6] = [
        ImageSize::ArtCrop,
        ImageSize::BorderCrop,
        ImageSize::Large,
        ImageSize::Normal,
        ImageSize::Png,
        ImageSize::Small,
    ];

    /// Key used in the API's `image_uris` map
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Png => "png",
            ImageSize::Large => "large",
            ImageSize::Normal => "normal",
            ImageSize::Small => "small",
            ImageSize::ArtCrop => "art_crop",
            ImageSize::BorderCrop => "border_crop",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ImageSize::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = ImageSize::ALL.iter().map(ImageSize::as_str).collect();
                Error::config(
                    "image_size",
                    format!("unknown image size '{s}' (expected one of {})", valid.join(", ")),
                )
            })
    }
}

/// How to handle two cards in one run that map to the same output filename
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Append (1), (2), etc. to the later filename (default)
    #[default]
    Rename,
    /// Reuse the path; the later card is skipped or overwrites like any existing file
    Allow,
}

/// Main configuration for [`DeckDownloader`](crate::DeckDownloader)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Collection lookup endpoint (default: Scryfall's `/cards/collection`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Identifiers per lookup request (default: 75, the API maximum)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Image size to download (default: png)
    #[serde(default)]
    pub image_size: ImageSize,

    /// Directory images are written to (default: "./cards")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Ignore quantities and fetch one image per unique card
    #[serde(default)]
    pub unique: bool,

    /// Overwrite files that already exist instead of skipping them
    #[serde(default)]
    pub overwrite: bool,

    /// Pause between file downloads (default: none)
    #[serde(default, with = "duration_serde")]
    pub delay: Duration,

    /// Per-request network timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Filename collision handling within a single run
    #[serde(default)]
    pub collisions: FileCollisionAction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            batch_size: default_batch_size(),
            image_size: ImageSize::default(),
            output_dir: default_output_dir(),
            unique: false,
            overwrite: false,
            delay: Duration::ZERO,
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            collisions: FileCollisionAction::default(),
        }
    }
}

impl Config {
    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::config("api_url", "lookup endpoint must not be empty"));
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(Error::config(
                "batch_size",
                format!(
                    "batch size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                    self.batch_size
                ),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout", "timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// Output directory derived from the decklist source
///
/// A decklist file `Jund Midrange.txt` yields `Jund Midrange`; standard input yields
/// [`FALLBACK_OUTPUT_DIR`].
///
/// # Examples
///
/// ```
/// use decklist_dl::config::default_output_dir_for;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     default_output_dir_for(Some(Path::new("decks/Jund Midrange.txt"))),
///     PathBuf::from("Jund Midrange")
/// );
/// assert_eq!(default_output_dir_for(None), PathBuf::from("cards"));
/// ```
pub fn default_output_dir_for(input: Option<&Path>) -> PathBuf {
    input
        .and_then(|path| path.file_stem())
        .filter(|stem| !stem.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_output_dir)
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(FALLBACK_OUTPUT_DIR)
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("decklist-dl/{}", env!("CARGO_PKG_VERSION"))
}

// Duration serialization helper (fractional seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

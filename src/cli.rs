//! CLI definitions using clap derive API

use clap::Parser;
use decklist_dl::config::default_output_dir_for;
use decklist_dl::{Config, ImageSize};
use std::path::PathBuf;
use std::time::Duration;

/// Download card images for every card in a decklist
#[derive(Parser, Debug)]
#[command(
    name = "decklist-dl",
    author,
    version,
    about = "Download card images for every card in a decklist",
    after_help = "Examples:\n    \
                  decklist-dl -i burn.txt\n    \
                  decklist-dl -i burn.txt -s large --unique\n    \
                  cat burn.txt | decklist-dl -o burn_cards --delay 0.1"
)]
pub struct Cli {
    /// Decklist file (reads standard input when omitted)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Output directory (defaults to the input file name, or "cards" for stdin)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Image size to download
    #[arg(long, short = 's', default_value_t = ImageSize::Png, value_parser = parse_image_size)]
    pub size: ImageSize,

    /// Download one image per distinct card, without quantity prefixes
    #[arg(long)]
    pub unique: bool,

    /// Replace files that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Seconds to wait after each saved image
    #[arg(long, default_value = "0", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Network timeout in seconds
    #[arg(long, default_value = "30", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Enable debug logging
    #[arg(long, short = 'v', visible_alias = "verbose")]
    pub debug: bool,

    /// Collection endpoint override
    #[arg(long, hide = true)]
    pub api_url: Option<String>,
}

impl Cli {
    /// Build the library configuration from the parsed flags
    pub fn to_config(&self) -> Config {
        let mut config = Config {
            output_dir: self
                .out
                .clone()
                .unwrap_or_else(|| default_output_dir_for(self.input.as_deref())),
            image_size: self.size,
            unique: self.unique,
            overwrite: self.overwrite,
            delay: self.delay,
            timeout: self.timeout,
            ..Default::default()
        };
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        config
    }
}

fn parse_image_size(value: &str) -> Result<ImageSize, String> {
    value.parse().map_err(|_| {
        let allowed: Vec<&str> = ImageSize::ALL.iter().map(ImageSize::as_str).collect();
        format!("expected one of: {}", allowed.join(", "))
    })
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("invalid duration '{value}': {e}"))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_follow_input_file() {
        let cli = Cli::try_parse_from(["decklist-dl", "-i", "decks/Mono Red.txt"]).unwrap();
        let config = cli.to_config();
        assert_eq!(config.output_dir, PathBuf::from("Mono Red"));
        assert_eq!(config.image_size, ImageSize::Png);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.delay.is_zero());
        assert!(!config.unique);
    }

    #[test]
    fn stdin_uses_fallback_directory() {
        let cli = Cli::try_parse_from(["decklist-dl"]).unwrap();
        assert_eq!(cli.to_config().output_dir, PathBuf::from("cards"));
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "decklist-dl",
            "-i",
            "burn.txt",
            "-o",
            "out",
            "-s",
            "art_crop",
            "--unique",
            "--overwrite",
            "--delay",
            "0.25",
            "--timeout",
            "5",
            "--verbose",
            "--api-url",
            "http://127.0.0.1:9/cards/collection",
        ])
        .unwrap();
        assert!(cli.debug);

        let config = cli.to_config();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.image_size, ImageSize::ArtCrop);
        assert!(config.unique);
        assert!(config.overwrite);
        assert_eq!(config.delay, Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_url, "http://127.0.0.1:9/cards/collection");
    }

    #[test]
    fn unknown_size_is_rejected() {
        let err = Cli::try_parse_from(["decklist-dl", "--size", "huge"]).unwrap_err();
        assert!(err.to_string().contains("border_crop"));
    }

    #[test]
    fn negative_delay_is_rejected() {
        assert!(Cli::try_parse_from(["decklist-dl", "--delay", "-1"]).is_err());
        assert!(Cli::try_parse_from(["decklist-dl", "--delay", "soon"]).is_err());
    }
}

//! Output filename construction and path handling

use crate::config::FileCollisionAction;
use crate::scryfall::Card;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Extension used when the URL does not reveal the image type
pub const PLACEHOLDER_EXTENSION: &str = ".img";

/// Punctuation kept by [`sanitize_filename`] besides word characters and whitespace
const ALLOWED_PUNCTUATION: &[char] = &['-', '(', ')', '[', ']', '.', '&', ',', '\'', '!', '+'];

/// Strip characters that are unsafe or awkward in filenames
///
/// Keeps letters, digits, `_`, whitespace and `- ( ) [ ] . & , ' ! +`, then collapses
/// whitespace runs to a single space.
///
/// # Examples
///
/// ```
/// use decklist_dl::naming::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Fire // Ice"), "Fire Ice");
/// assert_eq!(sanitize_filename("Jötun Grunt"), "Jötun Grunt");
/// assert_eq!(sanitize_filename("Who/What/When/Where/Why?"), "WhoWhatWhenWhereWhy");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .trim()
        .chars()
        .filter(|&c| {
            c.is_alphanumeric() || c == '_' || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the filename (without extension) for one image of a card
///
/// Format: `[Nx ]<name><face_suffix>[ (set)][ number]`. The quantity prefix only
/// appears when more than one copy is wanted. Every API-supplied part is sanitized.
#[must_use]
pub fn build_filename(card: &Card, quantity: u32, face_suffix: &str) -> String {
    let mut filename = String::new();
    if quantity > 1 {
        filename.push_str(&format!("{quantity}x "));
    }
    filename.push_str(&sanitize_filename(&card.name));
    filename.push_str(face_suffix);
    let set = card
        .set
        .as_deref()
        .map(|set| sanitize_filename(set).to_lowercase())
        .unwrap_or_default();
    if !set.is_empty() {
        filename.push_str(&format!(" ({set})"));
    }
    let number = card
        .collector_number
        .as_deref()
        .map(sanitize_filename)
        .unwrap_or_default();
    if !number.is_empty() {
        filename.push(' ');
        filename.push_str(&number);
    }
    filename
}

/// File extension (with leading dot) implied by an image URL
///
/// Only `.png`, `.jpg` and `.jpeg` are recognized, case-insensitively; query strings
/// and fragments are ignored. Anything else yields [`PLACEHOLDER_EXTENSION`].
///
/// # Examples
///
/// ```
/// use decklist_dl::naming::infer_extension;
///
/// assert_eq!(infer_extension("https://cards.example/front/a/b.jpg?1562"), ".jpg");
/// assert_eq!(infer_extension("https://cards.example/a.PNG"), ".png");
/// assert_eq!(infer_extension("https://cards.example/a"), ".img");
/// ```
#[must_use]
pub fn infer_extension(url: &str) -> String {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase(),
    };

    [".png", ".jpg", ".jpeg"]
        .into_iter()
        .find(|ext| path.ends_with(ext))
        .unwrap_or(PLACEHOLDER_EXTENSION)
        .to_string()
}

/// Reserve a destination path for this run, handling collisions with earlier cards
///
/// `claimed` holds every path already handed out during the run. With
/// [`FileCollisionAction::Rename`] a taken path gets ` (1)`, ` (2)`, ... appended to
/// its stem; with [`FileCollisionAction::Allow`] the path is returned unchanged.
pub fn claim_unique_path(
    dir: &Path,
    stem: &str,
    extension: &str,
    claimed: &mut HashSet<PathBuf>,
    action: FileCollisionAction,
) -> PathBuf {
    let path = dir.join(format!("{stem}{extension}"));
    if action == FileCollisionAction::Allow || !claimed.contains(&path) {
        claimed.insert(path.clone());
        return path;
    }

    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{stem} ({counter}){extension}"));
        if !claimed.contains(&candidate) {
            tracing::debug!(
                original = %path.display(),
                renamed = %candidate.display(),
                "filename already used in this run"
            );
            claimed.insert(candidate.clone());
            return candidate;
        }
        counter += 1;
    }
}

/// Sibling path used while a download is in flight (`name.png.part`)
#[must_use]
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

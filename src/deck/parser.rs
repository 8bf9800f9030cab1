//! Decklist line parser
//!
//! Accepts the loose formats produced by the common deck builders:
//!
//! ```text
//! 4 Lightning Bolt
//! 4x Lightning Bolt (LEA) 162
//! 1 Delver of Secrets//Insectile Aberration (ISD) 51a *F*
//! // comments and section headers are ignored
//! Sideboard
//! ```
//!
//! Extraction is order-sensitive: the set code is removed before the collector number
//! is searched, so `Name (SET) 123` yields name `Name`, set `set`, number `123`.

use crate::types::CardEntry;
use regex::Regex;
use std::sync::LazyLock;

/// Section header words that mark deck zones; header lines carry no card
const SECTION_HEADERS: &[&str] = &["sideboard", "commander", "companion", "maybeboard"];

/// Comment prefixes
const COMMENT_PREFIXES: &[&str] = &["#", "//"];

// Patterns are literals; compilation cannot fail at runtime.
#[allow(clippy::expect_used)]
static FOIL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\*F\*|\(Foil\)").expect("foil pattern is valid"));

#[allow(clippy::expect_used)]
static QUANTITY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*x?\s+(.*)$").expect("quantity pattern is valid"));

#[allow(clippy::expect_used)]
static SET_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Za-z0-9]{2,5})\)").expect("set pattern is valid"));

#[allow(clippy::expect_used)]
static COLLECTOR_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+[a-z]?)\b\s*$").expect("collector number pattern is valid")
});

#[allow(clippy::expect_used)]
static FACE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*//\s*").expect("face separator pattern is valid"));

/// Parse one decklist line into a card entry
///
/// Returns `None` for blank lines, comments, section headers, a zero quantity and
/// lines that leave no card name once quantity, set code and collector number are
/// stripped.
///
/// # Examples
///
/// ```
/// use decklist_dl::deck::parse_line;
///
/// let entry = parse_line("4x Lightning Bolt (LEA) 162").unwrap();
/// assert_eq!(entry.quantity, 4);
/// assert_eq!(entry.name, "Lightning Bolt");
/// assert_eq!(entry.set_code.as_deref(), Some("lea"));
/// assert_eq!(entry.collector_number.as_deref(), Some("162"));
///
/// assert!(parse_line("Sideboard").is_none());
/// assert!(parse_line("// burn package").is_none());
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<CardEntry> {
    let line = line.trim();
    if line.is_empty()
        || COMMENT_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
        || is_section_header(line)
    {
        return None;
    }

    let line = FOIL_MARKER.replace_all(line, "");
    let line = line.trim();

    let (quantity, rest) = match QUANTITY_PREFIX.captures(line) {
        Some(caps) => {
            let quantity = caps[1].parse::<u32>().ok()?;
            let rest = caps.get(2).map_or("", |m| m.as_str()).trim();
            (quantity, rest.to_string())
        }
        None => (1, line.to_string()),
    };
    if quantity == 0 {
        return None;
    }

    let (set_code, rest) = match SET_CODE.captures(&rest) {
        Some(caps) => {
            let whole = caps.get(0)?;
            let set_code = caps[1].to_lowercase();
            let remaining = format!("{}{}", &rest[..whole.start()], &rest[whole.end()..]);
            (Some(set_code), remaining.trim().to_string())
        }
        None => (None, rest),
    };

    let (collector_number, name) = match COLLECTOR_NUMBER.captures(&rest) {
        Some(caps) => {
            let whole = caps.get(0)?;
            (
                Some(caps[1].to_string()),
                rest[..whole.start()].trim().to_string(),
            )
        }
        None => (None, rest.trim().to_string()),
    };

    let name = FACE_SEPARATOR.replace_all(&name, " // ").into_owned();
    if name.is_empty() {
        return None;
    }

    Some(CardEntry {
        quantity,
        name,
        set_code,
        collector_number,
    })
}

/// Parse every line of a decklist, dropping lines that carry no card
pub fn parse_decklist(text: &str) -> Vec<CardEntry> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let entry = parse_line(line);
            if entry.is_none() && !line.trim().is_empty() {
                tracing::trace!(line = index + 1, text = line, "skipping decklist line");
            }
            entry
        })
        .collect()
}

/// True for zone headers such as `Sideboard`, `Sideboard:`, `Commander (1)` or `Maybeboard 12`.
///
/// The header word must stand alone, so card names like `Commander's Sphere` or
/// `Companion of the Trials` are still parsed as cards.
fn is_section_header(line: &str) -> bool {
    SECTION_HEADERS.iter().any(|header| {
        let Some(prefix) = line.get(..header.len()) else {
            return false;
        };
        if !prefix.eq_ignore_ascii_case(header) {
            return false;
        }
        let rest = line[header.len()..].trim();
        rest.is_empty()
            || rest.starts_with(':')
            || rest.starts_with('(')
            || rest.chars().all(|c| c.is_ascii_digit())
    })
}

//! Lookup identifier construction

use crate::scryfall::Identifier;
use crate::types::CardEntry;

/// Most specific identifier the collection endpoint supports for an entry
///
/// Set + collector number wins over name + set, which wins over the bare name.
///
/// # Examples
///
/// ```
/// use decklist_dl::deck::{parse_line, to_identifier};
/// use decklist_dl::scryfall::Identifier;
///
/// let entry = parse_line("1 Lightning Bolt (LEA) 162").unwrap();
/// assert_eq!(
///     to_identifier(&entry),
///     Identifier::CollectorNumber { set: "lea".into(), collector_number: "162".into() }
/// );
/// ```
#[must_use]
pub fn to_identifier(entry: &CardEntry) -> Identifier {
    match (&entry.set_code, &entry.collector_number) {
        (Some(set), Some(collector_number)) => Identifier::CollectorNumber {
            set: set.clone(),
            collector_number: collector_number.clone(),
        },
        (Some(set), None) => Identifier::NameInSet {
            name: entry.name.clone(),
            set: set.clone(),
        },
        (None, _) => Identifier::Name {
            name: entry.name.clone(),
        },
    }
}

/// Identifiers for a list of aggregated entries, one per entry and in the same order
pub fn build_identifiers(entries: &[CardEntry]) -> Vec<Identifier> {
    entries.iter().map(to_identifier).collect()
}

//! Aggregation of parsed entries by card identity

use crate::types::CardEntry;
use std::collections::HashMap;

/// Canonical grouping key for a card entry
///
/// Prefers the exact printing (set + collector number), then name within a set, then
/// the bare name. Names compare case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// A specific printing
    Printing {
        /// Lowercase set code
        set_code: String,
        /// Collector number within the set
        collector_number: String,
    },
    /// Any printing of a name within one set
    NameInSet {
        /// Lowercased card name
        name: String,
        /// Lowercase set code
        set_code: String,
    },
    /// Any printing of a name
    Name(String),
}

impl From<&CardEntry> for IdentityKey {
    fn from(entry: &CardEntry) -> Self {
        match (&entry.set_code, &entry.collector_number) {
            (Some(set_code), Some(collector_number)) => IdentityKey::Printing {
                set_code: set_code.clone(),
                collector_number: collector_number.clone(),
            },
            (Some(set_code), None) => IdentityKey::NameInSet {
                name: entry.name.to_lowercase(),
                set_code: set_code.clone(),
            },
            (None, _) => IdentityKey::Name(entry.name.to_lowercase()),
        }
    }
}

/// Merge entries that share an [`IdentityKey`]
///
/// The result holds one entry per key, in first-seen order. Each keeps the name, set
/// and collector number of the first line that produced the key; its quantity is the
/// sum over all lines, or 1 when `unique` is set.
///
/// # Examples
///
/// ```
/// use decklist_dl::deck::{aggregate, parse_decklist};
///
/// let entries = parse_decklist("2 Opt\n3 opt\n1 Ponder");
/// let merged = aggregate(entries, false);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].name, "Opt");
/// assert_eq!(merged[0].quantity, 5);
/// ```
pub fn aggregate(entries: impl IntoIterator<Item = CardEntry>, unique: bool) -> Vec<CardEntry> {
    let mut positions: HashMap<IdentityKey, usize> = HashMap::new();
    let mut merged: Vec<CardEntry> = Vec::new();

    for entry in entries {
        let key = IdentityKey::from(&entry);
        match positions.get(&key) {
            Some(&index) => {
                let existing = &mut merged[index];
                existing.quantity = existing.quantity.saturating_add(entry.quantity);
            }
            None => {
                positions.insert(key, merged.len());
                merged.push(entry);
            }
        }
    }

    if unique {
        for entry in &mut merged {
            entry.quantity = 1;
        }
    }

    tracing::debug!(unique_cards = merged.len(), unique, "aggregated decklist");
    merged
}

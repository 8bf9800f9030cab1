//! Wire types for the card collection endpoint

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lookup identifier for one card, serialized exactly as the API expects it
///
/// Deserialization is used for the `not_found` echo; shapes this crate never sends
/// are kept verbatim in [`Identifier::Other`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// A specific printing: `{"set": "lea", "collector_number": "162"}`
    CollectorNumber {
        /// Set code
        set: String,
        /// Collector number within the set
        collector_number: String,
    },
    /// A name within a set: `{"name": "Opt", "set": "xln"}`
    NameInSet {
        /// Card name
        name: String,
        /// Set code
        set: String,
    },
    /// A bare name: `{"name": "Opt"}`
    Name {
        /// Card name
        name: String,
    },
    /// Any other identifier object returned by the API
    Other(serde_json::Map<String, serde_json::Value>),
}

impl Identifier {
    /// True if `other` names the same card; names and sets compare case-insensitively
    pub fn matches(&self, other: &Identifier) -> bool {
        match (self, other) {
            (
                Identifier::CollectorNumber {
                    set: a_set,
                    collector_number: a_num,
                },
                Identifier::CollectorNumber {
                    set: b_set,
                    collector_number: b_num,
                },
            ) => a_set.eq_ignore_ascii_case(b_set) && a_num.eq_ignore_ascii_case(b_num),
            (
                Identifier::NameInSet {
                    name: a_name,
                    set: a_set,
                },
                Identifier::NameInSet {
                    name: b_name,
                    set: b_set,
                },
            ) => a_name.to_lowercase() == b_name.to_lowercase() && a_set.eq_ignore_ascii_case(b_set),
            (Identifier::Name { name: a }, Identifier::Name { name: b }) => {
                a.to_lowercase() == b.to_lowercase()
            }
            (Identifier::Other(a), Identifier::Other(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::CollectorNumber {
                set,
                collector_number,
            } => write!(f, "set {set} #{collector_number}"),
            Identifier::NameInSet { name, set } => write!(f, "{name} ({set})"),
            Identifier::Name { name } => f.write_str(name),
            Identifier::Other(map) => write!(f, "{}", serde_json::Value::Object(map.clone())),
        }
    }
}

/// Request body for the collection endpoint
#[derive(Clone, Debug, Serialize)]
pub struct CollectionRequest<'a> {
    /// Identifiers in this batch
    pub identifiers: &'a [Identifier],
}

/// Response body from the collection endpoint
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CollectionResponse {
    /// Resolved cards, in the order of the identifiers that resolved
    #[serde(default)]
    pub data: Vec<Card>,
    /// Identifiers that did not resolve
    #[serde(default)]
    pub not_found: Vec<Identifier>,
}

/// The fields of a card object this crate consumes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card name; double-faced cards use `Front // Back`
    #[serde(default = "unknown_name")]
    pub name: String,
    /// Set code
    #[serde(default)]
    pub set: Option<String>,
    /// Collector number
    #[serde(default)]
    pub collector_number: Option<String>,
    /// Image URLs keyed by size, for single-image cards
    #[serde(default)]
    pub image_uris: Option<HashMap<String, String>>,
    /// Per-face data, for cards printed with one image per face
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
}

/// One face of a multi-faced card
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    /// Face name
    #[serde(default)]
    pub name: Option<String>,
    /// Image URLs keyed by size
    #[serde(default)]
    pub image_uris: Option<HashMap<String, String>>,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

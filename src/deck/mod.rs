//! Decklist normalization: line parsing, aggregation and lookup identifiers.
//!
//! - [`parser`] - Turns raw decklist lines into [`CardEntry`](crate::types::CardEntry) values
//! - [`aggregate`] - Merges entries that refer to the same physical card
//! - [`identifier`] - Picks the most specific lookup identifier per entry

pub mod aggregate;
pub mod identifier;
pub mod parser;


pub use aggregate::{IdentityKey, aggregate};
pub use identifier::{build_identifiers, to_identifier};
pub use parser::{parse_decklist, parse_line};

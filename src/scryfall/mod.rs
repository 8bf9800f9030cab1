//! Card data API integration.
//!
//! - [`model`] - Wire types for the collection endpoint
//! - [`client`] - The [`CardLookup`] seam and its HTTP implementation
//! - [`resolver`] - Batched lookup with positional pairing of results
//! - [`images`] - Image URL selection for single- and multi-faced cards

pub mod client;
pub mod images;
pub mod model;
pub mod resolver;

pub use client::{CardLookup, ScryfallClient, build_http_client};
pub use images::{ImageRef, select_images};
pub use model::{Card, CardFace, CollectionRequest, CollectionResponse, Identifier};
pub use resolver::resolve;

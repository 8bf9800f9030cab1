//! Batch resolution of aggregated entries into card objects
//!
//! Entries are looked up in fixed-size batches. The collection endpoint returns the
//! cards that resolved in request order and echoes the identifiers that did not, so
//! each returned card is paired with its entry by position after the missing ones
//! are taken out. Any response that cannot be paired exactly is a hard error rather
//! than a silent mismatch of quantities and cards.

use super::client::CardLookup;
use super::model::{CollectionResponse, Identifier};
use crate::deck::build_identifiers;
use crate::error::{Error, Result};
use crate::types::{CardEntry, Event, Resolution, ResolvedCard};
use tokio::sync::broadcast;

/// Resolve aggregated entries into cards, batch by batch
///
/// A failed lookup aborts the whole resolution with [`Error::BatchLookup`]; a response
/// that does not line up with its request aborts with [`Error::BatchMisaligned`].
pub async fn resolve(
    lookup: &dyn CardLookup,
    entries: &[CardEntry],
    batch_size: usize,
    events: Option<&broadcast::Sender<Event>>,
) -> Result<Resolution> {
    let batch_size = batch_size.max(1);
    let identifiers = build_identifiers(entries);
    let batches = identifiers.len().div_ceil(batch_size);
    let mut resolution = Resolution::default();

    for (batch, (ids, batch_entries)) in identifiers
        .chunks(batch_size)
        .zip(entries.chunks(batch_size))
        .enumerate()
    {
        if let Some(tx) = events {
            tx.send(Event::Resolving { batch, batches }).ok();
        }
        tracing::debug!(batch, batches, size = ids.len(), "resolving batch");

        let response = lookup
            .lookup(ids)
            .await
            .map_err(|e| batch_lookup_error(batch, e))?;

        pair_batch(batch, ids, batch_entries, response, &mut resolution)?;
    }

    tracing::info!(
        found = resolution.cards.len(),
        missing = resolution.missing.len(),
        "resolved decklist"
    );
    if let Some(tx) = events {
        tx.send(Event::Resolved {
            found: resolution.cards.len(),
            missing: resolution.missing.len(),
        })
        .ok();
    }

    Ok(resolution)
}

fn batch_lookup_error(batch: usize, error: Error) -> Error {
    let status = match &error {
        Error::HttpStatus { status, .. } => Some(*status),
        Error::Network(e) => e.status().map(|s| s.as_u16()),
        _ => None,
    };
    Error::BatchLookup {
        batch,
        status,
        message: error.to_string(),
    }
}

/// Pair one batch's returned cards with its entries by index
fn pair_batch(
    batch: usize,
    ids: &[Identifier],
    entries: &[CardEntry],
    response: CollectionResponse,
    resolution: &mut Resolution,
) -> Result<()> {
    let CollectionResponse { data, not_found } = response;

    // Mark which request positions the API reported as missing.
    let mut missing_at = vec![false; ids.len()];
    let mut unmatched = 0usize;
    for echoed in &not_found {
        let position = ids
            .iter()
            .enumerate()
            .position(|(i, sent)| !missing_at[i] && sent.matches(echoed));
        match position {
            Some(i) => missing_at[i] = true,
            None => unmatched += 1,
        }
    }

    let expected = ids.len().saturating_sub(not_found.len());
    if unmatched > 0 || data.len() != expected {
        tracing::error!(
            batch,
            sent = ids.len(),
            returned = data.len(),
            not_found = not_found.len(),
            unmatched,
            "lookup response does not line up with request"
        );
        return Err(Error::BatchMisaligned {
            batch,
            expected,
            returned: data.len(),
        });
    }

    let found_entries = entries
        .iter()
        .zip(&missing_at)
        .filter(|(_, missing)| !**missing)
        .map(|(entry, _)| entry);

    for (card, entry) in data.into_iter().zip(found_entries) {
        resolution.cards.push(ResolvedCard {
            card,
            quantity: entry.quantity,
        });
    }
    resolution.missing.extend(not_found);
    Ok(())
}

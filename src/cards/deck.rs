//! Round setup: dealing a shuffled deck of pairs.

use tracing::debug;

use super::card::{Card, CardId, Face};
use crate::catalog::{Catalog, CatalogEntry, GroupFilter};
use crate::core::GameRng;
use crate::error::{GameError, Result};

/// Deal a deck for one round.
///
/// Picks `pair_count` entries admitted by `filter`, uniformly and without
/// replacement, emits an image card and a text card for each, and shuffles
/// the whole deck. Each call forks `rng`, then samples and shuffles on
/// separate streams of the fork. Card ids are `2i` / `2i + 1` in emission
/// order, so they are unique within the deck.
///
/// # Errors
/// - `GameError::Config` if `pair_count` is zero.
/// - `GameError::InsufficientEntries` if the filter admits fewer than
///   `pair_count` entries. Nothing is dealt in that case.
///
/// ```
/// use flag_match::cards::create_round;
/// use flag_match::catalog::{Catalog, GroupFilter};
/// use flag_match::core::GameRng;
///
/// let catalog = Catalog::countries();
/// let mut rng = GameRng::new(1);
/// let deck = create_round(&catalog, &GroupFilter::group("europe"), 6, &mut rng).unwrap();
/// assert_eq!(deck.len(), 12);
/// ```
pub fn create_round(
    catalog: &Catalog,
    filter: &GroupFilter,
    pair_count: usize,
    rng: &mut GameRng,
) -> Result<Vec<Card>> {
    if pair_count == 0 {
        return Err(GameError::Config("pair_count must be at least 1".into()));
    }

    let candidates: Vec<&CatalogEntry> = catalog.in_group(filter).collect();
    if candidates.len() < pair_count {
        return Err(GameError::InsufficientEntries {
            group: filter.to_string(),
            requested: pair_count,
            available: candidates.len(),
        });
    }

    let round_rng = rng.fork();
    let picked = round_rng.for_context("pick").sample_indices(candidates.len(), pair_count);

    let mut deck = Vec::with_capacity(pair_count * 2);
    for (n, &i) in picked.iter().enumerate() {
        let entry = candidates[i];
        let base = (n * 2) as u32;
        deck.push(Card::new(CardId::new(base), entry.id.clone(), &entry.display_name, Face::Image));
        deck.push(Card::new(CardId::new(base + 1), entry.id.clone(), &entry.display_name, Face::Text));
    }

    round_rng.for_context("deal").shuffle(&mut deck);

    debug!(group = %filter, pairs = pair_count, cards = deck.len(), "Dealt deck");
    Ok(deck)
}

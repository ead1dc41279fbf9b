//! Cards and round setup.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of a card within a round
//! - `Face`: Image or text side of an entry
//! - `Card`: Runtime card (entry, face, matched flag)
//! - `create_round`: Deals a shuffled deck of pairs from the catalog

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Face};
pub use deck::create_round;

//! Cards dealt for a round.
//!
//! Each selected catalog entry yields two cards that share an `entry_id`
//! and differ in `face`. Those two cards are the matchable pair.

use serde::{Deserialize, Serialize};

use crate::catalog::EntryId;

/// Identifier of a card within one round.
///
/// Unique per deck; ids are reassigned when a new round is dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Which representation of an entry a card shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    /// The flag image, resolved by the renderer from `entry_id`.
    Image,
    /// The country name.
    Text,
}

impl Face {
    /// The other face of the pair.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Face::Image => Face::Text,
            Face::Text => Face::Image,
        }
    }
}

/// A single card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the round.
    pub id: CardId,

    /// Catalog entry this card belongs to.
    pub entry_id: EntryId,

    /// Name of the entry (shown on `Face::Text` cards, used as image title otherwise).
    pub display_name: String,

    /// Which face the card shows when revealed.
    pub face: Face,

    /// Has this card been paired?
    pub matched: bool,
}

impl Card {
    /// Create an unmatched card.
    #[must_use]
    pub fn new(id: CardId, entry_id: EntryId, display_name: impl Into<String>, face: Face) -> Self {
        Self {
            id,
            entry_id,
            display_name: display_name.into(),
            face,
            matched: false,
        }
    }

    /// Do these two cards form a pair?
    ///
    /// Same entry, different face. A card never pairs with itself.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.entry_id == other.entry_id && self.face != other.face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Card(7)");
    }

    #[test]
    fn test_face_opposite() {
        assert_eq!(Face::Image.opposite(), Face::Text);
        assert_eq!(Face::Text.opposite(), Face::Image);
    }

    #[test]
    fn test_pairs_with() {
        let flag = Card::new(CardId::new(0), EntryId::from("HU"), "Magyarország", Face::Image);
        let name = Card::new(CardId::new(1), EntryId::from("HU"), "Magyarország", Face::Text);
        let other = Card::new(CardId::new(2), EntryId::from("FR"), "Franciaország", Face::Text);

        assert!(flag.pairs_with(&name));
        assert!(name.pairs_with(&flag));
        assert!(!flag.pairs_with(&other));
        assert!(!flag.pairs_with(&flag));
    }

    #[test]
    fn test_same_face_never_pairs() {
        let a = Card::new(CardId::new(0), EntryId::from("HU"), "Magyarország", Face::Text);
        let b = Card::new(CardId::new(1), EntryId::from("HU"), "Magyarország", Face::Text);
        assert!(!a.pairs_with(&b));
    }

    #[test]
    fn test_face_serialization() {
        assert_eq!(serde_json::to_string(&Face::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&Face::Text).unwrap(), "\"text\"");
    }
}

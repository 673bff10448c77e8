//! Card catalog for definition lookup.
//!
//! The catalog is built once and then only read. Engine, analyzer and
//! sequencer borrow it, so tests can inject small synthetic catalogs.

use rustc_hash::FxHashMap;

use super::definition::{AttackDirection, CardConfig, CardId};
use crate::core::ErrorKind;

/// Immutable lookup from card id to card stats.
///
/// ## Example
///
/// ```
/// use lane_duel::cards::{CardCatalog, CardConfig, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardConfig::unit(CardId::new(1), "Grunt", 1, 2, 2));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.attack, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardConfig>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The production card set.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for card in standard_cards() {
            catalog.register(card);
        }
        catalog
    }

    /// Register a card.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardConfig) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardConfig> {
        self.cards.get(&id)
    }

    /// Get a card by ID, failing with `UnknownCard` when absent.
    pub fn require(&self, id: CardId) -> Result<&CardConfig, ErrorKind> {
        self.cards.get(&id).ok_or(ErrorKind::UnknownCard(id))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardConfig> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }
}

fn standard_cards() -> Vec<CardConfig> {
    vec![
        CardConfig::unit(CardId::new(1), "Hacker", 3, 3, 5)
            .with_direction(AttackDirection::LeftRight)
            .with_description(
                "Steals 2 health from the enemy and gets +1 health if at least one Vibe Coder is on the board",
            ),
        CardConfig::unit(CardId::new(2), "Head Hunter", 4, 1, 2)
            .with_description("Steals random opposing unit and places it on the own side"),
        CardConfig::unit(CardId::new(3), "Manager", 5, 5, 5),
        CardConfig::unit(CardId::new(4), "Vibe Coder", 1, 1, 3)
            .with_description("Reduces the health of the player playing the card by 1 when played"),
        CardConfig::unit(CardId::new(5), "Twitter drama queen", 2, 2, 2),
        CardConfig::unit(CardId::new(6), "The Yapper", 1, 1, 1)
            .with_description("+1 Health and Attack for every Twitter drama queen on the board"),
        CardConfig::unit(CardId::new(7), "Code purist", 3, 3, 3),
        CardConfig::unit(CardId::new(8), "Degen", 0, 2, 1)
            .with_description("Decreases the health by 1 of a random unit on the board"),
    ]
}

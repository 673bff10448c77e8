//! Units on the board.

use serde::{Deserialize, Serialize};

use super::definition::{CardConfig, CardId};

/// A summoned unit occupying one board slot.
///
/// The card's static stats stay in the catalog; only hit points and the
/// per-turn action flag are tracked here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitInstance {
    pub card_id: CardId,

    /// Remaining hit points. The unit leaves the board at 0 or below.
    pub current_hp: i32,

    pub acted_this_turn: bool,
}

impl UnitInstance {
    #[must_use]
    pub fn new(card_id: CardId, current_hp: i32) -> Self {
        Self {
            card_id,
            current_hp,
            acted_this_turn: false,
        }
    }

    /// A fresh unit at the card's base health.
    #[must_use]
    pub fn summon(card: &CardConfig) -> Self {
        Self::new(card.id, card.health)
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0
    }
}

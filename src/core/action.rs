//! Queued player actions.
//!
//! A turn submission is an ordered list of `ActionType` values. The engine
//! consumes them in order, exactly once each, and never reorders or batches
//! them.

use serde::{Deserialize, Serialize};

/// A single action queued by the active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Summon the unit at `hand_index` into the empty board slot `slot_index`.
    PlayCard { hand_index: u8, slot_index: u8 },

    /// Cast the spell at `hand_index` on the lane `target_slot`.
    UseSpell { hand_index: u8, target_slot: u8 },

    /// Stop taking actions and run the combat phase.
    EndTurn,

    /// Give up the match.
    Concede,
}

impl ActionType {
    /// Check if this action closes the turn (either by combat or by conceding).
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        matches!(self, ActionType::EndTurn | ActionType::Concede)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::PlayCard { hand_index, slot_index } => {
                write!(f, "PlayCard(hand {hand_index} -> slot {slot_index})")
            }
            ActionType::UseSpell { hand_index, target_slot } => {
                write!(f, "UseSpell(hand {hand_index} -> slot {target_slot})")
            }
            ActionType::EndTurn => write!(f, "EndTurn"),
            ActionType::Concede => write!(f, "Concede"),
        }
    }
}

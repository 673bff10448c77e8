//! Engine errors.
//!
//! Every rejection names what went wrong and, when a queued action caused
//! it, that action's position in the submission.

use super::state::Game;
use crate::cards::CardId;

/// What went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `hand_index` is past the end of the hand.
    InvalidHandIndex,
    /// Slot index is not a board lane.
    InvalidSlot,
    /// Target board slot already holds a unit.
    SlotOccupied,
    /// Card costs more than the player's current energy.
    NotEnoughEnergy,
    /// The match is already over.
    GameAlreadyFinished,
    /// Submitting player is not the active player.
    NotYourTurn,
    /// Card kind does not fit the action, or a spell has no valid target.
    InvalidAction,
    /// A hand or board entry references a card missing from the catalog.
    UnknownCard(CardId),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidHandIndex => write!(f, "invalid hand index"),
            ErrorKind::InvalidSlot => write!(f, "invalid board slot"),
            ErrorKind::SlotOccupied => write!(f, "board slot occupied"),
            ErrorKind::NotEnoughEnergy => write!(f, "not enough energy"),
            ErrorKind::GameAlreadyFinished => write!(f, "game already finished"),
            ErrorKind::NotYourTurn => write!(f, "not your turn"),
            ErrorKind::InvalidAction => write!(f, "invalid action"),
            ErrorKind::UnknownCard(id) => write!(f, "unknown card {id}"),
        }
    }
}

/// An error with its position in the action queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineError {
    /// What went wrong.
    pub kind: ErrorKind,

    /// Index of the offending action in the submitted queue.
    /// `None` when the error is not tied to one action.
    pub position: Option<usize>,
}

impl EngineError {
    /// An error caused by the action at `position`.
    #[must_use]
    pub fn at(kind: ErrorKind, position: usize) -> Self {
        Self {
            kind,
            position: Some(position),
        }
    }

    /// An error not tied to a queued action.
    #[must_use]
    pub fn unpositioned(kind: ErrorKind) -> Self {
        Self { kind, position: None }
    }
}

impl From<ErrorKind> for EngineError {
    fn from(kind: ErrorKind) -> Self {
        Self::unpositioned(kind)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "action #{position} rejected: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EngineError {}

/// A submission the engine refused to finish.
///
/// `game` is the working copy as it stood before the failing action, so the
/// caller can discard it or retry from there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedTurn {
    pub error: EngineError,
    pub game: Game,
}

impl std::fmt::Display for RejectedTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "turn {} of game {}: {}", self.game.turn, self.game.id, self.error)
    }
}

impl std::error::Error for RejectedTurn {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = EngineError::at(ErrorKind::SlotOccupied, 2);
        assert_eq!(err.to_string(), "action #2 rejected: board slot occupied");
    }

    #[test]
    fn test_display_without_position() {
        let err: EngineError = ErrorKind::UnknownCard(CardId::new(99)).into();
        assert_eq!(err.position, None);
        assert_eq!(err.to_string(), "unknown card Card(99)");
    }
}

//! Core match types: players, snapshot, actions, configuration, errors.
//!
//! These are plain serializable values with no behavior beyond bookkeeping.
//! Rules live in `rules`; presentation timing lives in `animation`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod snapshot;
pub mod state;

pub use action::ActionType;
pub use config::{RulesConfig, BOARD_SLOTS};
pub use error::{EngineError, ErrorKind, RejectedTurn};
pub use player::{AccountId, Board, InvalidPlayerId, PlayerId, PlayerMap, PlayerState};
pub use snapshot::{reconcile, Divergence, Reconciliation};
pub use state::{BoardPos, Game, GameId, GameStatus, MatchResult};

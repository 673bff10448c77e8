//! # lane-duel
//!
//! Deterministic turn-resolution engine for a two-player, four-lane card game
//! whose authoritative rules run on a ledger.
//!
//! ## Design Principles
//!
//! 1. **Mirror the ledger**: Combat, handover and draw rules follow the
//!    on-chain implementation step for step, so local prediction and
//!    animation never diverge from the confirmed outcome.
//!
//! 2. **Pure functions of a snapshot**: Every entry point takes `&Game` and
//!    works on its own copy. Running several speculative resolutions from
//!    the same snapshot needs no locking.
//!
//! 3. **Injected catalog**: Card stats come from a `CardCatalog` borrowed by
//!    the engine, analyzer and sequencer, never from a global.
//!
//! ## Modules
//!
//! - `core`: Players, the `Game` snapshot, actions, configuration, errors
//! - `cards`: Card definitions, board units, the catalog
//! - `rules`: Combat phase, turn engine, outcome analyzer
//! - `animation`: Timed presentation events for the combat phase

pub mod animation;
pub mod cards;
pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    reconcile, AccountId, ActionType, BoardPos, EngineError, ErrorKind, Game, GameId, GameStatus,
    MatchResult, PlayerId, PlayerMap, PlayerState, Reconciliation, RejectedTurn, RulesConfig,
    BOARD_SLOTS,
};

pub use crate::cards::{AttackDirection, CardCatalog, CardConfig, CardId, CardKind, EffectTag, UnitInstance};

pub use crate::rules::{
    CombatOutcome, CombatPlan, LaneClash, OutcomeAnalyzer, PlayerDamage, TurnEngine, TurnSubmission,
};

pub use crate::animation::{
    AnimationKind, AnimationSequencer, AnimationTarget, AnimationTiming, AttackAnimation, CombatSequence,
};

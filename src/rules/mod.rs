//! Match rules: combat, turn resolution, outcome analysis.
//!
//! `combat` is the single implementation of the combat phase. The turn
//! engine applies it; the analyzer and the animation sequencer only read
//! its plan.

pub mod combat;
pub mod engine;
pub mod outcome;

pub use combat::{plan_combat, plan_combat_in_order, CombatPlan, LaneClash, PlayerHit, UnitHit};
pub use engine::{ActionFlow, TurnEngine, TurnSubmission};
pub use outcome::{CombatOutcome, OutcomeAnalyzer, PlayerDamage};

//! Combat animation timeline for the rendering layer.
//!
//! - `timeline`: event types, the sequence, and timing configuration
//! - `sequencer`: builds a `CombatSequence` from a pre-combat snapshot

pub mod sequencer;
pub mod timeline;

pub use sequencer::AnimationSequencer;
pub use timeline::{AnimationKind, AnimationTarget, AnimationTiming, AttackAnimation, CombatSequence};

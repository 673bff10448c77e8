//! Presentation events on a shared millisecond timeline.
//!
//! A `CombatSequence` only describes what to show and when. Dropping it
//! halfway through has no effect on game state.

use serde::{Deserialize, Serialize};

use crate::core::{BoardPos, PlayerId};

/// Durations and offsets of the combat timeline, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    pub attack_duration: u32,
    pub damage_duration: u32,
    pub death_duration: u32,
    /// Delay between consecutive lanes in the attack phase.
    pub attack_stagger: u32,
    /// Delay between consecutive lanes in the damage phase.
    pub damage_stagger: u32,
    /// Delay of the counter-damage event after the primary one in a lane.
    pub counter_offset: u32,
    /// Pause between phases.
    pub phase_gap: u32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            attack_duration: 800,
            damage_duration: 1200,
            death_duration: 800,
            attack_stagger: 150,
            damage_stagger: 100,
            counter_offset: 200,
            phase_gap: 300,
        }
    }
}

/// Kind of presentation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    UnitAttack,
    UnitDamage,
    PlayerDamage,
    UnitDeath,
}

/// What an event points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationTarget {
    Unit(BoardPos),
    Player(PlayerId),
}

/// One timed presentation event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackAnimation {
    /// Stable key for the rendering layer, e.g. `attack-0-2`.
    pub id: String,
    pub kind: AnimationKind,
    /// Attacking unit, for attack events.
    pub source: Option<BoardPos>,
    pub target: AnimationTarget,
    pub damage: Option<i32>,
    pub unit_name: Option<String>,
    /// Start, relative to the beginning of the sequence.
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl AttackAnimation {
    #[must_use]
    pub fn end_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }

    /// Check if `time_ms` falls inside `[delay, delay + duration]`.
    #[must_use]
    pub fn is_active_at(&self, time_ms: u32) -> bool {
        (self.delay_ms..=self.end_ms()).contains(&time_ms)
    }

    /// Check if this event animates the unit at `pos`.
    ///
    /// Attacks are keyed by their source; damage and deaths by their target.
    #[must_use]
    pub fn involves_slot(&self, pos: BoardPos) -> bool {
        match self.kind {
            AnimationKind::UnitAttack => self.source == Some(pos),
            AnimationKind::UnitDamage | AnimationKind::UnitDeath => self.target == AnimationTarget::Unit(pos),
            AnimationKind::PlayerDamage => false,
        }
    }
}

/// Ordered presentation events for one combat phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSequence {
    pub animations: Vec<AttackAnimation>,
    pub total_duration_ms: u32,
}

impl CombatSequence {
    /// Events running at `time_ms`.
    pub fn active_at(&self, time_ms: u32) -> impl Iterator<Item = &AttackAnimation> {
        self.animations.iter().filter(move |a| a.is_active_at(time_ms))
    }

    /// Events animating the unit at `pos` at `time_ms`.
    #[must_use]
    pub fn active_for_slot(&self, pos: BoardPos, time_ms: u32) -> Vec<&AttackAnimation> {
        self.active_at(time_ms).filter(|a| a.involves_slot(pos)).collect()
    }
}

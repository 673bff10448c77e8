//! Snapshot encoding and reconciliation of speculative state.
//!
//! The UI runs the engine ahead of the ledger. When the authoritative
//! snapshot arrives, `reconcile` tells whether the prediction held.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::state::Game;

impl Game {
    /// Encode the snapshot as compact bytes.
    pub fn encode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decode a snapshot produced by `encode`.
    pub fn decode(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

/// A part of the snapshot where prediction and ledger disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Divergence {
    /// Different match id: the snapshots are not comparable.
    GameId,
    Player(PlayerId),
    ActivePlayer,
    Turn,
    Status,
}

/// Outcome of comparing a predicted snapshot with the ledger's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reconciliation {
    /// Prediction matches; keep any animation already in flight.
    Confirmed,
    /// Prediction is stale; discard it and adopt the ledger snapshot.
    Diverged(SmallVec<[Divergence; 4]>),
}

impl Reconciliation {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Reconciliation::Confirmed)
    }
}

/// Compare a predicted snapshot against the authoritative one.
#[must_use]
pub fn reconcile(predicted: &Game, authoritative: &Game) -> Reconciliation {
    if predicted == authoritative {
        return Reconciliation::Confirmed;
    }

    let mut diffs = SmallVec::new();
    if predicted.id != authoritative.id {
        diffs.push(Divergence::GameId);
    }
    for (player, state) in predicted.players.iter() {
        if *state != authoritative.players[player] {
            diffs.push(Divergence::Player(player));
        }
    }
    if predicted.active_idx != authoritative.active_idx {
        diffs.push(Divergence::ActivePlayer);
    }
    if predicted.turn != authoritative.turn {
        diffs.push(Divergence::Turn);
    }
    if predicted.status != authoritative.status || predicted.result != authoritative.result {
        diffs.push(Divergence::Status);
    }

    log::debug!("game {}: speculative snapshot diverged: {:?}", authoritative.id, diffs);
    Reconciliation::Diverged(diffs)
}

//! Outcome analysis: what the next combat phase will do, without doing it.
//!
//! The analyzer runs the same combat plan the engine applies, on a scratch
//! copy, and diffs the copy against the input.

use serde::{Deserialize, Serialize};

use super::combat;
use crate::cards::CardCatalog;
use crate::core::{BoardPos, EngineError, Game, MatchResult, PlayerId};

/// Hit points a player will lose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerDamage {
    pub player: PlayerId,
    pub damage: i32,
}

/// Predicted result of the coming combat phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// Units present before combat and gone after, player 0 first, lane order.
    pub destroyed: Vec<BoardPos>,

    /// Players whose hit points drop, in seat order.
    pub player_damage: Vec<PlayerDamage>,

    /// Set when combat ends the match.
    pub result: Option<MatchResult>,
}

impl CombatOutcome {
    /// The winner, if combat leaves exactly one player standing.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.and_then(|r| r.winner())
    }
}

/// Read-only projection of the combat phase.
#[derive(Clone, Copy, Debug)]
pub struct OutcomeAnalyzer<'a> {
    catalog: &'a CardCatalog,
}

impl<'a> OutcomeAnalyzer<'a> {
    #[must_use]
    pub fn new(catalog: &'a CardCatalog) -> Self {
        Self { catalog }
    }

    /// The snapshot right after combat: no handover, no turn increment.
    pub fn simulate(&self, game: &Game) -> Result<Game, EngineError> {
        let mut scratch = game.clone();
        combat::plan_combat(&scratch, self.catalog)?.apply(&mut scratch);
        Ok(scratch)
    }

    /// Compare the input with its post-combat copy.
    pub fn analyze(&self, game: &Game) -> Result<CombatOutcome, EngineError> {
        let after = self.simulate(game)?;

        let destroyed = BoardPos::all()
            .filter(|&pos| game.unit_at(pos).is_some() && after.unit_at(pos).is_none())
            .collect();

        let player_damage = PlayerId::both()
            .filter_map(|player| {
                let damage = game.player(player).hp.saturating_sub(after.player(player).hp);
                (damage > 0).then_some(PlayerDamage { player, damage })
            })
            .collect();

        let outcome = CombatOutcome {
            destroyed,
            player_damage,
            result: after.lethal_result(),
        };
        log::trace!("game {}: predicted combat outcome {:?}", game.id, outcome);
        Ok(outcome)
    }

    /// Units the coming combat will destroy.
    pub fn units_to_be_destroyed(&self, game: &Game) -> Result<Vec<BoardPos>, EngineError> {
        Ok(self.analyze(game)?.destroyed)
    }

    /// Damage each player will take.
    pub fn player_damage(&self, game: &Game) -> Result<Vec<PlayerDamage>, EngineError> {
        Ok(self.analyze(game)?.player_damage)
    }

    /// How the match ends after combat, if it does.
    pub fn winner_after_combat(&self, game: &Game) -> Result<Option<MatchResult>, EngineError> {
        Ok(self.analyze(game)?.result)
    }
}

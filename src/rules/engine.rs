//! Turn-resolution engine.
//!
//! Applies the active player's queued actions to a private copy of the
//! snapshot, runs combat when the queue ends the turn, and hands the turn
//! over. The caller's `Game` is never mutated.

use smallvec::SmallVec;

use super::combat;
use crate::cards::{CardCatalog, EffectTag, UnitInstance};
use crate::core::{
    ActionType, BoardPos, EngineError, ErrorKind, Game, MatchResult, PlayerId, RejectedTurn,
    RulesConfig, BOARD_SLOTS,
};

/// The actions one player submits for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSubmission {
    /// Submitting player. Must be the active player.
    pub player: PlayerId,

    /// Actions in the order they were queued.
    pub actions: SmallVec<[ActionType; 8]>,

    /// Seed for the handover draw (the ledger uses the block number).
    pub draw_seed: u64,
}

impl TurnSubmission {
    #[must_use]
    pub fn new(player: PlayerId, actions: impl IntoIterator<Item = ActionType>) -> Self {
        Self {
            player,
            actions: actions.into_iter().collect(),
            draw_seed: 0,
        }
    }

    /// Set the draw seed (builder pattern).
    #[must_use]
    pub fn with_draw_seed(mut self, seed: u64) -> Self {
        self.draw_seed = seed;
        self
    }
}

/// What the engine should do after an action applied cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionFlow {
    /// Keep processing the queue.
    Continue,
    /// Run combat and hand the turn over.
    EndTurn,
    /// The match ended; stop without combat.
    MatchOver,
}

/// Resolves turns against an injected catalog and rule set.
///
/// ## Example
///
/// ```
/// use lane_duel::cards::{CardCatalog, CardId};
/// use lane_duel::core::{AccountId, ActionType, Game, PlayerId, RulesConfig};
/// use lane_duel::rules::{TurnEngine, TurnSubmission};
///
/// let catalog = CardCatalog::standard();
/// let deck = [4, 6, 8, 4, 6, 8, 4, 6].map(CardId::new);
/// let game = Game::new_match(1, [AccountId([1; 20]), AccountId([2; 20])], &deck, &RulesConfig::default(), 0);
///
/// let engine = TurnEngine::new(&catalog);
/// let submission = TurnSubmission::new(PlayerId::FIRST, [ActionType::EndTurn]);
/// let next = engine.resolve_turn(&game, &submission).unwrap();
///
/// assert_eq!(next.active_idx, PlayerId::SECOND);
/// assert_eq!(next.turn, 2);
/// ```
#[derive(Clone, Debug)]
pub struct TurnEngine<'a> {
    catalog: &'a CardCatalog,
    config: RulesConfig,
}

impl<'a> TurnEngine<'a> {
    /// Create an engine with the default rules.
    #[must_use]
    pub fn new(catalog: &'a CardCatalog) -> Self {
        Self::with_config(catalog, RulesConfig::default())
    }

    /// Create an engine with custom rules.
    #[must_use]
    pub fn with_config(catalog: &'a CardCatalog, config: RulesConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn catalog(&self) -> &'a CardCatalog {
        self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Resolve one submission and return the next snapshot.
    ///
    /// Processing is fail-fast: the first bad action stops the queue and is
    /// returned together with the working copy as it stood before it.
    /// Actions queued after `EndTurn` are not processed.
    pub fn resolve_turn(&self, game: &Game, submission: &TurnSubmission) -> Result<Game, RejectedTurn> {
        let mut next = game.clone();

        if next.is_finished() {
            return Err(reject(next, EngineError::unpositioned(ErrorKind::GameAlreadyFinished)));
        }
        if submission.player != next.active_idx {
            return Err(reject(next, EngineError::unpositioned(ErrorKind::NotYourTurn)));
        }

        log::debug!(
            "game {}: resolving turn {} for {} ({} queued action(s))",
            next.id,
            next.turn,
            submission.player,
            submission.actions.len(),
        );

        let queued = submission.actions.len();
        for (position, action) in submission.actions.iter().enumerate() {
            match self.apply_action(&mut next, action) {
                Ok(ActionFlow::Continue) => {
                    log::trace!("game {}: applied #{position} {action}", next.id);
                }
                Ok(ActionFlow::MatchOver) => {
                    log::debug!("game {}: {} conceded at #{position}", next.id, submission.player);
                    return Ok(next);
                }
                Ok(ActionFlow::EndTurn) => {
                    if position + 1 < queued {
                        log::warn!(
                            "game {}: ignoring {} action(s) queued after EndTurn",
                            next.id,
                            queued - position - 1,
                        );
                    }
                    if let Err(kind) = self.end_turn(&mut next, submission.draw_seed) {
                        return Err(reject(next, EngineError::at(kind, position)));
                    }
                    return Ok(next);
                }
                Err(kind) => {
                    log::debug!("game {}: rejected #{position} {action}: {kind}", next.id);
                    return Err(reject(next, EngineError::at(kind, position)));
                }
            }
        }

        Ok(next)
    }

    /// Apply one action for the active player.
    ///
    /// Either every effect of the action lands or none does: all checks run
    /// before the first mutation. `EndTurn` only reports the flow change;
    /// combat runs in `resolve_turn`.
    pub fn apply_action(&self, game: &mut Game, action: &ActionType) -> Result<ActionFlow, ErrorKind> {
        if game.is_finished() {
            return Err(ErrorKind::GameAlreadyFinished);
        }
        let active = game.active_idx;

        match *action {
            ActionType::PlayCard { hand_index, slot_index } => {
                let hand_index = usize::from(hand_index);
                let slot = usize::from(slot_index);
                let player = game.player(active);

                let card_id = *player.hand.get(hand_index).ok_or(ErrorKind::InvalidHandIndex)?;
                if slot >= BOARD_SLOTS {
                    return Err(ErrorKind::InvalidSlot);
                }
                if player.board[slot].is_some() {
                    return Err(ErrorKind::SlotOccupied);
                }
                let card = self.catalog.require(card_id)?;
                if !card.is_unit() {
                    return Err(ErrorKind::InvalidAction);
                }
                if player.energy < card.cost {
                    return Err(ErrorKind::NotEnoughEnergy);
                }

                let player = game.player_mut(active);
                player.energy -= card.cost;
                player.hand.remove(hand_index);
                player.board[slot] = Some(UnitInstance::summon(card));
                Ok(ActionFlow::Continue)
            }

            ActionType::UseSpell { hand_index, target_slot } => {
                let hand_index = usize::from(hand_index);
                let slot = usize::from(target_slot);
                let player = game.player(active);

                let card_id = *player.hand.get(hand_index).ok_or(ErrorKind::InvalidHandIndex)?;
                if slot >= BOARD_SLOTS {
                    return Err(ErrorKind::InvalidSlot);
                }
                let spell = self.catalog.require(card_id)?;
                if !spell.is_spell() {
                    return Err(ErrorKind::InvalidAction);
                }
                if player.energy < spell.cost {
                    return Err(ErrorKind::NotEnoughEnergy);
                }

                let target = match spell.effect {
                    Some(EffectTag::DamageFront) => BoardPos::new(active.opponent(), slot),
                    Some(EffectTag::HealSelf) => BoardPos::new(active, slot),
                    _ => return Err(ErrorKind::InvalidAction),
                };
                let unit = *game.unit_at(target).ok_or(ErrorKind::InvalidAction)?;
                let after = if spell.effect == Some(EffectTag::HealSelf) {
                    let max_hp = self.catalog.require(unit.card_id)?.health;
                    let healed = unit.current_hp.saturating_add(spell.attack).min(max_hp).max(unit.current_hp);
                    Some(UnitInstance { current_hp: healed, ..unit })
                } else {
                    let hit = UnitInstance { current_hp: unit.current_hp.saturating_sub(spell.attack), ..unit };
                    (!hit.is_dead()).then_some(hit)
                };

                let player = game.player_mut(active);
                player.energy -= spell.cost;
                player.hand.remove(hand_index);
                game.player_mut(target.player).board[target.slot] = after;
                Ok(ActionFlow::Continue)
            }

            ActionType::EndTurn => Ok(ActionFlow::EndTurn),

            ActionType::Concede => {
                game.finish(MatchResult::Winner(active.opponent()));
                Ok(ActionFlow::MatchOver)
            }
        }
    }

    /// Run combat, then either end the match or hand the turn over.
    ///
    /// Combat is planned before anything changes, so an error leaves the
    /// snapshot untouched.
    fn end_turn(&self, game: &mut Game, draw_seed: u64) -> Result<(), ErrorKind> {
        let plan = combat::plan_combat(game, self.catalog)?;
        plan.apply(game);

        if let Some(result) = game.lethal_result() {
            log::debug!("game {}: match over after combat: {:?}", game.id, result);
            game.finish(result);
            return Ok(());
        }

        self.hand_over(game, draw_seed);
        Ok(())
    }

    fn hand_over(&self, game: &mut Game, draw_seed: u64) {
        game.active_idx = game.active_idx.opponent();
        game.turn = game.turn.saturating_add(1);

        let turn = game.turn;
        let player = game.player_mut(game.active_idx);
        if player.max_energy < self.config.energy_cap {
            player.max_energy += 1;
        }
        player.energy = player.max_energy;
        let drawn = player.draw(draw_seed, turn, self.config.hand_limit);
        for unit in player.board.iter_mut().flatten() {
            unit.acted_this_turn = false;
        }

        log::debug!(
            "game {}: turn {} to {} (energy {}, drew {:?})",
            game.id,
            turn,
            game.active_idx,
            game.active_player().energy,
            drawn,
        );
    }
}

fn reject(game: Game, error: EngineError) -> RejectedTurn {
    RejectedTurn { error, game }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardConfig, CardId};
    use crate::core::{AccountId, GameStatus, PlayerMap, PlayerState};

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register(CardConfig::unit(CardId::new(1), "Grunt", 1, 1, 3));
        catalog.register(CardConfig::unit(CardId::new(2), "Brute", 3, 4, 4));
        catalog.register(CardConfig::spell(CardId::new(10), "Bolt", 1, 2, EffectTag::DamageFront));
        catalog.register(CardConfig::spell(CardId::new(11), "Mend", 1, 5, EffectTag::HealSelf));
        catalog.register(CardConfig::spell(CardId::new(12), "Rally", 0, 1, EffectTag::Charge));
        catalog
    }

    fn game_with_hand(hand: &[u32], energy: u32) -> Game {
        let mut game = Game {
            id: 1,
            players: PlayerMap::new(|_| PlayerState::new(AccountId::default(), 20, energy, energy, Vec::new())),
            active_idx: PlayerId::FIRST,
            turn: 1,
            status: GameStatus::InProgress,
            result: None,
        };
        game.player_mut(PlayerId::FIRST).hand = hand.iter().copied().map(CardId::new).collect();
        game
    }

    fn play(hand_index: u8, slot_index: u8) -> ActionType {
        ActionType::PlayCard { hand_index, slot_index }
    }

    fn spell(hand_index: u8, target_slot: u8) -> ActionType {
        ActionType::UseSpell { hand_index, target_slot }
    }

    #[test]
    fn test_play_card_summons_and_spends() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[1, 2], 5);

        assert_eq!(engine.apply_action(&mut game, &play(1, 2)), Ok(ActionFlow::Continue));

        let player = game.player(PlayerId::FIRST);
        assert_eq!(player.energy, 2);
        assert_eq!(player.hand.iter().copied().collect::<Vec<_>>(), vec![CardId::new(1)]);
        assert_eq!(player.unit_at(2), Some(&UnitInstance::new(CardId::new(2), 4)));
    }

    #[test]
    fn test_play_card_validation_order() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[2, 10], 1);
        game.player_mut(PlayerId::FIRST).board[0] = Some(UnitInstance::new(CardId::new(1), 3));
        let before = game.clone();

        assert_eq!(engine.apply_action(&mut game, &play(2, 9)), Err(ErrorKind::InvalidHandIndex));
        assert_eq!(engine.apply_action(&mut game, &play(0, 4)), Err(ErrorKind::InvalidSlot));
        assert_eq!(engine.apply_action(&mut game, &play(0, 0)), Err(ErrorKind::SlotOccupied));
        assert_eq!(engine.apply_action(&mut game, &play(0, 1)), Err(ErrorKind::NotEnoughEnergy));
        assert_eq!(engine.apply_action(&mut game, &play(1, 1)), Err(ErrorKind::InvalidAction));
        assert_eq!(game, before);
    }

    #[test]
    fn test_damage_spell_hits_opposing_lane() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[10], 1);
        game.player_mut(PlayerId::SECOND).board[3] = Some(UnitInstance::new(CardId::new(2), 4));

        engine.apply_action(&mut game, &spell(0, 3)).unwrap();

        assert_eq!(game.player(PlayerId::SECOND).unit_at(3).unwrap().current_hp, 2);
        assert_eq!(game.player(PlayerId::FIRST).energy, 0);
        assert!(game.player(PlayerId::FIRST).hand.is_empty());
    }

    #[test]
    fn test_damage_spell_removes_killed_unit() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[10], 1);
        game.player_mut(PlayerId::SECOND).board[0] = Some(UnitInstance::new(CardId::new(1), 2));

        engine.apply_action(&mut game, &spell(0, 0)).unwrap();

        assert!(game.player(PlayerId::SECOND).board[0].is_none());
    }

    #[test]
    fn test_damage_spell_ignores_target_catalog_entry() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[10], 1);
        game.player_mut(PlayerId::SECOND).board[2] = Some(UnitInstance::new(CardId::new(99), 5));

        engine.apply_action(&mut game, &spell(0, 2)).unwrap();

        assert_eq!(game.player(PlayerId::SECOND).unit_at(2).unwrap().current_hp, 3);
    }

    #[test]
    fn test_heal_spell_on_unknown_unit_fails_cleanly() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[11], 1);
        game.player_mut(PlayerId::FIRST).board[2] = Some(UnitInstance::new(CardId::new(99), 1));
        let before = game.clone();

        let err = engine.apply_action(&mut game, &spell(0, 2)).unwrap_err();

        assert_eq!(err, ErrorKind::UnknownCard(CardId::new(99)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_heal_spell_capped_at_base_health() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[11], 1);
        game.player_mut(PlayerId::FIRST).board[1] = Some(UnitInstance::new(CardId::new(2), 1));

        engine.apply_action(&mut game, &spell(0, 1)).unwrap();

        assert_eq!(game.player(PlayerId::FIRST).unit_at(1).unwrap().current_hp, 4);
    }

    #[test]
    fn test_spell_without_target_or_effect_is_invalid() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[10, 12, 1], 3);
        let before = game.clone();

        assert_eq!(engine.apply_action(&mut game, &spell(0, 2)), Err(ErrorKind::InvalidAction));
        assert_eq!(engine.apply_action(&mut game, &spell(1, 2)), Err(ErrorKind::InvalidAction));
        assert_eq!(engine.apply_action(&mut game, &spell(2, 2)), Err(ErrorKind::InvalidAction));
        assert_eq!(engine.apply_action(&mut game, &spell(0, 7)), Err(ErrorKind::InvalidSlot));
        assert_eq!(game, before);
    }

    #[test]
    fn test_handover_ramps_energy_draws_and_resets_flags() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[], 1);
        {
            let second = game.player_mut(PlayerId::SECOND);
            second.energy = 0;
            second.max_energy = 1;
            second.deck = [1, 2, 1].map(CardId::new).into_iter().collect();
            second.board[0] = Some(UnitInstance { acted_this_turn: true, ..UnitInstance::new(CardId::new(1), 3) });
        }

        let submission = TurnSubmission::new(PlayerId::FIRST, [ActionType::EndTurn]).with_draw_seed(1);
        let next = engine.resolve_turn(&game, &submission).unwrap();

        let second = next.player(PlayerId::SECOND);
        assert_eq!(next.active_idx, PlayerId::SECOND);
        assert_eq!(next.turn, 2);
        assert_eq!((second.energy, second.max_energy), (2, 2));
        // (1 + 2) % 3 = 0
        assert_eq!(second.hand.iter().copied().collect::<Vec<_>>(), vec![CardId::new(1)]);
        assert!(!second.unit_at(0).unwrap().acted_this_turn);
    }

    #[test]
    fn test_energy_cap() {
        let catalog = catalog();
        let engine = TurnEngine::with_config(&catalog, RulesConfig::default().with_energy_cap(1));
        let game = game_with_hand(&[], 1);

        let next = engine
            .resolve_turn(&game, &TurnSubmission::new(PlayerId::FIRST, [ActionType::EndTurn]))
            .unwrap();

        assert_eq!(next.player(PlayerId::SECOND).max_energy, 1);
        assert_eq!(next.player(PlayerId::SECOND).energy, 1);
    }

    #[test]
    fn test_queue_without_end_turn_keeps_turn_open() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let game = game_with_hand(&[1], 1);

        let next = engine
            .resolve_turn(&game, &TurnSubmission::new(PlayerId::FIRST, [play(0, 0)]))
            .unwrap();

        assert_eq!(next.active_idx, PlayerId::FIRST);
        assert_eq!(next.turn, 1);
        assert_eq!(next.player(PlayerId::SECOND).hp, 20);
        assert!(next.player(PlayerId::FIRST).unit_at(0).is_some());
    }

    #[test]
    fn test_actions_after_end_turn_are_ignored() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let game = game_with_hand(&[1], 1);

        let submission = TurnSubmission::new(PlayerId::FIRST, [ActionType::EndTurn, play(0, 0)]);
        let next = engine.resolve_turn(&game, &submission).unwrap();

        assert_eq!(next.player(PlayerId::FIRST).hand.len(), 1);
        assert!(next.player(PlayerId::FIRST).board.iter().all(Option::is_none));
    }

    #[test]
    fn test_submission_checks() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let game = game_with_hand(&[], 1);

        let wrong_player = TurnSubmission::new(PlayerId::SECOND, [ActionType::EndTurn]);
        let rejected = engine.resolve_turn(&game, &wrong_player).unwrap_err();
        assert_eq!(rejected.error, EngineError::unpositioned(ErrorKind::NotYourTurn));
        assert_eq!(rejected.game, game);

        let mut finished = game.clone();
        finished.finish(MatchResult::Winner(PlayerId::SECOND));
        let rejected = engine
            .resolve_turn(&finished, &TurnSubmission::new(PlayerId::FIRST, [ActionType::EndTurn]))
            .unwrap_err();
        assert_eq!(rejected.error.kind, ErrorKind::GameAlreadyFinished);
    }

    #[test]
    fn test_combat_error_reports_end_turn_position() {
        let catalog = catalog();
        let engine = TurnEngine::new(&catalog);
        let mut game = game_with_hand(&[], 1);
        game.player_mut(PlayerId::FIRST).board[0] = Some(UnitInstance::new(CardId::new(77), 1));

        let rejected = engine
            .resolve_turn(&game, &TurnSubmission::new(PlayerId::FIRST, [ActionType::EndTurn]))
            .unwrap_err();

        assert_eq!(rejected.error, EngineError::at(ErrorKind::UnknownCard(CardId::new(77)), 0));
        assert_eq!(rejected.game, game);
    }
}

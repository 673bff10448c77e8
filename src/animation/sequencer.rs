//! Builds the combat timeline from a pre-combat snapshot.
//!
//! Three phases: attacks, damage, deaths. Phase start times are fixed
//! offsets computed from the last lane, so a timeline for a quiet board is
//! as long as one for a full board.

use crate::cards::CardCatalog;
use crate::core::{BoardPos, EngineError, Game, BOARD_SLOTS};
use crate::rules::combat::{self, LaneClash};

use super::timeline::{AnimationKind, AnimationTarget, AnimationTiming, AttackAnimation, CombatSequence};

/// Turns combat facts into presentation events.
#[derive(Clone, Debug)]
pub struct AnimationSequencer<'a> {
    catalog: &'a CardCatalog,
    timing: AnimationTiming,
}

impl<'a> AnimationSequencer<'a> {
    #[must_use]
    pub fn new(catalog: &'a CardCatalog) -> Self {
        Self::with_timing(catalog, AnimationTiming::default())
    }

    #[must_use]
    pub fn with_timing(catalog: &'a CardCatalog, timing: AnimationTiming) -> Self {
        Self { catalog, timing }
    }

    #[must_use]
    pub fn timing(&self) -> &AnimationTiming {
        &self.timing
    }

    /// Build the timeline for the combat phase `game` is about to run.
    pub fn sequence(&self, game: &Game) -> Result<CombatSequence, EngineError> {
        let plan = combat::plan_combat(game, self.catalog)?;
        let t = &self.timing;
        let last_lane = BOARD_SLOTS - 1;
        let attacker = plan.attacker;
        let defender = plan.defender();
        let mut animations = Vec::new();

        // Phase 1: attacks.
        for clash in &plan.lanes {
            let slot = clash.slot();
            let source = BoardPos::new(attacker, slot);
            let unit_name = self.unit_name(game, source)?;
            let delay_ms = lane_offset(slot, t.attack_stagger);

            let (id, kind, target, damage) = match *clash {
                LaneClash::Duel { attack, .. } => (
                    format!("attack-{}-{slot}", attacker.0),
                    AnimationKind::UnitAttack,
                    AnimationTarget::Unit(BoardPos::new(defender, slot)),
                    attack,
                ),
                LaneClash::Direct { attack, .. } => (
                    format!("player-attack-{}-{slot}", attacker.0),
                    AnimationKind::PlayerDamage,
                    AnimationTarget::Player(defender),
                    attack,
                ),
            };
            animations.push(AttackAnimation {
                id,
                kind,
                source: Some(source),
                target,
                damage: Some(damage),
                unit_name,
                delay_ms,
                duration_ms: t.attack_duration,
            });
        }

        // Phase 2: damage, primary hit then counter-damage in each duel lane.
        let damage_start = lane_offset(last_lane, t.attack_stagger)
            .saturating_add(t.attack_duration)
            .saturating_add(t.phase_gap);
        for clash in &plan.lanes {
            let LaneClash::Duel { slot, attack, counter } = *clash else {
                continue;
            };
            let delay_ms = damage_start.saturating_add(lane_offset(slot, t.damage_stagger));

            animations.push(AttackAnimation {
                id: format!("damage-{}-{slot}", defender.0),
                kind: AnimationKind::UnitDamage,
                source: None,
                target: AnimationTarget::Unit(BoardPos::new(defender, slot)),
                damage: Some(attack),
                unit_name: None,
                delay_ms,
                duration_ms: t.damage_duration,
            });
            animations.push(AttackAnimation {
                id: format!("counter-damage-{}-{slot}", attacker.0),
                kind: AnimationKind::UnitDamage,
                source: None,
                target: AnimationTarget::Unit(BoardPos::new(attacker, slot)),
                damage: Some(counter),
                unit_name: None,
                delay_ms: delay_ms.saturating_add(t.counter_offset),
                duration_ms: t.damage_duration,
            });
        }

        // Phase 3: deaths, all at once.
        let death_start = damage_start
            .saturating_add(lane_offset(last_lane, t.damage_stagger))
            .saturating_add(t.counter_offset)
            .saturating_add(t.damage_duration)
            .saturating_add(t.phase_gap);
        for pos in BoardPos::all() {
            let Some(unit) = game.unit_at(pos) else {
                continue;
            };
            if unit.current_hp.saturating_sub(plan.damage_to(pos)) <= 0 {
                animations.push(AttackAnimation {
                    id: format!("death-{}-{}", pos.player.0, pos.slot),
                    kind: AnimationKind::UnitDeath,
                    source: None,
                    target: AnimationTarget::Unit(pos),
                    damage: None,
                    unit_name: self.unit_name(game, pos)?,
                    delay_ms: death_start,
                    duration_ms: t.death_duration,
                });
            }
        }

        let sequence = CombatSequence {
            animations,
            total_duration_ms: death_start.saturating_add(t.death_duration),
        };
        log::trace!(
            "game {}: {} combat animation(s) over {}ms",
            game.id,
            sequence.animations.len(),
            sequence.total_duration_ms,
        );
        Ok(sequence)
    }

    fn unit_name(&self, game: &Game, pos: BoardPos) -> Result<Option<String>, EngineError> {
        match game.unit_at(pos) {
            Some(unit) => Ok(Some(self.catalog.require(unit.card_id)?.name.clone())),
            None => Ok(None),
        }
    }
}

/// Start offset of a lane within a staggered phase, saturating at `u32::MAX`.
fn lane_offset(slot: usize, stagger: u32) -> u32 {
    u32::try_from(slot).unwrap_or(u32::MAX).saturating_mul(stagger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardConfig, CardId, UnitInstance};
    use crate::core::{AccountId, GameStatus, PlayerId, PlayerMap, PlayerState};

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register(CardConfig::unit(CardId::new(1), "Pike", 2, 2, 2));
        catalog.register(CardConfig::unit(CardId::new(2), "Wall", 2, 1, 6));
        catalog
    }

    fn game() -> Game {
        Game {
            id: 9,
            players: PlayerMap::new(|_| PlayerState::new(AccountId::default(), 20, 1, 1, Vec::new())),
            active_idx: PlayerId::FIRST,
            turn: 1,
            status: GameStatus::InProgress,
            result: None,
        }
    }

    #[test]
    fn test_empty_board_still_has_fixed_length() {
        let catalog = catalog();
        let sequence = AnimationSequencer::new(&catalog).sequence(&game()).unwrap();

        assert!(sequence.animations.is_empty());
        // phase 2 at 3*150 + 800 + 300 = 1550; phase 3 at 1550 + 300 + 200 + 1200 + 300 = 3550
        assert_eq!(sequence.total_duration_ms, 3550 + 800);
    }

    #[test]
    fn test_direct_attack_is_staggered_by_lane() {
        let catalog = catalog();
        let mut game = game();
        game.player_mut(PlayerId::FIRST).board[2] = Some(UnitInstance::new(CardId::new(1), 2));

        let sequence = AnimationSequencer::new(&catalog).sequence(&game).unwrap();

        assert_eq!(sequence.animations.len(), 1);
        let attack = &sequence.animations[0];
        assert_eq!(attack.id, "player-attack-0-2");
        assert_eq!(attack.kind, AnimationKind::PlayerDamage);
        assert_eq!(attack.target, AnimationTarget::Player(PlayerId::SECOND));
        assert_eq!(attack.damage, Some(2));
        assert_eq!(attack.unit_name.as_deref(), Some("Pike"));
        assert_eq!(attack.delay_ms, 300);
        assert_eq!(attack.duration_ms, 800);
    }

    #[test]
    fn test_duel_emits_attack_damage_counter_and_death() {
        let catalog = catalog();
        let mut game = game();
        game.player_mut(PlayerId::FIRST).board[1] = Some(UnitInstance::new(CardId::new(2), 6));
        game.player_mut(PlayerId::SECOND).board[1] = Some(UnitInstance::new(CardId::new(1), 1));

        let sequence = AnimationSequencer::new(&catalog).sequence(&game).unwrap();
        let ids: Vec<_> = sequence.animations.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["attack-0-1", "damage-1-1", "counter-damage-0-1", "death-1-1"]);

        let delays: Vec<_> = sequence.animations.iter().map(|a| a.delay_ms).collect();
        assert_eq!(delays, vec![150, 1650, 1850, 3550]);

        let damage = &sequence.animations[1];
        assert_eq!(damage.target, AnimationTarget::Unit(BoardPos::new(PlayerId::SECOND, 1)));
        assert_eq!(damage.damage, Some(1));
        assert_eq!(sequence.animations[2].damage, Some(2));
    }

    #[test]
    fn test_custom_timing() {
        let catalog = catalog();
        let timing = AnimationTiming {
            death_duration: 0,
            phase_gap: 0,
            ..AnimationTiming::default()
        };

        let sequence = AnimationSequencer::with_timing(&catalog, timing).sequence(&game()).unwrap();
        assert_eq!(sequence.total_duration_ms, 1250 + 300 + 200 + 1200);
    }

    #[test]
    fn test_oversized_timing_saturates() {
        let catalog = catalog();
        let mut game = game();
        game.player_mut(PlayerId::FIRST).board[3] = Some(UnitInstance::new(CardId::new(1), 2));
        game.player_mut(PlayerId::SECOND).board[3] = Some(UnitInstance::new(CardId::new(1), 2));
        let timing: AnimationTiming = serde_json::from_str(r#"{"phase_gap": 4294967000, "attack_stagger": 4294967000}"#).unwrap();

        let sequence = AnimationSequencer::with_timing(&catalog, timing).sequence(&game).unwrap();

        assert_eq!(sequence.total_duration_ms, u32::MAX);
        assert!(sequence.animations.iter().all(|a| a.end_ms() <= sequence.total_duration_ms));
        let kinds: Vec<_> = sequence
            .active_for_slot(BoardPos::new(PlayerId::SECOND, 3), u32::MAX)
            .iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(kinds, vec![AnimationKind::UnitDamage, AnimationKind::UnitDeath]);
    }
}

//! The combat phase.
//!
//! Combat is lane-based and simultaneous. `plan_combat` reads the
//! pre-combat board and records what happens in every lane; nothing is
//! mutated until `CombatPlan::apply`, so lane order cannot change the
//! outcome. The turn engine, the outcome analyzer and the animation
//! sequencer all work from the same plan.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardCatalog, UnitInstance};
use crate::core::{BoardPos, ErrorKind, Game, PlayerId, BOARD_SLOTS};

/// What happens in one lane that holds an attacking unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneClash {
    /// Both sides have a unit: each takes the other's attack.
    Duel { slot: usize, attack: i32, counter: i32 },
    /// The defending slot is empty: the attack goes to the defending player.
    Direct { slot: usize, attack: i32 },
}

impl LaneClash {
    #[must_use]
    pub fn slot(&self) -> usize {
        match self {
            LaneClash::Duel { slot, .. } | LaneClash::Direct { slot, .. } => *slot,
        }
    }
}

/// Damage dealt to one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitHit {
    pub target: BoardPos,
    pub damage: i32,
}

/// Damage dealt to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerHit {
    pub player: PlayerId,
    pub damage: i32,
}

/// Combat facts derived from a pre-combat snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatPlan {
    /// The active player, whose units attack.
    pub attacker: PlayerId,

    /// One entry per lane with an attacking unit, in planning order.
    pub lanes: SmallVec<[LaneClash; BOARD_SLOTS]>,
}

/// Attack power of a unit, from its catalog entry.
pub fn attack_power(catalog: &CardCatalog, unit: &UnitInstance) -> Result<i32, ErrorKind> {
    Ok(catalog.require(unit.card_id)?.attack)
}

/// Plan combat for the active player, lanes in order 0..3.
pub fn plan_combat(game: &Game, catalog: &CardCatalog) -> Result<CombatPlan, ErrorKind> {
    plan_combat_in_order(game, catalog, 0..BOARD_SLOTS)
}

/// Plan combat visiting lanes in the given order.
///
/// Lanes outside the board are ignored. The applied outcome is the same
/// for every order.
pub fn plan_combat_in_order(
    game: &Game,
    catalog: &CardCatalog,
    lanes: impl IntoIterator<Item = usize>,
) -> Result<CombatPlan, ErrorKind> {
    let attacker = game.active_idx;
    let own = game.player(attacker);
    let enemy = game.player(attacker.opponent());

    let mut plan = CombatPlan {
        attacker,
        lanes: SmallVec::new(),
    };

    for slot in lanes {
        let Some(unit) = own.unit_at(slot) else {
            continue;
        };
        let attack = attack_power(catalog, unit)?;

        let clash = match enemy.unit_at(slot) {
            Some(defender) => LaneClash::Duel {
                slot,
                attack,
                counter: attack_power(catalog, defender)?,
            },
            None => LaneClash::Direct { slot, attack },
        };
        plan.lanes.push(clash);
    }

    Ok(plan)
}

impl CombatPlan {
    /// The defending player.
    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacker.opponent()
    }

    /// Every unit hit in this plan.
    pub fn unit_hits(&self) -> impl Iterator<Item = UnitHit> + '_ {
        let (attacker, defender) = (self.attacker, self.defender());
        self.lanes.iter().flat_map(move |clash| {
            let hits: SmallVec<[UnitHit; 2]> = match *clash {
                LaneClash::Duel { slot, attack, counter } => smallvec::smallvec![
                    UnitHit { target: BoardPos::new(attacker, slot), damage: counter },
                    UnitHit { target: BoardPos::new(defender, slot), damage: attack },
                ],
                LaneClash::Direct { .. } => SmallVec::new(),
            };
            hits
        })
    }

    /// Every hit on a player in this plan.
    pub fn player_hits(&self) -> impl Iterator<Item = PlayerHit> + '_ {
        let defender = self.defender();
        self.lanes.iter().filter_map(move |clash| match *clash {
            LaneClash::Direct { attack, .. } => Some(PlayerHit { player: defender, damage: attack }),
            LaneClash::Duel { .. } => None,
        })
    }

    /// Total damage a board position will take.
    #[must_use]
    pub fn damage_to(&self, pos: BoardPos) -> i32 {
        self.unit_hits()
            .filter(|hit| hit.target == pos)
            .map(|hit| hit.damage)
            .sum()
    }

    /// Total damage a player will take.
    #[must_use]
    pub fn damage_to_player(&self, player: PlayerId) -> i32 {
        self.player_hits()
            .filter(|hit| hit.player == player)
            .map(|hit| hit.damage)
            .sum()
    }

    /// Apply the plan: unit damage, then player damage, then remove dead
    /// units in a single sweep (player 0 then 1, slots 0..3).
    ///
    /// Returns the removed positions in sweep order.
    pub fn apply(&self, game: &mut Game) -> SmallVec<[BoardPos; 8]> {
        let unit_hits: SmallVec<[UnitHit; 8]> = self.unit_hits().collect();
        let player_hits: SmallVec<[PlayerHit; BOARD_SLOTS]> = self.player_hits().collect();

        for hit in unit_hits {
            if let Some(unit) = game.unit_at_mut(hit.target) {
                unit.current_hp = unit.current_hp.saturating_sub(hit.damage);
            }
        }

        for hit in player_hits {
            let player = game.player_mut(hit.player);
            player.hp = player.hp.saturating_sub(hit.damage);
        }

        let mut destroyed = SmallVec::new();
        for pos in BoardPos::all() {
            let slot = &mut game.player_mut(pos.player).board[pos.slot];
            if slot.is_some_and(|unit| unit.is_dead()) {
                *slot = None;
                destroyed.push(pos);
            }
        }

        log::debug!(
            "game {}: combat for {}: {} lane(s), {} destroyed, hp {} / {}",
            game.id,
            self.attacker,
            self.lanes.len(),
            destroyed.len(),
            game.player(PlayerId::FIRST).hp,
            game.player(PlayerId::SECOND).hp,
        );

        destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardConfig, CardId};
    use crate::core::{AccountId, PlayerState};

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register(CardConfig::unit(CardId::new(1), "One", 1, 1, 3));
        catalog.register(CardConfig::unit(CardId::new(2), "Two", 2, 2, 2));
        catalog.register(CardConfig::unit(CardId::new(3), "Three", 3, 3, 4));
        catalog
    }

    fn empty_game() -> Game {
        Game {
            id: 1,
            players: crate::core::PlayerMap::new(|_| PlayerState::new(AccountId::default(), 10, 1, 1, Vec::new())),
            active_idx: PlayerId::FIRST,
            turn: 1,
            status: crate::core::GameStatus::InProgress,
            result: None,
        }
    }

    fn place(game: &mut Game, player: PlayerId, slot: usize, card: u32, hp: i32) {
        game.player_mut(player).board[slot] = Some(UnitInstance::new(CardId::new(card), hp));
    }

    #[test]
    fn test_plan_direct_and_duel() {
        let mut game = empty_game();
        place(&mut game, PlayerId::FIRST, 0, 3, 4);
        place(&mut game, PlayerId::FIRST, 2, 2, 2);
        place(&mut game, PlayerId::SECOND, 2, 1, 3);
        place(&mut game, PlayerId::SECOND, 3, 3, 4);

        let plan = plan_combat(&game, &catalog()).unwrap();

        assert_eq!(plan.attacker, PlayerId::FIRST);
        assert_eq!(
            plan.lanes.as_slice(),
            &[
                LaneClash::Direct { slot: 0, attack: 3 },
                LaneClash::Duel { slot: 2, attack: 2, counter: 1 },
            ]
        );
        assert_eq!(plan.damage_to_player(PlayerId::SECOND), 3);
        assert_eq!(plan.damage_to(BoardPos::new(PlayerId::FIRST, 2)), 1);
        assert_eq!(plan.damage_to(BoardPos::new(PlayerId::SECOND, 2)), 2);
        // Defending units without an attacker opposite take nothing.
        assert_eq!(plan.damage_to(BoardPos::new(PlayerId::SECOND, 3)), 0);
    }

    #[test]
    fn test_apply_removes_dead_units() {
        let mut game = empty_game();
        place(&mut game, PlayerId::FIRST, 1, 2, 2);
        place(&mut game, PlayerId::SECOND, 1, 2, 2);

        let plan = plan_combat(&game, &catalog()).unwrap();
        let destroyed = plan.apply(&mut game);

        assert_eq!(
            destroyed.as_slice(),
            &[BoardPos::new(PlayerId::FIRST, 1), BoardPos::new(PlayerId::SECOND, 1)]
        );
        assert!(game.player(PlayerId::FIRST).board[1].is_none());
        assert!(game.player(PlayerId::SECOND).board[1].is_none());
        assert_eq!(game.player(PlayerId::SECOND).hp, 10);
    }

    #[test]
    fn test_second_player_attacks_on_their_turn() {
        let mut game = empty_game();
        game.active_idx = PlayerId::SECOND;
        place(&mut game, PlayerId::FIRST, 0, 3, 4);
        place(&mut game, PlayerId::SECOND, 3, 2, 2);

        let plan = plan_combat(&game, &catalog()).unwrap();
        plan.apply(&mut game);

        assert_eq!(game.player(PlayerId::FIRST).hp, 8);
        assert_eq!(game.player(PlayerId::SECOND).hp, 10);
        // Idle defenders do not strike back across lanes.
        assert_eq!(game.player(PlayerId::FIRST).unit_at(0).unwrap().current_hp, 4);
    }

    #[test]
    fn test_unknown_card_is_reported() {
        let mut game = empty_game();
        place(&mut game, PlayerId::FIRST, 0, 42, 1);

        assert_eq!(
            plan_combat(&game, &catalog()),
            Err(ErrorKind::UnknownCard(CardId::new(42)))
        );
    }

    #[test]
    fn test_reversed_lane_order_same_outcome() {
        let mut game = empty_game();
        place(&mut game, PlayerId::FIRST, 0, 3, 4);
        place(&mut game, PlayerId::FIRST, 1, 1, 3);
        place(&mut game, PlayerId::SECOND, 1, 3, 4);

        let mut forward = game.clone();
        let mut backward = game.clone();
        plan_combat(&game, &catalog()).unwrap().apply(&mut forward);
        plan_combat_in_order(&game, &catalog(), (0..BOARD_SLOTS).rev())
            .unwrap()
            .apply(&mut backward);

        assert_eq!(forward, backward);
    }
}

//! Match snapshot.
//!
//! `Game` is a plain value: the engine clones it before mutating, so the
//! caller's copy is never touched. Deck and hand vectors are persistent
//! (`im`), which keeps those clones cheap when the UI predicts several
//! diverging futures from the same authoritative snapshot.

use serde::{Deserialize, Serialize};

use super::config::{RulesConfig, BOARD_SLOTS};
use super::player::{AccountId, PlayerId, PlayerMap, PlayerState};
use crate::cards::{CardId, UnitInstance};

/// Match identifier assigned by the ledger.
pub type GameId = u32;

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    WaitingForPlayers,
    InProgress,
    Finished,
}

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players fell in the same combat phase.
    Draw,
}

impl MatchResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, MatchResult::Winner(p) if *p == player)
    }

    /// The winning player, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchResult::Winner(p) => Some(*p),
            MatchResult::Draw => None,
        }
    }
}

/// A board coordinate: which player's board, which lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardPos {
    pub player: PlayerId,
    pub slot: usize,
}

impl BoardPos {
    #[must_use]
    pub const fn new(player: PlayerId, slot: usize) -> Self {
        Self { player, slot }
    }

    /// Every board position, player 0 first, slots in lane order.
    pub fn all() -> impl Iterator<Item = BoardPos> {
        PlayerId::both().flat_map(|player| (0..BOARD_SLOTS).map(move |slot| BoardPos::new(player, slot)))
    }
}

impl std::fmt::Display for BoardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, slot {})", self.player, self.slot)
    }
}

/// Canonical snapshot of a two-player match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Ledger-assigned identifier.
    pub id: GameId,

    /// Both players, indexed by seat.
    pub players: PlayerMap<PlayerState>,

    /// Whose turn it is.
    pub active_idx: PlayerId,

    /// Turn counter (starts at 1).
    pub turn: u32,

    pub status: GameStatus,

    /// Set when `status` becomes `Finished`.
    pub result: Option<MatchResult>,
}

impl Game {
    /// Create a match between two accounts, both using the same deck.
    ///
    /// Player 0 moves first with one energy; player 1 starts with none.
    /// Each player draws the opening hand using `draw_seed`.
    ///
    /// ```
    /// use lane_duel::cards::CardId;
    /// use lane_duel::core::{AccountId, Game, GameStatus, PlayerId, RulesConfig};
    ///
    /// let deck: Vec<CardId> = [1, 2, 3, 1, 2, 3, 1, 2, 3, 1].map(CardId::new).to_vec();
    /// let game = Game::new_match(1, [AccountId([1; 20]), AccountId([2; 20])], &deck, &RulesConfig::default(), 0);
    ///
    /// assert_eq!(game.status, GameStatus::InProgress);
    /// assert_eq!(game.player(PlayerId::FIRST).hand.len(), 3);
    /// assert_eq!(game.player(PlayerId::SECOND).deck.len(), 7);
    /// ```
    #[must_use]
    pub fn new_match(
        id: GameId,
        accounts: [AccountId; 2],
        deck: &[CardId],
        config: &RulesConfig,
        draw_seed: u64,
    ) -> Self {
        let players = PlayerMap::new(|player| {
            let energy = if player == PlayerId::FIRST {
                config.starting_max_energy
            } else {
                0
            };
            PlayerState::new(
                accounts[player.index()],
                config.starting_hp,
                energy,
                config.starting_max_energy,
                deck.iter().copied(),
            )
        });

        let mut game = Self {
            id,
            players,
            active_idx: PlayerId::FIRST,
            turn: 1,
            status: GameStatus::InProgress,
            result: None,
        };

        for (_, player) in game.players.iter_mut() {
            for _ in 0..config.starting_hand {
                player.draw(draw_seed, game.turn, config.hand_limit);
            }
        }

        game
    }

    /// Get a player's state.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// Get a mutable reference to a player's state.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> &PlayerState {
        &self.players[self.active_idx]
    }

    /// The player waiting for their turn.
    #[must_use]
    pub fn opponent(&self) -> &PlayerState {
        &self.players[self.active_idx.opponent()]
    }

    /// Get the unit at a board position.
    #[must_use]
    pub fn unit_at(&self, pos: BoardPos) -> Option<&UnitInstance> {
        self.players[pos.player].unit_at(pos.slot)
    }

    /// Get a mutable reference to the unit at a board position.
    pub fn unit_at_mut(&mut self, pos: BoardPos) -> Option<&mut UnitInstance> {
        self.players[pos.player].unit_at_mut(pos.slot)
    }

    /// Check if the match is over.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// End the match with the given result.
    pub fn finish(&mut self, result: MatchResult) {
        self.status = GameStatus::Finished;
        self.result = Some(result);
    }

    /// The result implied by current hit points, if anyone is at 0 or below.
    ///
    /// Both players down at once is a draw.
    #[must_use]
    pub fn lethal_result(&self) -> Option<MatchResult> {
        let down = |p: PlayerId| self.players[p].hp <= 0;
        match (down(PlayerId::FIRST), down(PlayerId::SECOND)) {
            (true, true) => Some(MatchResult::Draw),
            (true, false) => Some(MatchResult::Winner(PlayerId::SECOND)),
            (false, true) => Some(MatchResult::Winner(PlayerId::FIRST)),
            (false, false) => None,
        }
    }
}

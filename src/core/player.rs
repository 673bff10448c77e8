//! Player identification and per-player match state.
//!
//! ## PlayerId
//!
//! Type-safe seat index for the two players of a match.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `PlayerId`.
//!
//! ## PlayerState
//!
//! Hit points, energy, deck, hand and the four-slot board of one player.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::BOARD_SLOTS;
use crate::cards::{CardId, UnitInstance};

/// Seat index of a player: `PlayerId(0)` or `PlayerId(1)`.
///
/// Deserialization rejects any other index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who takes the first turn of a match.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID.
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "A match has exactly 2 players");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player at the table.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self.0 {
            0 => PlayerId::SECOND,
            _ => PlayerId::FIRST,
        }
    }

    /// Both players in seat order.
    ///
    /// ```
    /// use lane_duel::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(seats, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [PlayerId::FIRST, PlayerId::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidPlayerId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if id < 2 {
            Ok(Self(id))
        } else {
            Err(InvalidPlayerId(id))
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

/// A seat index outside the two seats of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidPlayerId(pub u8);

impl std::fmt::Display for InvalidPlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid player index {}, a match has exactly 2 players", self.0)
    }
}

impl std::error::Error for InvalidPlayerId {}

/// Per-player data for both seats, indexable by `PlayerId`.
///
/// ## Example
///
/// ```
/// use lane_duel::core::{PlayerId, PlayerMap};
///
/// let mut hp: PlayerMap<i32> = PlayerMap::new(|_| 20);
/// hp[PlayerId::SECOND] -= 3;
///
/// assert_eq!(hp[PlayerId::FIRST], 20);
/// assert_eq!(hp[PlayerId::SECOND], 17);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a map from values in seat order.
    pub fn from_array(data: [T; 2]) -> Self {
        Self { data }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Ledger account that owns a seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// The four board slots of one player. Slot index is the combat lane.
pub type Board = [Option<UnitInstance>; BOARD_SLOTS];

/// One player's side of the match.
///
/// Deck and hand use `im` vectors so that speculative copies of a `Game`
/// share structure with the authoritative snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Owning account.
    pub addr: AccountId,

    /// Hit points. The player loses when this reaches 0 or below.
    pub hp: i32,

    /// Energy available this turn.
    pub energy: u32,

    /// Energy restored at the start of this player's turn.
    pub max_energy: u32,

    /// Remaining deck. Draw order depends on position.
    pub deck: Vector<CardId>,

    /// Cards in hand, in the order they were drawn.
    pub hand: Vector<CardId>,

    /// Units on the board, one per lane.
    pub board: Board,
}

impl PlayerState {
    /// Create a player with an empty hand and board.
    #[must_use]
    pub fn new(
        addr: AccountId,
        hp: i32,
        energy: u32,
        max_energy: u32,
        deck: impl IntoIterator<Item = CardId>,
    ) -> Self {
        Self {
            addr,
            hp,
            energy,
            max_energy,
            deck: deck.into_iter().collect(),
            hand: Vector::new(),
            board: Board::default(),
        }
    }

    /// Get the unit in a slot, if any. Out-of-range slots are empty.
    #[must_use]
    pub fn unit_at(&self, slot: usize) -> Option<&UnitInstance> {
        self.board.get(slot)?.as_ref()
    }

    /// Get a mutable reference to the unit in a slot, if any.
    pub fn unit_at_mut(&mut self, slot: usize) -> Option<&mut UnitInstance> {
        self.board.get_mut(slot)?.as_mut()
    }

    /// Iterate over occupied slots as (slot, unit) pairs in lane order.
    pub fn units(&self) -> impl Iterator<Item = (usize, &UnitInstance)> {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(slot, unit)| unit.as_ref().map(|u| (slot, u)))
    }

    /// Draw one card into the hand.
    ///
    /// The drawn position is `(seed + turn) % deck.len()`, the same rule the
    /// ledger applies with its block number as seed. Nothing is drawn when
    /// the deck is empty or the hand already holds `hand_limit` cards.
    pub fn draw(&mut self, seed: u64, turn: u32, hand_limit: usize) -> Option<CardId> {
        if self.deck.is_empty() || self.hand.len() >= hand_limit {
            return None;
        }

        let index = seed.wrapping_add(u64::from(turn)) % self.deck.len() as u64;
        let card_id = self.deck.remove(index as usize);
        self.hand.push_back(card_id);
        Some(card_id)
    }
}

//! Match rules configuration.
//!
//! The board size is fixed at compile time because boards are arrays.
//! Everything else a match is tuned by lives in `RulesConfig`, which is
//! injected into the engine rather than read from a global.

use serde::{Deserialize, Serialize};

/// Number of lanes on each player's board.
pub const BOARD_SLOTS: usize = 4;

/// Tunable rules for a match.
///
/// ## Example
///
/// ```
/// use lane_duel::core::RulesConfig;
///
/// let config = RulesConfig::default()
///     .with_starting_hp(30)
///     .with_hand_limit(7);
///
/// assert_eq!(config.starting_hp, 30);
/// assert_eq!(config.hand_limit, 7);
/// assert_eq!(config.energy_cap, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Hit points each player starts with.
    pub starting_hp: i32,

    /// Cards drawn by each player when the match is created.
    pub starting_hand: usize,

    /// A draw is skipped while the hand holds this many cards.
    pub hand_limit: usize,

    /// Maximum energy both players start with.
    pub starting_max_energy: u32,

    /// Maximum energy never grows past this value.
    pub energy_cap: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_hp: 20,
            starting_hand: 3,
            hand_limit: 10,
            starting_max_energy: 1,
            energy_cap: 10,
        }
    }
}

impl RulesConfig {
    /// Set starting hit points.
    #[must_use]
    pub fn with_starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = cards;
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Set the energy cap.
    #[must_use]
    pub fn with_energy_cap(mut self, cap: u32) -> Self {
        self.energy_cap = cap;
        self
    }
}

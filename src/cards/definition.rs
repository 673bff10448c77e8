//! Card definitions - static card data.
//!
//! `CardConfig` holds the immutable stats of a card: cost, attack, health,
//! and its effect tag. Instance-specific data (current hit points) lives in
//! `UnitInstance`.

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog entry, unique across the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Whether a card is summoned to the board or cast from hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    #[default]
    Unit,
    Spell,
}

/// Which lanes a unit threatens. Display data; combat is lane-for-lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttackDirection {
    #[default]
    Forward,
    LeftRight,
}

/// Special-effect tag carried by a card.
///
/// Spells resolve `DamageFront` and `HealSelf`. On units every tag is
/// descriptive only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTag {
    Taunt,
    Charge,
    /// Restore hit points to one of the caster's units.
    HealSelf,
    /// Damage the opposing unit in the targeted lane.
    DamageFront,
}

/// Catalog entry for one card.
///
/// ## Example
///
/// ```
/// use lane_duel::cards::{CardConfig, CardId, EffectTag};
///
/// let bolt = CardConfig::spell(CardId::new(20), "Bolt", 1, 3, EffectTag::DamageFront);
/// assert!(bolt.is_spell());
/// assert_eq!(bolt.attack, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    pub id: CardId,

    /// Display name.
    pub name: String,

    pub kind: CardKind,

    /// Energy spent to play the card.
    pub cost: u32,

    /// Damage dealt in combat, or the strength of a spell's effect.
    pub attack: i32,

    /// Hit points a unit is summoned with.
    pub health: i32,

    pub direction: AttackDirection,

    pub effect: Option<EffectTag>,

    /// Rules text shown to players.
    pub description: Option<String>,
}

impl CardConfig {
    /// Create a unit card.
    #[must_use]
    pub fn unit(id: CardId, name: impl Into<String>, cost: u32, attack: i32, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Unit,
            cost,
            attack,
            health,
            direction: AttackDirection::Forward,
            effect: None,
            description: None,
        }
    }

    /// Create a spell card whose effect has strength `power`.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: u32, power: i32, effect: EffectTag) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Spell,
            cost,
            attack: power,
            health: 0,
            direction: AttackDirection::Forward,
            effect: Some(effect),
            description: None,
        }
    }

    /// Set the attack direction (builder pattern).
    #[must_use]
    pub fn with_direction(mut self, direction: AttackDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the effect tag.
    #[must_use]
    pub fn with_effect(mut self, effect: EffectTag) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Set the rules text.
    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.kind == CardKind::Unit
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }
}

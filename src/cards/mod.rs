//! Card system: catalog entries, board units, and the catalog itself.
//!
//! ## Key Types
//!
//! - `CardId`: Stable identifier of a catalog entry
//! - `CardConfig`: Static card stats (cost, attack, health, effect tag)
//! - `UnitInstance`: A summoned unit with its current hit points
//! - `CardCatalog`: Read-only lookup injected into the rules

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{AttackDirection, CardConfig, CardId, CardKind, EffectTag};
pub use instance::UnitInstance;
pub use registry::CardCatalog;

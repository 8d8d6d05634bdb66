//! Card catalogue and loadout selection for the Outlaw card battler.
//!
//! The catalogue is the static card set players collect. This crate reads it,
//! decides which cards a player may field, and turns catalogue entries into the
//! [`outlaw_battle::Card`] values a battle starts from.
//!
//! ```text
//! cards.json ──> Catalogue ──> available_cards(owned) ──> select_loadout(param)
//!                                                              │
//!                                                              ▼
//!                                                   outlaw_battle::Battle::new
//! ```

use thiserror::Error;

pub mod catalogue;
pub mod loadout;

pub use catalogue::{AbilityDefinition, CardDefinition, CardStats, Catalogue, Rarity};
pub use loadout::{OwnedIds, available_cards, battle_cards, select_loadout};

#[derive(Error, Debug)]
pub enum TeamError {
    #[error("Invalid card catalogue: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate card id: {0}")]
    DuplicateCard(String),
}

//! Turn-based battle engine and domain types for the Outlaw card battler.
//!
//! This crate owns everything that happens between "three cards enter" and
//! "one side is eliminated". It performs no I/O and never sleeps; hosts feed it
//! commands and render the state and reports it hands back.
//!
//! # Overview
//!
//! `outlaw-battle` sits between `outlaw-protocol` (command vocabulary) and the
//! hosts that drive a battle:
//!
//! ```text
//! outlaw-protocol (commands, unit ids)
//!        │
//!        ▼
//! outlaw-battle (roster, resolver, scheduler) ← THIS CRATE
//!        │
//!        ├─> outlaw-team (catalogue cards → battle cards)
//!        └─> outlaw-client (paced async sessions)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Card`] - Read-only card input (class, attack, hp, abilities)
//! - [`BattleUnit`] - A card's mutable battle-time instance
//! - [`SideState`] - One team's units in slot order
//! - [`BattleState`] - Both sides, phase, turn, winner and the bounded log
//!
//! ## Engine
//! - [`Battle`] - Main entry point: resolves player attacks and steps enemy actions
//! - [`AbilityTable`] - Class to ability strategy mapping
//! - [`BattleConfig`] - Rules and enemy template, passed in rather than global
//!
//! # Example Usage
//!
//! ```ignore
//! use outlaw_battle::{Battle, BattleConfig, UnitId, rng::seeded};
//!
//! let mut battle = Battle::new(&cards, BattleConfig::default())?;
//! let mut rng = seeded(7);
//!
//! let report = battle.resolve_player_attack(&UnitId::player(1), &UnitId::enemy(2), &mut rng)?;
//! println!("{}", report.log.join("\n"));
//!
//! // Once every living unit acted, let the enemies answer one step at a time
//! while let Some(step) = battle.step_enemy(&mut rng) {
//!     println!("{} hit {} for {}", step.actor, step.target, step.damage);
//! }
//! ```

pub mod abilities;
pub mod config;
pub mod engine;
pub mod error;
pub mod log;
pub mod rng;
pub mod roster;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types at crate root for convenience
pub use abilities::{AbilityContext, AbilityFn, AbilityOutcome, AbilityTable};
pub use config::{BattleConfig, BattleRules, EnemyTemplate, Jitter, ROSTER_SIZE};
pub use engine::Battle;
pub use error::{BattleError, InvalidAction};
pub use log::{BattleLog, STARTER_LINES};
pub use rng::BattleRng;
pub use roster::{Roster, build_enemy_units, build_player_units};
pub use types::{
    Ability, ActionKind, ActionReport, BattleState, BattleUnit, Card, Phase, SideState, UnitClass,
};

// Re-export commonly used protocol types
pub use outlaw_protocol::{BattleCommand, Side, UnitId};

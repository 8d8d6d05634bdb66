//! Domain types for battle resolution

mod action;
mod card;
mod phase;
mod side;
mod state;
mod unit;

pub use action::{ActionKind, ActionReport};
pub use card::{Ability, Card, UnitClass};
pub use phase::Phase;
pub use side::{SideState, lowest_hp_living};
pub use state::BattleState;
pub use unit::BattleUnit;

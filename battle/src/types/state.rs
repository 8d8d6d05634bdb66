//! BattleState - the renderable snapshot of a battle

use outlaw_protocol::Side;

use super::phase::Phase;
use super::side::SideState;
use super::unit::BattleUnit;
use crate::log::BattleLog;

/// Complete state of one battle
///
/// Owned by [`crate::Battle`]; hosts read it (or a clone) for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub players: SideState,
    pub enemies: SideState,
    pub phase: Phase,

    /// Current turn number, starting at 1, incremented after each enemy phase
    pub turn: u32,

    /// Set only when the phase becomes [`Phase::Finished`]
    pub winner: Option<Side>,

    pub log: BattleLog,
}

impl BattleState {
    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Iterate over every unit on both sides
    pub fn all_units(&self) -> impl Iterator<Item = &BattleUnit> {
        self.players.units.iter().chain(self.enemies.units.iter())
    }
}

//! Side (team) state

use outlaw_protocol::{Side, UnitId};

use super::unit::BattleUnit;

/// One team's units, in slot order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    /// Which team this is
    pub side: Side,

    /// Units in slot order (slot N lives at index N - 1)
    pub units: Vec<BattleUnit>,
}

impl SideState {
    /// Create a new side from prepared units
    pub fn new(side: Side, units: Vec<BattleUnit>) -> Self {
        Self { side, units }
    }

    /// Index of a unit on this side, if the id belongs here
    pub fn position(&self, id: &UnitId) -> Option<usize> {
        if id.side != self.side {
            return None;
        }
        let idx = id.index();
        (self.units.get(idx)?.id == *id).then_some(idx)
    }

    /// Iterate over units that can still fight
    pub fn living(&self) -> impl Iterator<Item = &BattleUnit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    /// Indices of units that can still fight
    pub fn living_indices(&self) -> Vec<usize> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.is_alive())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Count living units
    pub fn alive_count(&self) -> usize {
        self.living().count()
    }

    /// Count defeated units
    pub fn defeated_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_defeated()).count()
    }

    /// Check if every unit is defeated
    pub fn all_defeated(&self) -> bool {
        self.units.iter().all(|u| u.is_defeated())
    }

    /// Check if every living unit has acted this turn
    pub fn all_living_acted(&self) -> bool {
        self.living().all(|u| u.acted)
    }

}

/// Index of the living unit with the lowest current HP (first in slot order on ties)
pub fn lowest_hp_living(units: &[BattleUnit]) -> Option<usize> {
    units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_alive())
        .min_by_key(|(_, u)| u.hp)
        .map(|(idx, _)| idx)
}

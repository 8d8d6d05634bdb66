//! Battle phase and outcome types

use std::fmt;

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    /// Player units pick attackers and targets
    #[default]
    Player,
    /// Enemy units counterattack automatically
    Enemy,
    /// One side has been eliminated (terminal until reset)
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Player => "player",
            Phase::Enemy => "enemy",
            Phase::Finished => "finished",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

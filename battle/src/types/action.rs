//! Resolved action descriptions

use std::fmt;

use outlaw_protocol::UnitId;

use super::card::UnitClass;
use super::phase::Phase;

/// Presentation label for a resolved action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ActionKind {
    QuickSlash,
    HeavySwing,
    MarkedShot,
    HealPulse,
    BuffAura,
    VulnerableMark,
    ShieldBash,
    CriticalBurst,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::QuickSlash => "Quick Slash",
            ActionKind::HeavySwing => "Heavy Swing",
            ActionKind::MarkedShot => "Marked Shot",
            ActionKind::HealPulse => "Heal Pulse",
            ActionKind::BuffAura => "Buff Aura",
            ActionKind::VulnerableMark => "Vulnerable Mark",
            ActionKind::ShieldBash => "Shield Bash",
            ActionKind::CriticalBurst => "Critical Burst",
        }
    }

    /// Default label for a player unit of the given class
    pub fn for_player(class: &UnitClass) -> Self {
        match class {
            UnitClass::Healer => ActionKind::HealPulse,
            UnitClass::Support => ActionKind::BuffAura,
            UnitClass::Debuffer => ActionKind::VulnerableMark,
            UnitClass::Tank => ActionKind::ShieldBash,
            _ => ActionKind::QuickSlash,
        }
    }

    /// Label for an enemy counterattack of the given class
    pub fn for_enemy(class: &UnitClass) -> Self {
        match class {
            UnitClass::Tank => ActionKind::HeavySwing,
            UnitClass::Debuffer => ActionKind::MarkedShot,
            _ => ActionKind::QuickSlash,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a presentation layer needs to animate one resolved action
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ActionReport {
    pub actor: UnitId,
    pub target: UnitId,
    pub kind: ActionKind,

    /// Damage dealt to the target (0 for actions that do not attack)
    pub damage: u32,

    /// Target HP after the action
    pub target_hp: u32,

    pub target_defeated: bool,

    /// Log lines appended by this action, in order
    pub log: Vec<String>,

    /// Phase entered as a consequence of this action, if any
    pub transition: Option<Phase>,
}

impl ActionReport {
    /// Whether this action ended the battle
    pub fn ends_battle(&self) -> bool {
        self.transition == Some(Phase::Finished)
    }
}

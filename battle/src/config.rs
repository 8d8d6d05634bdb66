//! Tunable battle rules and the enemy roster template

use crate::types::Card;

/// Number of cards a player brings into battle
pub const ROSTER_SIZE: usize = 3;

/// Inclusive range of random damage jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Jitter {
    pub min: i32,
    pub max: i32,
}

impl Jitter {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Numeric rules for damage, abilities, and logging
///
/// Multipliers are integer percentages; scaled values round half up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BattleRules {
    // === Player attacks ===
    pub player_damage_floor: u32,
    pub player_jitter: Jitter,

    // === Enemy attacks ===
    pub enemy_damage_floor: u32,
    pub enemy_jitter: Jitter,

    // === Vulnerability ===
    /// Damage multiplier against a vulnerable target
    pub vulnerable_bonus_pct: u32,
    /// Stacks applied by a Debuffer's mark
    pub vulnerable_mark_turns: u32,

    // === Class abilities ===
    pub heal_amount: u32,
    pub support_bonus_step: u32,
    pub support_bonus_cap: u32,
    /// Bonus attack lost by each living player unit after every enemy phase
    pub bonus_decay: u32,
    pub tank_damage_pct: u32,
    pub tank_self_heal: u32,
    pub crit_damage_pct: u32,
    /// Crit fires when (turn + attacker slot + target index) is divisible by this
    pub crit_modulus: u32,

    /// Lines kept in the battle log
    pub log_retention: usize,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            player_damage_floor: 20,
            player_jitter: Jitter::new(-8, 12),
            enemy_damage_floor: 16,
            enemy_jitter: Jitter::new(-6, 10),
            vulnerable_bonus_pct: 120,
            vulnerable_mark_turns: 2,
            heal_amount: 55,
            support_bonus_step: 10,
            support_bonus_cap: 30,
            bonus_decay: 5,
            tank_damage_pct: 80,
            tank_self_heal: 28,
            crit_damage_pct: 170,
            crit_modulus: 3,
            log_retention: 16,
        }
    }
}

impl BattleRules {
    /// Roll damage: `max(floor, attack + jitter)`
    pub fn floored(attack: u32, jitter: i32, floor: u32) -> u32 {
        let raw = i64::from(attack) + i64::from(jitter);
        raw.clamp(i64::from(floor), i64::from(u32::MAX)) as u32
    }

    /// Scale a value by an integer percentage, rounding half up
    pub fn scale_pct(value: u32, pct: u32) -> u32 {
        let scaled = (u64::from(value) * u64::from(pct) + 50) / 100;
        scaled.min(u64::from(u32::MAX)) as u32
    }
}

/// The fixed enemy roster, instantiated fresh for every battle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub cards: Vec<Card>,
}

impl EnemyTemplate {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// The bandit gang: a scout, a bruiser, and a sniper
    pub fn bandits() -> Self {
        Self::new(vec![
            Card::new("enemy-1", "Bandit Scout", "DPS", 58, 260)
                .with_ability("Quick Slash", "A fast strike for steady damage."),
            Card::new("enemy-2", "Bandit Bruiser", "Tank", 50, 320)
                .with_ability("Heavy Swing", "A slower, stronger hit."),
            Card::new("enemy-3", "Bandit Sniper", "Debuffer", 62, 240)
                .with_ability("Marked Shot", "A shot that leaves openings."),
        ])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self::bandits()
    }
}

/// Everything configurable about a battle apart from the player's loadout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub rules: BattleRules,
    pub enemies: EnemyTemplate,
}

//! Battle unit state

use outlaw_protocol::UnitId;

use super::card::{Ability, Card, UnitClass};

/// A card's battle-time instance (changes as the battle progresses)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleUnit {
    /// Identifier unique within the battle ("player-1", "enemy-2", ...)
    pub id: UnitId,

    /// Card this unit was built from (display/lookup only)
    pub card_id: String,

    pub name: String,

    pub class: UnitClass,

    // === HP ===
    /// Current HP, always within [0, max_hp]
    pub hp: u32,

    /// Maximum HP, fixed at creation
    pub max_hp: u32,

    // === Offense ===
    pub attack: u32,

    /// Transient attack bonus from Support abilities
    pub bonus_attack: u32,

    // === Status ===
    /// Remaining hits on which this unit takes amplified damage
    pub vulnerable_turns: u32,

    /// Whether this unit already acted in the current player phase
    pub acted: bool,

    pub abilities: Vec<Ability>,
}

impl BattleUnit {
    /// Create a fresh unit from a card
    pub fn from_card(id: UnitId, card: &Card) -> Self {
        Self {
            id,
            card_id: card.id.clone(),
            name: card.name.clone(),
            class: card.class.clone(),
            hp: card.hp,
            max_hp: card.hp,
            attack: card.attack,
            bonus_attack: 0,
            vulnerable_turns: 0,
            acted: false,
            abilities: card.abilities.clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn is_vulnerable(&self) -> bool {
        self.vulnerable_turns > 0
    }

    /// Attack including the transient bonus
    pub fn effective_attack(&self) -> u32 {
        self.attack.saturating_add(self.bonus_attack)
    }

    /// Subtract HP, stopping at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restore HP, stopping at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    /// Raise the attack bonus, never past `cap`
    pub fn add_bonus_attack(&mut self, step: u32, cap: u32) {
        self.bonus_attack = self.bonus_attack.saturating_add(step).min(cap);
    }

    /// Consume one stack of vulnerability (called whenever the unit is hit)
    pub fn consume_vulnerability(&mut self) {
        self.vulnerable_turns = self.vulnerable_turns.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gunslinger() -> BattleUnit {
        let card = Card::new("1", "Billy the Kid", "DPS", 64, 300)
            .with_ability("Quick Draw", "Fires first.");
        BattleUnit::from_card(UnitId::player(1), &card)
    }

    #[test]
    fn test_from_card() {
        let unit = gunslinger();
        assert_eq!(unit.id.to_string(), "player-1");
        assert_eq!(unit.card_id, "1");
        assert_eq!(unit.hp, 300);
        assert_eq!(unit.max_hp, 300);
        assert_eq!(unit.bonus_attack, 0);
        assert_eq!(unit.vulnerable_turns, 0);
        assert!(!unit.acted);
        assert_eq!(unit.abilities.len(), 1);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut unit = gunslinger();
        assert_eq!(unit.take_damage(120), 120);
        assert_eq!(unit.hp, 180);

        assert_eq!(unit.take_damage(500), 180);
        assert_eq!(unit.hp, 0);
        assert!(unit.is_defeated());
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut unit = gunslinger();
        unit.hp = 50;
        assert_eq!(unit.heal(55), 55);
        assert_eq!(unit.hp, 105);

        unit.hp = 290;
        assert_eq!(unit.heal(55), 10);
        assert_eq!(unit.hp, 300);
    }

    #[test]
    fn test_bonus_attack_cap() {
        let mut unit = gunslinger();
        unit.add_bonus_attack(10, 30);
        unit.add_bonus_attack(10, 30);
        unit.add_bonus_attack(10, 30);
        unit.add_bonus_attack(10, 30);
        assert_eq!(unit.bonus_attack, 30);
        assert_eq!(unit.effective_attack(), 94);
    }

    #[test]
    fn test_consume_vulnerability_floor() {
        let mut unit = gunslinger();
        unit.vulnerable_turns = 1;
        unit.consume_vulnerability();
        assert_eq!(unit.vulnerable_turns, 0);
        unit.consume_vulnerability();
        assert_eq!(unit.vulnerable_turns, 0);
    }

    #[test]
    fn test_effective_attack_saturates() {
        let mut unit = gunslinger();
        unit.attack = u32::MAX;
        unit.add_bonus_attack(10, 30);
        assert_eq!(unit.effective_attack(), u32::MAX);
    }
}

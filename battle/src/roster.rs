//! Roster building: cards in, fresh battle units out

use outlaw_protocol::{Side, UnitId};

use crate::config::{EnemyTemplate, ROSTER_SIZE};
use crate::error::BattleError;
use crate::types::{BattleUnit, Card, SideState};

/// A validated player loadout of exactly [`ROSTER_SIZE`] cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    cards: [Card; ROSTER_SIZE],
}

impl Roster {
    /// Take the first [`ROSTER_SIZE`] cards, refusing shorter loadouts
    pub fn new(cards: &[Card]) -> Result<Self, BattleError> {
        if cards.len() < ROSTER_SIZE {
            return Err(BattleError::InsufficientRoster {
                have: cards.len(),
                need: ROSTER_SIZE,
            });
        }

        let cards: [Card; ROSTER_SIZE] = cards[..ROSTER_SIZE]
            .to_vec()
            .try_into()
            .map_err(|rest: Vec<Card>| BattleError::InsufficientRoster {
                have: rest.len(),
                need: ROSTER_SIZE,
            })?;

        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Fresh player units, one per card, in loadout order
    pub fn player_units(&self) -> Vec<BattleUnit> {
        instantiate(Side::Player, &self.cards)
    }

    pub fn player_side(&self) -> SideState {
        SideState::new(Side::Player, self.player_units())
    }
}

/// Build player units from a loadout
pub fn build_player_units(cards: &[Card]) -> Result<Vec<BattleUnit>, BattleError> {
    Roster::new(cards).map(|roster| roster.player_units())
}

/// Instantiate the enemy template as fresh units
pub fn build_enemy_units(template: &EnemyTemplate) -> Vec<BattleUnit> {
    instantiate(Side::Enemy, &template.cards)
}

pub fn build_enemy_side(template: &EnemyTemplate) -> SideState {
    SideState::new(Side::Enemy, build_enemy_units(template))
}

fn instantiate(side: Side, cards: &[Card]) -> Vec<BattleUnit> {
    cards
        .iter()
        .enumerate()
        .map(|(idx, card)| BattleUnit::from_card(UnitId::new(side, idx + 1), card))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loadout(count: usize) -> Vec<Card> {
        (1..=count)
            .map(|n| Card::new(n.to_string(), format!("Outlaw {}", n), "DPS", 60, 360))
            .collect()
    }

    #[test]
    fn test_build_player_units() {
        let units = build_player_units(&loadout(3)).unwrap();

        assert_eq!(units.len(), 3);
        assert_eq!(units[0].id.to_string(), "player-1");
        assert_eq!(units[2].id.to_string(), "player-3");
        assert_eq!(units[1].card_id, "2");
        for unit in &units {
            assert_eq!(unit.hp, 360);
            assert_eq!(unit.max_hp, 360);
            assert_eq!(unit.attack, 60);
            assert_eq!(unit.bonus_attack, 0);
            assert_eq!(unit.vulnerable_turns, 0);
            assert!(!unit.acted);
        }
    }

    #[test]
    fn test_extra_cards_are_ignored() {
        let units = build_player_units(&loadout(5)).unwrap();
        assert_eq!(units.len(), 3);
        assert_eq!(units[2].card_id, "3");
    }

    #[test]
    fn test_insufficient_roster() {
        assert_eq!(
            build_player_units(&loadout(2)),
            Err(BattleError::InsufficientRoster { have: 2, need: 3 })
        );
        assert_eq!(
            Roster::new(&[]).unwrap_err(),
            BattleError::InsufficientRoster { have: 0, need: 3 }
        );
    }

    #[test]
    fn test_enemy_units_are_fresh_copies() {
        let template = EnemyTemplate::bandits();
        let mut first = build_enemy_units(&template);
        first[0].hp = 0;
        first[1].vulnerable_turns = 2;

        let second = build_enemy_units(&template);
        assert_eq!(second[0].hp, 260);
        assert_eq!(second[1].vulnerable_turns, 0);
        assert_eq!(second[2].id.to_string(), "enemy-3");
        assert_eq!(second[2].name, "Bandit Sniper");
    }
}

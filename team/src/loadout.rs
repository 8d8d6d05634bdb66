//! Loadout selection

use std::collections::{BTreeSet, HashSet};

use outlaw_battle::{Card, ROSTER_SIZE};

use crate::catalogue::{CardDefinition, Catalogue};

/// Cards a player may field: unlocked or owned, in catalogue order
pub fn available_cards<'a, S>(catalogue: &'a Catalogue, owned: &S) -> Vec<&'a CardDefinition>
where
    S: OwnedIds + ?Sized,
{
    catalogue
        .iter()
        .filter(|card| card.unlocked || owned.owns(&card.id))
        .collect()
}

/// Pick up to [`ROSTER_SIZE`] cards from a comma-separated id list
///
/// Requested ids are trimmed, unknown or unavailable ids are dropped and
/// duplicates keep their first position. Short selections are filled from
/// `available` in order. Fewer than [`ROSTER_SIZE`] cards come back only
/// when fewer are available.
pub fn select_loadout<'a>(available: &[&'a CardDefinition], param: &str) -> Vec<&'a CardDefinition> {
    let mut seen = HashSet::new();
    let mut chosen = Vec::with_capacity(ROSTER_SIZE);

    let requested = param
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter_map(|id| available.iter().copied().find(|card| card.id == id));

    for card in requested.chain(available.iter().copied()) {
        if chosen.len() == ROSTER_SIZE {
            break;
        }
        if seen.insert(card.id.as_str()) {
            chosen.push(card);
        }
    }

    chosen
}

/// Convert a selection into battle cards
pub fn battle_cards(selection: &[&CardDefinition]) -> Vec<Card> {
    selection.iter().map(|card| card.to_battle_card()).collect()
}

/// Anything that can answer "does the player own this card"
pub trait OwnedIds {
    fn owns(&self, id: &str) -> bool;
}

impl OwnedIds for HashSet<String> {
    fn owns(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl OwnedIds for BTreeSet<String> {
    fn owns(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl OwnedIds for [String] {
    fn owns(&self, id: &str) -> bool {
        self.iter().any(|owned| owned == id)
    }
}

impl OwnedIds for [&str] {
    fn owns(&self, id: &str) -> bool {
        self.iter().any(|owned| *owned == id)
    }
}

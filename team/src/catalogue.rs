//! Card catalogue parsing

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use outlaw_battle::Card;
use serde::{Deserialize, Serialize};

use crate::TeamError;

/// Card set shipped with the crate
const BUNDLED_CARDS: &str = include_str!("../data/cards.json");

/// Attack used when a card has no attack stat
pub const DEFAULT_ATTACK: u32 = 60;
/// HP used when a card has no hp stat
pub const DEFAULT_HP: u32 = 360;
pub const MIN_ATTACK: u32 = 20;
pub const MIN_HP: u32 = 120;
/// Abilities carried into battle per card
pub const MAX_BATTLE_ABILITIES: usize = 2;

/// Image shown for cards without their own art
pub const FALLBACK_IMAGE: &str = "/card.png";

/// Card rarity
///
/// Display order is Ultra Rare, Rare, Common, then anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    UltraRare,
    Rare,
    Common,
    Other(String),
}

impl Rarity {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Ultra Rare" => Rarity::UltraRare,
            "Rare" => Rarity::Rare,
            "Common" => Rarity::Common,
            other => Rarity::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rarity::UltraRare => "Ultra Rare",
            Rarity::Rare => "Rare",
            Rarity::Common => "Common",
            Rarity::Other(s) => s,
        }
    }

    /// Sort rank, lower shows first
    pub fn rank(&self) -> u8 {
        match self {
            Rarity::UltraRare => 0,
            Rarity::Rare => 1,
            Rarity::Common => 2,
            Rarity::Other(_) => 99,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Rarity {
    fn from(s: String) -> Self {
        Rarity::parse(&s)
    }
}

impl From<Rarity> for String {
    fn from(rarity: Rarity) -> Self {
        rarity.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub name: String,
    pub description: String,
}

/// One catalogue entry as stored in `cards.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    pub id: String,
    pub name: String,

    /// Class tag ("DPS", "Tank", ...)
    #[serde(rename = "type")]
    pub class: String,

    pub rarity: Rarity,
    pub description: String,

    /// Playable without being owned
    #[serde(default)]
    pub unlocked: bool,

    #[serde(default)]
    pub stats: CardStats,

    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_line_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
}

impl CardDefinition {
    /// Convert to a battle card, filling and flooring missing stats
    pub fn to_battle_card(&self) -> Card {
        let attack = self.stats.attack.unwrap_or(DEFAULT_ATTACK).max(MIN_ATTACK);
        let hp = self.stats.hp.unwrap_or(DEFAULT_HP).max(MIN_HP);

        self.abilities
            .iter()
            .take(MAX_BATTLE_ABILITIES)
            .fold(
                Card::new(self.id.as_str(), self.name.as_str(), self.class.as_str(), attack, hp),
                |card, ability| card.with_ability(ability.name.as_str(), ability.description.as_str()),
            )
    }

    pub fn image_src(&self) -> &str {
        self.image_path.as_deref().unwrap_or(FALLBACK_IMAGE)
    }
}

#[derive(Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    cards: Vec<CardDefinition>,
}

/// The full card set, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    cards: Vec<CardDefinition>,
}

impl Catalogue {
    /// Build from definitions, rejecting duplicate ids
    pub fn new(cards: Vec<CardDefinition>) -> Result<Self, TeamError> {
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(TeamError::DuplicateCard(card.id.clone()));
            }
        }
        Ok(Self { cards })
    }

    /// Parse `{"cards": [...]}`
    pub fn from_json_str(json: &str) -> Result<Self, TeamError> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        Self::new(file.cards)
    }

    /// The ten-card Outlaw Legend set
    pub fn bundled() -> Result<Self, TeamError> {
        Self::from_json_str(BUNDLED_CARDS)
    }

    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards ordered for the collection view: rarity first, then name
    pub fn sorted_for_display(&self) -> Vec<&CardDefinition> {
        let mut cards: Vec<_> = self.cards.iter().collect();
        cards.sort_by(|a, b| display_order(a, b));
        cards
    }
}

fn display_order(a: &CardDefinition, b: &CardDefinition) -> Ordering {
    a.rarity
        .rank()
        .cmp(&b.rarity.rank())
        .then_with(|| a.name.cmp(&b.name))
}

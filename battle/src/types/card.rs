//! Card definitions fed into a battle

use std::fmt;

/// Combat role of a card
///
/// The set is open: unrecognized tags are kept verbatim in [`UnitClass::Other`]
/// and resolve as plain strikes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum UnitClass {
    Dps,
    SubDps,
    Tank,
    Healer,
    Support,
    Debuffer,
    Other(String),
}

impl UnitClass {
    /// Parse a class tag as it appears in card data ("DPS", "Sub-DPS", "Tank", ...)
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        let normalized: String = tag
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "dps" => UnitClass::Dps,
            "subdps" => UnitClass::SubDps,
            "tank" => UnitClass::Tank,
            "healer" => UnitClass::Healer,
            "support" => UnitClass::Support,
            "debuffer" => UnitClass::Debuffer,
            _ => UnitClass::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UnitClass::Dps => "DPS",
            UnitClass::SubDps => "Sub-DPS",
            UnitClass::Tank => "Tank",
            UnitClass::Healer => "Healer",
            UnitClass::Support => "Support",
            UnitClass::Debuffer => "Debuffer",
            UnitClass::Other(tag) => tag,
        }
    }

}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for UnitClass {
    fn from(tag: String) -> Self {
        UnitClass::parse(&tag)
    }
}

impl From<&str> for UnitClass {
    fn from(tag: &str) -> Self {
        UnitClass::parse(tag)
    }
}

impl From<UnitClass> for String {
    fn from(class: UnitClass) -> Self {
        class.as_str().to_string()
    }
}

/// A named ability shown on a card
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    pub description: String,
}

impl Ability {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A card entering battle
///
/// Cards are read-only input; the engine derives mutable units from them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Card {
    pub id: String,
    pub name: String,
    pub class: UnitClass,
    pub attack: u32,
    pub hp: u32,
    pub abilities: Vec<Ability>,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: impl Into<UnitClass>,
        attack: u32,
        hp: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class: class.into(),
            attack,
            hp,
            abilities: Vec::new(),
        }
    }

    /// Attach an ability (builder style)
    pub fn with_ability(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.abilities.push(Ability::new(name, description));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_classes() {
        assert_eq!(UnitClass::parse("DPS"), UnitClass::Dps);
        assert_eq!(UnitClass::parse("Sub-DPS"), UnitClass::SubDps);
        assert_eq!(UnitClass::parse("Sub DPS"), UnitClass::SubDps);
        assert_eq!(UnitClass::parse("tank"), UnitClass::Tank);
        assert_eq!(UnitClass::parse(" Healer "), UnitClass::Healer);
        assert_eq!(UnitClass::parse("Support"), UnitClass::Support);
        assert_eq!(UnitClass::parse("Debuffer"), UnitClass::Debuffer);
    }

    #[test]
    fn test_parse_unknown_class_is_kept() {
        let class = UnitClass::parse("Gambler");
        assert_eq!(class, UnitClass::Other("Gambler".to_string()));
        assert_eq!(class.as_str(), "Gambler");
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new("7", "Doc Holiday", "Healer", 48, 300)
            .with_ability("Patch Up", "Restore an ally.");

        assert_eq!(card.class, UnitClass::Healer);
        assert_eq!(card.abilities.len(), 1);
        assert_eq!(card.abilities[0].name, "Patch Up");
    }
}

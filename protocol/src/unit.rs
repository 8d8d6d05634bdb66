//! Shared identifiers for battle units

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Which team a unit fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "player" => Some(Side::Player),
            "enemy" => Some(Side::Enemy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Enemy => "enemy",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit identifier in the form "SIDE-SLOT" (e.g., "player-1", "enemy-3")
///
/// Slots are 1-based so identifiers read the same way they are shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitId {
    pub side: Side,
    pub slot: usize,
}

impl UnitId {
    pub fn new(side: Side, slot: usize) -> Self {
        Self { side, slot }
    }

    pub fn player(slot: usize) -> Self {
        Self::new(Side::Player, slot)
    }

    pub fn enemy(slot: usize) -> Self {
        Self::new(Side::Enemy, slot)
    }

    /// Zero-based position of this unit within its side
    pub fn index(&self) -> usize {
        self.slot.saturating_sub(1)
    }

    /// Parse an identifier string like "player-2"
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::MissingField("unit id".to_string()));
        }

        let (side_part, slot_part) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseError::InvalidFormat(format!("unit id `{}` has no slot", s)))?;

        let side = Side::parse(side_part)
            .ok_or_else(|| ParseError::InvalidFormat(format!("unknown side `{}`", side_part)))?;

        let slot: usize = slot_part
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("invalid slot `{}`", slot_part)))?;

        if slot == 0 {
            return Err(ParseError::InvalidFormat("slots start at 1".to_string()));
        }

        Ok(Self { side, slot })
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side, self.slot)
    }
}

impl FromStr for UnitId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UnitId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UnitId> for String {
    fn from(id: UnitId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_round_trip() {
        assert_eq!(Side::parse("player"), Some(Side::Player));
        assert_eq!(Side::parse("enemy"), Some(Side::Enemy));
        assert_eq!(Side::parse("p1"), None);
    }

    #[test]
    fn test_parse_unit_id() {
        let id = UnitId::parse("player-1").unwrap();
        assert_eq!(id, UnitId::player(1));
        assert_eq!(id.index(), 0);

        let id: UnitId = " enemy-3 ".parse().unwrap();
        assert_eq!(id, UnitId::enemy(3));
        assert_eq!(id.to_string(), "enemy-3");
    }

    #[test]
    fn test_parse_unit_id_invalid() {
        assert_eq!(
            UnitId::parse(""),
            Err(ParseError::MissingField("unit id".to_string()))
        );
        assert!(matches!(
            UnitId::parse("player"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            UnitId::parse("boss-1"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            UnitId::parse("enemy-x"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            UnitId::parse("enemy-0"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_unit_id_serde_as_string() {
        let json = serde_json::to_string(&UnitId::enemy(2)).unwrap();
        assert_eq!(json, "\"enemy-2\"");

        let back: UnitId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UnitId::enemy(2));

        assert!(serde_json::from_str::<UnitId>("\"enemy-0\"").is_err());
    }
}

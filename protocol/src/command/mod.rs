mod tests;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::unit::UnitId;

/// Commands a player (or a script) can issue to a running battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BattleCommand {
    /// /attack ATTACKER TARGET
    Attack { attacker: UnitId, target: UnitId },

    /// /reset
    Reset,

    /// /status
    Status,
}

impl BattleCommand {
    /// Serialize command to protocol format
    pub fn to_protocol_string(&self) -> String {
        match self {
            Self::Attack { attacker, target } => format!("/attack {} {}", attacker, target),
            Self::Reset => "/reset".to_string(),
            Self::Status => "/status".to_string(),
        }
    }
}

/// Parse a single command line such as `/attack player-1 enemy-2`
///
/// The leading slash is optional.
pub fn parse_command(line: &str) -> Result<BattleCommand, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyMessage);
    }

    let body = line.strip_prefix('/').unwrap_or(line);
    let mut parts = body.split_whitespace();
    let verb = parts.next().ok_or(ParseError::EmptyMessage)?;

    match verb.to_ascii_lowercase().as_str() {
        "attack" | "a" => parse_attack(parts),
        "reset" => expect_no_args(BattleCommand::Reset, parts),
        "status" => expect_no_args(BattleCommand::Status, parts),
        _ => Err(ParseError::UnknownCommand(verb.to_string())),
    }
}

fn parse_attack<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<BattleCommand, ParseError> {
    let attacker = parts
        .next()
        .ok_or_else(|| ParseError::MissingField("attacker".to_string()))?;
    let target = parts
        .next()
        .ok_or_else(|| ParseError::MissingField("target".to_string()))?;

    if let Some(extra) = parts.next() {
        return Err(ParseError::InvalidFormat(format!(
            "unexpected argument `{}`",
            extra
        )));
    }

    Ok(BattleCommand::Attack {
        attacker: UnitId::parse(attacker)?,
        target: UnitId::parse(target)?,
    })
}

fn expect_no_args<'a>(
    command: BattleCommand,
    mut parts: impl Iterator<Item = &'a str>,
) -> Result<BattleCommand, ParseError> {
    match parts.next() {
        Some(extra) => Err(ParseError::InvalidFormat(format!(
            "unexpected argument `{}`",
            extra
        ))),
        None => Ok(command),
    }
}

/// Parse a multi-line command script
///
/// Blank lines and lines starting with `#` are skipped. The first bad line
/// aborts parsing with its line number attached.
pub fn parse_script(script: &str) -> Result<Vec<BattleCommand>> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(number, line)| {
            parse_command(line).with_context(|| format!("line {}: `{}`", number + 1, line.trim()))
        })
        .collect()
}

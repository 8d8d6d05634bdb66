//! Error types for battle setup and actions

use outlaw_protocol::UnitId;
use thiserror::Error;

use crate::types::Phase;

/// Errors that prevent a battle from being created
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("battle needs {need} cards, got {have}")]
    InsufficientRoster { have: usize, need: usize },

    #[error("enemy template has no units")]
    EmptyEnemyTemplate,
}

/// A rejected action request
///
/// Rejections never change battle state or the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("player actions are not accepted during the {0} phase")]
    WrongPhase(Phase),

    #[error("the battle is already decided")]
    BattleFinished,

    #[error("no unit with id {0}")]
    UnknownUnit(UnitId),

    #[error("{0} does not fight for the player")]
    NotPlayerUnit(UnitId),

    #[error("{0} is not an enemy unit")]
    NotEnemyUnit(UnitId),

    #[error("{0} is defeated and cannot act")]
    AttackerDefeated(UnitId),

    #[error("{0} has already acted this turn")]
    AlreadyActed(UnitId),

    #[error("{0} is already defeated")]
    TargetDefeated(UnitId),
}

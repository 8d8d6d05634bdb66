use thiserror::Error;

pub mod command;
pub mod unit;

pub use command::{BattleCommand, parse_command, parse_script};
pub use unit::{Side, UnitId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Empty message")]
    EmptyMessage,
}

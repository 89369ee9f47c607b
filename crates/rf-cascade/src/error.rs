//! Error types for round logic

use thiserror::Error;

use crate::board::Position;
use crate::mode::GameMode;

/// Round error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoundError {
    #[error("Transition from {from} to {to} is not allowed")]
    IllegalTransition { from: GameMode, to: GameMode },

    #[error("Position {position} outside {width}x{height} board")]
    OutOfRange {
        position: Position,
        width: usize,
        height: usize,
    },

    #[error("No runner registered for mode {0}")]
    UnknownMode(GameMode),

    #[error("Round in {mode} exceeded {limit} steps")]
    StepLimitExceeded { mode: GameMode, limit: usize },

    #[error("Mode chain from {entry} exceeded {limit} rounds")]
    ChainLimitExceeded { entry: GameMode, limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type RoundResult<T> = Result<T, RoundError>;

//! Error types for the game engine.

use crate::code::Peg;
use thiserror::Error;

/// Why a candidate secret or guess was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCode {
    #[error("expected {expected} pegs, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("'{peg}' at position {position} is not a known color")]
    UnknownPeg { peg: Peg, position: usize },
}

/// Errors surfaced by the game engine.
#[derive(Error, Debug)]
pub enum GameError {
    /// Rejected candidate. The engine re-asks the same player instead of
    /// returning this from a game.
    #[error("invalid code: {0}")]
    InvalidCode(#[from] InvalidCode),

    /// A player stopped answering (input closed, quit from the UI).
    #[error("{role} {name} did not provide a code")]
    CapabilityUnavailable { name: String, role: &'static str },

    /// Only raised when the rules bound retries.
    #[error("{name} gave {limit} invalid codes in a row")]
    RetriesExhausted { name: String, limit: usize },

    #[error("no secret code has been set yet")]
    SecretNotSet,

    #[error("the secret code is already set")]
    SecretAlreadySet,

    #[error("the game is already over")]
    GameOver,

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;

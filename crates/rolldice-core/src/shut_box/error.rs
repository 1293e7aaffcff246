use thiserror::Error;

use super::game::PhaseKind;
use crate::probability::EventError;

/// Why a proposed set of slots could not be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid digit input not in range [1,9]")]
    InvalidDigit,
    #[error("slot {slot} is already closed. Please try again")]
    SlotAlreadyClosed { slot: u32 },
    #[error("input '{actual}' does not add up to target '{target}'")]
    NotEqualTarget { actual: u32, target: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("expected the game to be {expected} but it is {found}")]
    WrongPhase { expected: PhaseKind, found: PhaseKind },
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("dice roll failed: {0}")]
    Roll(#[from] EventError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotsParseError {
    #[error("board display must be {expected} characters but found {found}")]
    Length { expected: usize, found: usize },
    #[error("slot {slot} is shown as '{found}'")]
    Slot { slot: u32, found: String },
}

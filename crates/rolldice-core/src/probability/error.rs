use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("invalid number of events ({count}): must be a positive integer")]
    InvalidEventCount { count: i64 },
    #[error("invalid number of possibilities: must have at least one possible outcome")]
    InvalidPossibilities,
    #[error("invalid dice type ({sides}): must be one of (4, 6, 10, 12, 20)")]
    InvalidDiceType { sides: i64 },
    #[error("random source returned index {index} for {outcomes} outcomes")]
    SourceOutOfRange { index: usize, outcomes: usize },
}

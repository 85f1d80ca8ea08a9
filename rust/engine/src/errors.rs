use thiserror::Error;

use crate::engine::{Phase, Seat};

/// Why an exchange request was turned away.
///
/// A rejected exchange is a no-op: the round, the hand and the turn are left
/// exactly as they were.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Slot index {index} out of range (expected 0 or 1)")]
    SlotOutOfRange { index: usize },
    #[error("Slot index {index} listed more than once")]
    DuplicateSlot { index: usize },
    #[error("Discarding {requested} cards exceeds the remaining budget of {remaining}")]
    BudgetExceeded { requested: usize, remaining: u8 },
    #[error("No exchange window is open (phase {phase:?})")]
    WrongPhase { phase: Phase },
    #[error("It's not {actual:?}'s turn (expected {expected:?})")]
    NotSeatsTurn { expected: Seat, actual: Seat },
    #[error("{seat:?} already exchanged in this window")]
    AlreadyActed { seat: Seat },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    #[error("Match is already over")]
    MatchOver,
    #[error("Action not allowed in phase {phase:?}")]
    WrongPhase { phase: Phase },
    #[error("Scheduled step is stale (scheduled for round {round}, generation {generation})")]
    StaleStep { round: u32, generation: u64 },
}

use holdem_shot_engine::errors::GameError;
use thiserror::Error;

use crate::room::RoomId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    NotFound(RoomId),
    /// The match refused the action; nothing changed.
    #[error("Action rejected: {0}")]
    Rejected(#[from] GameError),
    /// The room's actor is gone (torn down or aborted).
    #[error("Room closed: {0}")]
    Closed(RoomId),
    #[error("Room storage poisoned")]
    StoragePoisoned,
}

impl RoomError {
    /// Invalid actions are the caller's problem; everything else is the room's.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RoomError::Rejected(_))
    }
}

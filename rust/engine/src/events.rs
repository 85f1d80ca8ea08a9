//! Outbound vocabulary of the round engine.
//!
//! Every accepted transition yields [`Emitted`] values; the room layer fans
//! them out to the seats named by their [`Audience`]. Nothing in here ever
//! carries the opponent's private card values.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DeckCard};
use crate::engine::{Phase, Seat};
use crate::roulette::RouletteOutcome;

/// How a match ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Showdown,
    Surrender,
    Disconnect,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatLabels {
    pub p1: String,
    pub p2: String,
}

impl SeatLabels {
    pub fn get(&self, seat: Seat) -> &str {
        match seat {
            Seat::P1 => &self.p1,
            Seat::P2 => &self.p2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoreEvent {
    PhaseChanged {
        phase: Phase,
        round: u32,
        turn: Option<Seat>,
    },
    /// Sent to the opponent of `seat` only. Slot indices, never card values.
    ExchangeMade { seat: Seat, slots: Vec<usize> },
    ShowdownResult {
        round: u32,
        /// `None` is a tie.
        winner: Option<Seat>,
        labels: SeatLabels,
    },
    RouletteOutcome {
        round: u32,
        outcome: RouletteOutcome,
    },
    MatchOver {
        round: u32,
        winner: Seat,
        reason: EndReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Both,
    Seat(Seat),
}

impl Audience {
    pub fn includes(self, seat: Seat) -> bool {
        match self {
            Audience::Both => true,
            Audience::Seat(s) => s == seat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emitted {
    pub audience: Audience,
    pub event: CoreEvent,
}

impl Emitted {
    pub fn to_both(event: CoreEvent) -> Self {
        Self {
            audience: Audience::Both,
            event,
        }
    }

    pub fn to_seat(seat: Seat, event: CoreEvent) -> Self {
        Self {
            audience: Audience::Seat(seat),
            event,
        }
    }
}

/// Face-down placeholder for an opponent's private card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedCard {
    pub back: bool,
}

impl MaskedCard {
    pub fn back() -> Self {
        Self { back: true }
    }
}

/// The round as one seat is allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub seat: Seat,
    pub round: u32,
    pub phase: Phase,
    /// Only the cards revealed so far in this phase.
    pub board: Vec<Card>,
    pub own_hand: [DeckCard; 2],
    pub opponent_hand: [MaskedCard; 2],
    pub turn: Option<Seat>,
    pub exchange_budget_remaining: u8,
}

impl StateSnapshot {
    pub fn is_my_turn(&self) -> bool {
        self.turn == Some(self.seat)
    }
}

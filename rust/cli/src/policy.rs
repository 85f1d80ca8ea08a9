//! Seat policies used by `sim` and `duel` to answer exchange windows.

use clap::ValueEnum;
use holdem_shot_engine::cards::DeckCard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Keep both private cards in every window.
    Stand,
    /// Discard each non-Joker card with even odds, within the budget.
    Random,
}

impl Policy {
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Stand => "stand",
            Policy::Random => "random",
        }
    }

    pub fn parse(text: &str) -> Option<Policy> {
        match text.to_ascii_lowercase().as_str() {
            "stand" => Some(Policy::Stand),
            "random" => Some(Policy::Random),
            _ => None,
        }
    }
}

/// A policy plus the randomness it draws on, one per seat.
#[derive(Debug, Clone)]
pub struct SeatBrain {
    policy: Policy,
    rng: ChaCha20Rng,
}

impl SeatBrain {
    pub fn new(policy: Policy, seed: u64) -> Self {
        Self {
            policy,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Slots to discard from `hand` given the remaining budget.
    pub fn choose(&mut self, hand: &[DeckCard; 2], budget: u8) -> Vec<usize> {
        match self.policy {
            Policy::Stand => Vec::new(),
            Policy::Random => {
                let mut slots = Vec::new();
                for (slot, card) in hand.iter().enumerate() {
                    if slots.len() >= budget as usize || card.is_joker() {
                        continue;
                    }
                    if self.rng.random_bool(0.5) {
                        slots.push(slot);
                    }
                }
                slots
            }
        }
    }
}

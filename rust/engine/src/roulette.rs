use rand::seq::index::sample;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::Seat;

/// Chambers in the cylinder.
pub const CHAMBERS: usize = 6;

/// Base danger for a round: one more bullet per round, at most a full cylinder.
pub fn bullets_for_round(round: u32) -> u8 {
    round.clamp(1, CHAMBERS as u32) as u8
}

/// Everything that decides an elimination draw before any randomness is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteSetup {
    pub loser: Seat,
    pub round: u32,
    pub bullets_loaded: u8,
    /// The loser held a Joker: no draw happens at all.
    pub exempt: bool,
}

impl RouletteSetup {
    /// Applies the Joker modifiers to the round's base bullet count.
    ///
    /// A Joker in the loser's hand shields them completely. Otherwise a Joker
    /// in the winner's hand adds one bullet, still capped at six.
    pub fn new(loser: Seat, round: u32, loser_has_joker: bool, winner_has_joker: bool) -> Self {
        if loser_has_joker {
            return Self {
                loser,
                round,
                bullets_loaded: 0,
                exempt: true,
            };
        }
        let bonus = u8::from(winner_has_joker);
        Self {
            loser,
            round,
            bullets_loaded: (bullets_for_round(round) + bonus).min(CHAMBERS as u8),
            exempt: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteOutcome {
    pub loser: Seat,
    pub bullets_loaded: u8,
    pub exempt: bool,
    pub hit: bool,
    /// Loaded chambers, so a client can replay the spin that was decided.
    pub chambers: [bool; CHAMBERS],
    /// Chamber the cylinder stopped on; `None` when exempt.
    pub stop: Option<usize>,
}

/// Runs the draw: `bullets_loaded` distinct chambers are loaded uniformly at
/// random, then one stop chamber is picked uniformly. A hit is a stop on a
/// loaded chamber. An exempt setup consumes no randomness.
pub fn spin<R: Rng + ?Sized>(setup: &RouletteSetup, rng: &mut R) -> RouletteOutcome {
    let mut chambers = [false; CHAMBERS];
    if setup.exempt {
        return RouletteOutcome {
            loser: setup.loser,
            bullets_loaded: 0,
            exempt: true,
            hit: false,
            chambers,
            stop: None,
        };
    }
    for idx in sample(&mut *rng, CHAMBERS, setup.bullets_loaded as usize) {
        chambers[idx] = true;
    }
    let stop = rng.random_range(0..CHAMBERS);
    RouletteOutcome {
        loser: setup.loser,
        bullets_loaded: setup.bullets_loaded,
        exempt: false,
        hit: chambers[stop],
        chambers,
        stop: Some(stop),
    }
}

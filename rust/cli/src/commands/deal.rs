//! `deal`: show round 1 of a seeded match.

use crate::error::CliError;
use holdem_shot_engine::cards::DeckCard;
use holdem_shot_engine::engine::Seat;
use holdem_shot_engine::game::Match;
use std::io::Write;

/// Deals round 1 of the match seeded by `seed` (random when absent) and
/// prints the opener, both private hands and the full board.
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let (game, _) = Match::start(base_seed);
    let rt = game.runtime();

    let hand = |seat: Seat| {
        rt.hand(seat)
            .iter()
            .map(DeckCard::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    let board = rt
        .board()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "Opener: {:?}", rt.opener())?;
    writeln!(out, "Hole P1: {}", hand(Seat::P1))?;
    writeln!(out, "Hole P2: {}", hand(Seat::P2))?;
    writeln!(out, "Board: {}", board)?;
    Ok(())
}

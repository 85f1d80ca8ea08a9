//! `eval`: rank a private pair against a full board.

use crate::error::CliError;
use holdem_shot_engine::cards::{parse_cards, Card, DeckCard, JokerMark};
use holdem_shot_engine::hand::{count_jokers, evaluate};
use std::collections::HashSet;
use std::io::Write;

/// Ranks `private` (two cards, `JK` for a Joker) against `board` (five
/// cards, no Jokers) and prints the category label and the best five cards.
pub fn handle_eval_command(private: &str, board: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let private = parse_private(private)?;
    let board = parse_board(board)?;

    let mut seen = HashSet::new();
    let standard = private.iter().filter_map(DeckCard::as_standard);
    for card in standard.chain(board.iter().copied()) {
        if !seen.insert(card) {
            return Err(CliError::InvalidInput(format!("duplicate card {}", card)));
        }
    }

    let strength = evaluate(&private, &board);
    let best = strength
        .best_five
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    writeln!(out, "Hand: {}", strength.label())?;
    writeln!(out, "Best five: {}", best)?;
    writeln!(out, "Jokers: {}", count_jokers(&private))?;
    Ok(())
}

fn parse_private(text: &str) -> Result<[DeckCard; 2], CliError> {
    let cards: Vec<DeckCard> = parse_cards(text)?;
    let [first, second] = <[DeckCard; 2]>::try_from(cards).map_err(|cards| {
        CliError::InvalidInput(format!("expected 2 private cards, got {}", cards.len()))
    })?;
    // "JK JK" names both Jokers
    let second = match (first, second) {
        (DeckCard::Joker { .. }, DeckCard::Joker { .. }) => DeckCard::Joker {
            mark: JokerMark::Black,
        },
        (_, other) => other,
    };
    Ok([first, second])
}

fn parse_board(text: &str) -> Result<[Card; 5], CliError> {
    let cards: Vec<Card> = parse_cards(text)?;
    <[Card; 5]>::try_from(cards).map_err(|cards| {
        CliError::InvalidInput(format!("expected 5 board cards, got {}", cards.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(private: &str, board: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        handle_eval_command(private, board, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn joker_completes_quads() {
        let text = eval("JK 2s", "7s 7h 7d 3c Kd").unwrap();
        assert!(text.contains("Hand: Four of a Kind, 7s"), "{}", text);
        assert!(text.contains("Jokers: 1"));
    }

    #[test]
    fn two_jokers_are_accepted() {
        let text = eval("JK JK", "2c 7d 9h Js 4s").unwrap();
        assert!(text.contains("Jokers: 2"));
    }

    #[test]
    fn wrong_counts_are_rejected() {
        assert!(matches!(
            eval("As", "7s 7h 7d 3c Kd"),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            eval("As Ks", "7s 7h 7d 3c"),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn board_jokers_and_duplicates_are_rejected() {
        assert!(eval("As Ks", "JK 7h 7d 3c Kd").is_err());
        let err = eval("As Ks", "As 7h 7d 3c Kd").unwrap_err();
        assert!(err.to_string().contains("duplicate card As"));
    }
}

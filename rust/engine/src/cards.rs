use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents one of the four suits of the ranked part of the deck.
/// Used as a component of [`Card`] to fully define a concrete playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14, always high except inside the wheel straight)
    Ace,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        let rank = match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Short label used in hand descriptions ("T", "J", "A", "7").
    pub fn label(self) -> &'static str {
        rank_label(self.value())
    }
}

pub(crate) fn rank_label(v: u8) -> &'static str {
    match v {
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "T",
        11 => "J",
        12 => "Q",
        13 => "K",
        14 => "A",
        _ => "?",
    }
}

/// A single concrete playing card with a suit and rank.
/// Board cards, evaluation inputs and Joker substitutes are always concrete.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }
}

/// Tells the two physical Jokers apart so every card in a deck is distinct.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum JokerMark {
    Red,
    Black,
}

/// Anything that can be drawn from the 54-card deck and held privately.
///
/// A Joker has no rank or suit of its own. It only ever becomes a concrete
/// card inside the evaluator, see [`crate::hand::evaluate`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeckCard {
    Standard(Card),
    Joker { mark: JokerMark },
}

impl DeckCard {
    pub fn is_joker(&self) -> bool {
        matches!(self, DeckCard::Joker { .. })
    }

    pub fn as_standard(&self) -> Option<Card> {
        match *self {
            DeckCard::Standard(c) => Some(c),
            DeckCard::Joker { .. } => None,
        }
    }
}

impl From<Card> for DeckCard {
    fn from(card: Card) -> Self {
        DeckCard::Standard(card)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// The 52 ranked cards in canonical order (suit-major).
pub fn all_standard_cards() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

/// Canonical 54-card set: the 52 ranked cards followed by both Jokers.
pub fn full_deck() -> Vec<DeckCard> {
    let mut v: Vec<DeckCard> = Vec::with_capacity(54);
    v.extend(all_standard_cards().into_iter().map(DeckCard::Standard));
    v.push(DeckCard::Joker {
        mark: JokerMark::Red,
    });
    v.push(DeckCard::Joker {
        mark: JokerMark::Black,
    });
    v
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Empty card text")]
    Empty,
    #[error("Unknown rank in card '{0}'")]
    UnknownRank(String),
    #[error("Unknown suit in card '{0}'")]
    UnknownSuit(String),
    #[error("Jokers cannot be used here: '{0}'")]
    JokerNotAllowed(String),
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl fmt::Display for DeckCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckCard::Standard(c) => write!(f, "{}", c),
            DeckCard::Joker { .. } => write!(f, "JK"),
        }
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(CardParseError::Empty);
        }
        if text.eq_ignore_ascii_case("jk") || text.eq_ignore_ascii_case("joker") {
            return Err(CardParseError::JokerNotAllowed(text.to_string()));
        }
        let split = text
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or(CardParseError::Empty)?;
        let (rank_part, suit_part) = text.split_at(split);
        let rank = match rank_part.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(CardParseError::UnknownRank(text.to_string())),
        };
        let suit = match suit_part {
            "c" | "C" | "♣" => Suit::Clubs,
            "d" | "D" | "♦" => Suit::Diamonds,
            "h" | "H" | "♥" => Suit::Hearts,
            "s" | "S" | "♠" => Suit::Spades,
            _ => return Err(CardParseError::UnknownSuit(text.to_string())),
        };
        Ok(Card { suit, rank })
    }
}

impl FromStr for DeckCard {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("jk") || text.eq_ignore_ascii_case("joker") {
            return Ok(DeckCard::Joker {
                mark: JokerMark::Red,
            });
        }
        text.parse::<Card>().map(DeckCard::Standard)
    }
}

/// Parses a whitespace-separated list such as `"As Kd JK"`.
pub fn parse_cards<T: FromStr<Err = CardParseError>>(text: &str) -> Result<Vec<T>, CardParseError> {
    text.split_whitespace().map(str::parse).collect()
}

//! # holdem-shot-engine: Two-Seat Hold'em Duel Core
//!
//! A deterministic engine for a head-to-head Hold'em variant played with a
//! 54-card deck (52 standard cards plus two Jokers). Each round both seats
//! receive two private cards, a five-card board is revealed in three steps,
//! and between reveals each seat may swap private cards. The showdown loser
//! faces a six-chamber elimination draw whose danger grows every round.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card, Joker) and text parsing
//! - [`deck`] - Seeded 54-card deck with a Joker-free board draw
//! - [`hand`] - Seven-card ranking with Joker substitution
//! - [`rules`] - Exchange request validation
//! - [`engine`] - Single-round runtime: deal, exchange windows, showdown
//! - [`roulette`] - Bullet scaling, Joker modifiers and the chamber draw
//! - [`game`] - Match controller: rounds, elimination, forfeits, stale steps
//! - [`events`] - Seat-addressed events and per-seat snapshots
//! - [`logger`] - RoundRecord serialization to JSONL
//! - [`errors`] - Error types for rejected actions
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_shot_engine::cards::{parse_cards, Card, DeckCard};
//! use holdem_shot_engine::hand::evaluate;
//!
//! let private: Vec<DeckCard> = parse_cards("JK 7h").unwrap();
//! let board: Vec<Card> = parse_cards("7c 7d 2s 9h Kd").unwrap();
//!
//! let strength = evaluate(
//!     &[private[0], private[1]],
//!     &[board[0], board[1], board[2], board[3], board[4]],
//! );
//! // The Joker becomes the fourth seven.
//! assert_eq!(strength.label(), "Four of a Kind, 7s");
//! ```
//!
//! ## Deterministic Matches
//!
//! A match is fully reproducible from its seed:
//!
//! ```rust
//! use holdem_shot_engine::game::Match;
//! use holdem_shot_engine::engine::Seat;
//!
//! let (a, _) = Match::start(42);
//! let (b, _) = Match::start(42);
//! assert_eq!(a.runtime().hand(Seat::P1), b.runtime().hand(Seat::P1));
//! assert_eq!(a.runtime().board(), b.runtime().board());
//! ```
//!
//! ## Exchange Validation
//!
//! ```rust
//! use holdem_shot_engine::rules::validate_exchange;
//!
//! assert!(validate_exchange(&[0, 1], 2).is_ok());
//! assert!(validate_exchange(&[0, 0], 2).is_err());
//! assert!(validate_exchange(&[2], 2).is_err());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod roulette;
pub mod rules;

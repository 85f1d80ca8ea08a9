use std::collections::HashSet;

use holdem_shot_engine::cards::DeckCard;
use holdem_shot_engine::deck::Deck;

#[test]
fn shuffled_deck_has_54_unique_cards_with_two_jokers() {
    let mut deck = Deck::shuffled(42);
    let mut set = HashSet::new();
    for i in 0..54 {
        let c = deck.deal_card().expect("should have 54 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(deck.deal_card().is_none(), "after 54 cards, deck should be empty");
    assert_eq!(set.iter().filter(|c| c.is_joker()).count(), 2);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::shuffled(12345);
    let mut d2 = Deck::shuffled(12345);
    let a: Vec<DeckCard> = (0..10).map(|_| d1.draw()).collect();
    let b: Vec<DeckCard> = (0..10).map(|_| d2.draw()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::shuffled(1);
    let mut d2 = Deck::shuffled(2);
    let a: Vec<DeckCard> = (0..10).map(|_| d1.draw()).collect();
    let b: Vec<DeckCard> = (0..10).map(|_| d2.draw()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn board_never_contains_a_joker() {
    for seed in 0..500u64 {
        let mut deck = Deck::shuffled(seed);
        let p1 = deck.draw_private_pair();
        let p2 = deck.draw_private_pair();
        let board = deck.draw_board();
        let unique: HashSet<_> = board.iter().collect();
        assert_eq!(unique.len(), 5, "seed {} produced a repeated board card", seed);
        // skipped Jokers stay in the deck for later exchanges
        let jokers_left = deck.undrawn().iter().filter(|c| c.is_joker()).count();
        let jokers_dealt = p1.iter().chain(p2.iter()).filter(|c| c.is_joker()).count();
        assert_eq!(jokers_left + jokers_dealt, 2, "seed {}", seed);
    }
}

#[test]
fn round_draws_leave_no_card_twice() {
    let mut deck = Deck::shuffled(77);
    let mut seen = HashSet::new();
    for card in deck.draw_private_pair().into_iter().chain(deck.draw_private_pair()) {
        assert!(seen.insert(card));
    }
    for card in deck.draw_board() {
        assert!(seen.insert(DeckCard::Standard(card)));
    }
    while let Some(card) = deck.deal_card() {
        assert!(seen.insert(card), "{:?} drawn twice", card);
    }
    assert_eq!(seen.len(), 54);
}

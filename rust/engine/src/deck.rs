use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, DeckCard};

/// The 54-card deck used for one round.
///
/// Cards are consumed from the front through a cursor. The only time a card
/// goes back in is the board Joker-skip in [`Deck::draw_board_card`].
#[derive(Debug)]
pub struct Deck {
    cards: Vec<DeckCard>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// A fresh, uniformly shuffled 54-card deck.
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::new_with_seed(seed);
        deck.shuffle();
        deck
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<DeckCard> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    /// Draws the next card.
    ///
    /// # Panics
    ///
    /// Panics when the deck is exhausted. A round draws at most 13 cards, so
    /// underflow means the caller broke the per-round consumption contract.
    pub fn draw(&mut self) -> DeckCard {
        match self.deal_card() {
            Some(card) => card,
            None => panic!("deck underflow: all {} cards drawn", self.cards.len()),
        }
    }

    pub fn draw_private_pair(&mut self) -> [DeckCard; 2] {
        [self.draw(), self.draw()]
    }

    /// Draws one board card, never a Joker.
    ///
    /// A Joker is put back among the undrawn cards, the undrawn portion is
    /// reshuffled and the draw is retried.
    pub fn draw_board_card(&mut self) -> Card {
        loop {
            let card = self.draw();
            match card {
                DeckCard::Standard(c) => return c,
                DeckCard::Joker { .. } => self.return_and_reshuffle(card),
            }
        }
    }

    pub fn draw_board(&mut self) -> [Card; 5] {
        [
            self.draw_board_card(),
            self.draw_board_card(),
            self.draw_board_card(),
            self.draw_board_card(),
            self.draw_board_card(),
        ]
    }

    fn return_and_reshuffle(&mut self, card: DeckCard) {
        self.position -= 1;
        self.cards[self.position] = card;
        self.cards[self.position..].shuffle(&mut self.rng);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn undrawn(&self) -> &[DeckCard] {
        &self.cards[self.position..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::JokerMark;

    #[test]
    fn board_draw_skips_jokers_at_the_top() {
        let mut deck = Deck::new_with_seed(3);
        // Canonical order ends with both Jokers; move them to the top.
        deck.cards.rotate_right(2);
        assert!(deck.cards[0].is_joker());
        let card = deck.draw_board_card();
        assert!(!DeckCard::Standard(card).is_joker());
        assert_eq!(deck.remaining(), 53);
        assert_eq!(deck.undrawn().iter().filter(|c| c.is_joker()).count(), 2);
    }

    #[test]
    fn board_draw_terminates_when_only_one_standard_card_is_left() {
        let mut deck = Deck::new_with_seed(9);
        let last = Card::new(crate::cards::Rank::Two, crate::cards::Suit::Clubs);
        deck.cards = vec![
            DeckCard::Joker {
                mark: JokerMark::Red,
            },
            DeckCard::Joker {
                mark: JokerMark::Black,
            },
            DeckCard::Standard(last),
        ];
        assert_eq!(deck.draw_board_card(), last);
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    #[should_panic(expected = "deck underflow")]
    fn drawing_past_the_end_panics() {
        let mut deck = Deck::shuffled(1);
        for _ in 0..55 {
            deck.draw();
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DeckCard};
use crate::deck::Deck;
use crate::errors::{ExchangeError, GameError};
use crate::events::{MaskedCard, StateSnapshot};
use crate::hand::{evaluate, HandStrength};
use crate::rules::{ValidatedExchange, EXCHANGE_BUDGET};

/// One of the two match participants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Seat {
    P1,
    P2,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::P1, Seat::P2];

    pub fn other(self) -> Seat {
        match self {
            Seat::P1 => Seat::P2,
            Seat::P2 => Seat::P1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::P1 => 0,
            Seat::P2 => 1,
        }
    }
}

/// Step within a round. `MatchOver` is terminal for the whole match.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Hands dealt, board drawn face down
    Dealing,
    /// First three board cards shown, first exchange window
    FlopExchange,
    /// Fourth board card shown, second exchange window
    TurnExchange,
    /// Fifth board card shown, final exchange window
    RiverExchange,
    /// Both hands ranked
    Showdown,
    /// Elimination draw decided, waiting for the reveal or the next round
    Roulette,
    MatchOver,
}

impl Phase {
    pub fn is_exchange(self) -> bool {
        matches!(
            self,
            Phase::FlopExchange | Phase::TurnExchange | Phase::RiverExchange
        )
    }

    /// How many board cards the seats may see in this phase.
    pub fn revealed_board_cards(self) -> usize {
        match self {
            Phase::Dealing => 0,
            Phase::FlopExchange => 3,
            Phase::TurnExchange => 4,
            _ => 5,
        }
    }

    fn after_window(self) -> Phase {
        match self {
            Phase::FlopExchange => Phase::TurnExchange,
            Phase::TurnExchange => Phase::RiverExchange,
            _ => Phase::Showdown,
        }
    }
}

/// Per-seat bookkeeping for the exchange window that is currently open.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatExchange {
    pub acted: bool,
    pub budget_remaining: u8,
}

impl SeatExchange {
    fn fresh() -> Self {
        Self {
            acted: false,
            budget_remaining: EXCHANGE_BUDGET,
        }
    }
}

/// An exchange that was applied, kept for round records.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub phase: Phase,
    pub seat: Seat,
    pub slots: Vec<usize>,
    pub received: Vec<DeckCard>,
}

/// What an accepted exchange did to the round.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExchangeApplied {
    pub seat: Seat,
    pub slots: Vec<usize>,
    /// Both seats have now acted and the round moved on to `phase`.
    pub window_closed: bool,
    pub phase: Phase,
    pub turn: Option<Seat>,
}

/// Authoritative state of a single round.
///
/// A new `Runtime` is dealt for every round; nothing carries over from the
/// previous one.
#[derive(Debug)]
pub struct Runtime {
    round: u32,
    deck_seed: u64,
    phase: Phase,
    deck: Deck,
    board: [Card; 5],
    hands: [[DeckCard; 2]; 2],
    exchange: [SeatExchange; 2],
    turn: Option<Seat>,
    opener: Seat,
    exchanges: Vec<ExchangeRecord>,
}

impl Runtime {
    /// Shuffles a fresh deck, deals both private hands and draws the board
    /// face down. `opener` acts first on the flop and river windows, the
    /// other seat first on the turn window.
    pub fn deal(round: u32, deck_seed: u64, opener: Seat) -> Self {
        let mut deck = Deck::shuffled(deck_seed);
        let p1 = deck.draw_private_pair();
        let p2 = deck.draw_private_pair();
        let board = deck.draw_board();
        Self {
            round,
            deck_seed,
            phase: Phase::Dealing,
            deck,
            board,
            hands: [p1, p2],
            exchange: [SeatExchange::fresh(), SeatExchange::fresh()],
            turn: None,
            opener,
            exchanges: Vec::new(),
        }
    }

    pub fn reveal_flop(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Dealing {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        self.open_window(Phase::FlopExchange);
        Ok(())
    }

    fn open_window(&mut self, phase: Phase) {
        self.phase = phase;
        self.exchange = [SeatExchange::fresh(), SeatExchange::fresh()];
        self.turn = match phase {
            Phase::FlopExchange | Phase::RiverExchange => Some(self.opener),
            Phase::TurnExchange => Some(self.opener.other()),
            _ => None,
        };
    }

    /// Checks that `seat` may act right now, without touching anything.
    pub fn ensure_can_act(&self, seat: Seat) -> Result<(), ExchangeError> {
        if !self.phase.is_exchange() {
            return Err(ExchangeError::WrongPhase { phase: self.phase });
        }
        if self.exchange[seat.index()].acted {
            return Err(ExchangeError::AlreadyActed { seat });
        }
        match self.turn {
            Some(expected) if expected != seat => Err(ExchangeError::NotSeatsTurn {
                expected,
                actual: seat,
            }),
            Some(_) => Ok(()),
            None => Err(ExchangeError::WrongPhase { phase: self.phase }),
        }
    }

    /// Replaces the requested slots of `seat`'s hand with fresh cards.
    ///
    /// Rejections leave the runtime untouched. Once both seats have acted the
    /// window closes: the next board card is revealed, or the round reaches
    /// [`Phase::Showdown`] after the river.
    pub fn submit_exchange(
        &mut self,
        seat: Seat,
        exchange: &ValidatedExchange,
    ) -> Result<ExchangeApplied, ExchangeError> {
        self.ensure_can_act(seat)?;
        let state = self.exchange[seat.index()];
        let slots = exchange.slots().to_vec();
        if slots.len() > state.budget_remaining as usize {
            return Err(ExchangeError::BudgetExceeded {
                requested: slots.len(),
                remaining: state.budget_remaining,
            });
        }

        let mut received = Vec::with_capacity(slots.len());
        for &slot in &slots {
            let card = self.deck.draw();
            self.hands[seat.index()][slot] = card;
            received.push(card);
        }
        self.exchanges.push(ExchangeRecord {
            phase: self.phase,
            seat,
            slots: slots.clone(),
            received,
        });

        let entry = &mut self.exchange[seat.index()];
        entry.acted = true;
        entry.budget_remaining -= slots.len() as u8;

        let window_closed = self.exchange[seat.other().index()].acted;
        if window_closed {
            let next = self.phase.after_window();
            self.open_window(next);
        } else {
            self.turn = Some(seat.other());
        }

        Ok(ExchangeApplied {
            seat,
            slots,
            window_closed,
            phase: self.phase,
            turn: self.turn,
        })
    }

    /// Ranks both seats' final hands against the full board.
    pub fn evaluate_both(&self) -> [HandStrength; 2] {
        [
            evaluate(&self.hands[0], &self.board),
            evaluate(&self.hands[1], &self.board),
        ]
    }

    /// Renders the round as `seat` is allowed to see it.
    pub fn snapshot_for(&self, seat: Seat) -> StateSnapshot {
        StateSnapshot {
            seat,
            round: self.round,
            phase: self.phase,
            board: self.revealed_board().to_vec(),
            own_hand: self.hands[seat.index()],
            opponent_hand: [MaskedCard::back(), MaskedCard::back()],
            turn: self.turn,
            exchange_budget_remaining: if self.phase.is_exchange() {
                self.exchange[seat.index()].budget_remaining
            } else {
                0
            },
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.turn = None;
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn deck_seed(&self) -> u64 {
        self.deck_seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Option<Seat> {
        self.turn
    }

    pub fn opener(&self) -> Seat {
        self.opener
    }

    pub fn board(&self) -> &[Card; 5] {
        &self.board
    }

    pub fn revealed_board(&self) -> &[Card] {
        &self.board[..self.phase.revealed_board_cards()]
    }

    pub fn hand(&self, seat: Seat) -> &[DeckCard; 2] {
        &self.hands[seat.index()]
    }

    pub fn has_joker(&self, seat: Seat) -> bool {
        self.hands[seat.index()].iter().any(DeckCard::is_joker)
    }

    pub fn exchange_state(&self, seat: Seat) -> SeatExchange {
        self.exchange[seat.index()]
    }

    pub fn exchanges(&self) -> &[ExchangeRecord] {
        &self.exchanges
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    #[cfg(test)]
    pub(crate) fn set_hand_for_test(&mut self, seat: Seat, hand: [DeckCard; 2]) {
        self.hands[seat.index()] = hand;
    }

    #[cfg(test)]
    pub(crate) fn set_board_for_test(&mut self, board: [Card; 5]) {
        self.board = board;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::validate_exchange;

    fn stand() -> ValidatedExchange {
        ValidatedExchange::stand()
    }

    #[test]
    fn deal_consumes_nine_cards_and_hides_the_board() {
        let rt = Runtime::deal(1, 42, Seat::P1);
        assert_eq!(rt.phase(), Phase::Dealing);
        assert_eq!(rt.deck_remaining(), 54 - 9);
        assert!(rt.revealed_board().is_empty());
        assert_eq!(rt.turn(), None);
    }

    #[test]
    fn window_openers_alternate_from_the_round_opener() {
        let mut rt = Runtime::deal(1, 7, Seat::P2);
        rt.reveal_flop().unwrap();
        assert_eq!(rt.turn(), Some(Seat::P2));
        rt.submit_exchange(Seat::P2, &stand()).unwrap();
        assert_eq!(rt.turn(), Some(Seat::P1));
        let applied = rt.submit_exchange(Seat::P1, &stand()).unwrap();
        assert!(applied.window_closed);
        assert_eq!(applied.phase, Phase::TurnExchange);
        assert_eq!(applied.turn, Some(Seat::P1));
        assert_eq!(rt.revealed_board().len(), 4);
    }

    #[test]
    fn exchange_replaces_only_requested_slots() {
        let mut rt = Runtime::deal(1, 11, Seat::P1);
        rt.reveal_flop().unwrap();
        let before = *rt.hand(Seat::P1);
        let remaining = rt.deck_remaining();
        let ex = validate_exchange(&[1], 2).unwrap();
        rt.submit_exchange(Seat::P1, &ex).unwrap();
        assert_eq!(rt.hand(Seat::P1)[0], before[0]);
        assert_eq!(rt.deck_remaining(), remaining - 1);
        assert_eq!(rt.exchanges().len(), 1);
        assert_eq!(rt.exchange_state(Seat::P1).budget_remaining, 1);
    }

    #[test]
    fn out_of_turn_exchange_is_rejected_without_mutation() {
        let mut rt = Runtime::deal(1, 5, Seat::P1);
        rt.reveal_flop().unwrap();
        let before = *rt.hand(Seat::P2);
        let ex = validate_exchange(&[0, 1], 2).unwrap();
        assert_eq!(
            rt.submit_exchange(Seat::P2, &ex),
            Err(ExchangeError::NotSeatsTurn {
                expected: Seat::P1,
                actual: Seat::P2
            })
        );
        assert_eq!(*rt.hand(Seat::P2), before);
        assert_eq!(rt.turn(), Some(Seat::P1));
        assert!(rt.exchanges().is_empty());
    }

    #[test]
    fn snapshot_masks_opponent_and_limits_board() {
        let mut rt = Runtime::deal(3, 99, Seat::P1);
        rt.reveal_flop().unwrap();
        let snap = rt.snapshot_for(Seat::P2);
        assert_eq!(snap.board.len(), 3);
        assert_eq!(snap.own_hand, *rt.hand(Seat::P2));
        assert_eq!(snap.round, 3);
        assert_eq!(snap.exchange_budget_remaining, 2);
        let json = serde_json::to_string(&snap).unwrap();
        for card in rt.hand(Seat::P1) {
            if let DeckCard::Standard(c) = card {
                let needle = serde_json::to_string(c).unwrap();
                let own_has_same = rt.hand(Seat::P2).contains(card);
                assert!(own_has_same || !json.contains(&needle));
            }
        }
    }
}

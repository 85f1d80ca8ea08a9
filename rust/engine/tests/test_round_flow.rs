use holdem_shot_engine::engine::{Phase, Runtime, Seat};
use holdem_shot_engine::errors::ExchangeError;
use holdem_shot_engine::rules::{validate_exchange, ValidatedExchange};

fn stand() -> ValidatedExchange {
    ValidatedExchange::stand()
}

#[test]
fn only_the_seat_on_turn_may_exchange() {
    let mut rt = Runtime::deal(1, 2024, Seat::P1);
    assert_eq!(
        rt.ensure_can_act(Seat::P1),
        Err(ExchangeError::WrongPhase {
            phase: Phase::Dealing
        })
    );
    rt.reveal_flop().unwrap();

    for phase in [Phase::FlopExchange, Phase::TurnExchange, Phase::RiverExchange] {
        assert_eq!(rt.phase(), phase);
        let first = rt.turn().unwrap();
        assert!(rt.ensure_can_act(first.other()).is_err());
        rt.submit_exchange(first, &stand()).unwrap();
        assert_eq!(
            rt.submit_exchange(first, &stand()),
            Err(ExchangeError::AlreadyActed { seat: first })
        );
        assert_eq!(rt.turn(), Some(first.other()));
        rt.submit_exchange(first.other(), &stand()).unwrap();
    }
    assert_eq!(rt.phase(), Phase::Showdown);
    assert_eq!(rt.turn(), None);
    assert_eq!(rt.revealed_board().len(), 5);
}

#[test]
fn turn_window_is_opened_by_the_other_seat() {
    for opener in Seat::BOTH {
        let mut rt = Runtime::deal(1, 9, opener);
        rt.reveal_flop().unwrap();
        assert_eq!(rt.turn(), Some(opener));
        rt.submit_exchange(opener, &stand()).unwrap();
        rt.submit_exchange(opener.other(), &stand()).unwrap();
        assert_eq!(rt.turn(), Some(opener.other()));
        rt.submit_exchange(opener.other(), &stand()).unwrap();
        rt.submit_exchange(opener, &stand()).unwrap();
        assert_eq!(rt.phase(), Phase::RiverExchange);
        assert_eq!(rt.turn(), Some(opener));
    }
}

#[test]
fn budget_resets_for_every_window() {
    let mut rt = Runtime::deal(1, 31, Seat::P2);
    rt.reveal_flop().unwrap();
    let both = validate_exchange(&[0, 1], 2).unwrap();
    rt.submit_exchange(Seat::P2, &both).unwrap();
    assert_eq!(rt.exchange_state(Seat::P2).budget_remaining, 0);
    rt.submit_exchange(Seat::P1, &stand()).unwrap();

    assert_eq!(rt.phase(), Phase::TurnExchange);
    assert_eq!(rt.exchange_state(Seat::P2).budget_remaining, 2);
    assert!(!rt.exchange_state(Seat::P2).acted);
}

#[test]
fn maximal_exchanges_never_exhaust_the_deck() {
    for seed in 0..50u64 {
        let mut rt = Runtime::deal(1, seed, Seat::P1);
        rt.reveal_flop().unwrap();
        while rt.phase().is_exchange() {
            let seat = rt.turn().unwrap();
            let both = validate_exchange(&[1, 0], 2).unwrap();
            rt.submit_exchange(seat, &both).unwrap();
        }
        assert_eq!(rt.deck_remaining(), 54 - 9 - 12);
        assert_eq!(rt.exchanges().len(), 6);
        assert!(rt.exchanges().iter().all(|e| e.slots == vec![0, 1]));
    }
}

#[test]
fn snapshots_track_the_revealed_board() {
    let mut rt = Runtime::deal(2, 5, Seat::P1);
    assert!(rt.snapshot_for(Seat::P1).board.is_empty());
    rt.reveal_flop().unwrap();
    let snap = rt.snapshot_for(Seat::P1);
    assert_eq!(snap.board, rt.board()[..3].to_vec());
    assert!(snap.is_my_turn());
    assert!(!rt.snapshot_for(Seat::P2).is_my_turn());
}

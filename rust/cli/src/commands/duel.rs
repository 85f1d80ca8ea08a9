//! `duel`: one match through a local room, both seats played by policies.
//!
//! The room runs exactly as it would behind a transport: each seat only
//! sees its own event stream and acts when its snapshot says it is on turn.

use crate::config;
use crate::error::CliError;
use crate::policy::{Policy, SeatBrain};
use crate::ui;
use holdem_shot_engine::engine::Seat;
use holdem_shot_engine::events::{CoreEvent, EndReason};
use holdem_shot_rooms::logging::{init_logging, LogFormat};
use holdem_shot_rooms::{RoomError, RoomId, RoomManager, RoomSettings, SeatEvent, SeatPayload};
use std::io::Write;
use std::time::Duration;

const DUEL_TIMEOUT: Duration = Duration::from_secs(30);

pub fn handle_duel_command(
    seed: Option<u64>,
    policy: Option<Policy>,
    log: Option<LogFormat>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let policy = policy.unwrap_or(cfg.policy);

    if let Some(format) = log
        && let Err(e) = init_logging(format)
    {
        ui::display_warning(err, &e.to_string())?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Policy: {}", policy.as_str())?;

    let manager = RoomManager::new(RoomSettings::immediate());
    let played = runtime.block_on(async {
        tokio::time::timeout(DUEL_TIMEOUT, play(&manager, seed, policy, out, err)).await
    });
    match played {
        Ok(result) => result,
        Err(_) => Err(CliError::Engine(format!(
            "match did not finish within {}s",
            DUEL_TIMEOUT.as_secs()
        ))),
    }
}

async fn play(
    manager: &RoomManager,
    seed: u64,
    policy: Policy,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut room = manager.open_room(seed)?;
    let room_id = room.room_id.clone();
    tracing::info!(room_id = %room_id, seed, policy = policy.as_str(), "duel started");
    let mut brains = [
        SeatBrain::new(policy, seed ^ 0x5031),
        SeatBrain::new(policy, seed ^ 0x5032),
    ];
    let mut finished = [false, false];
    let mut ending: Option<(Seat, u32, EndReason)> = None;

    while !(finished[0] && finished[1]) {
        let event = tokio::select! {
            Some(ev) = room.p1.receiver.recv(), if !finished[0] => ev,
            Some(ev) = room.p2.receiver.recv(), if !finished[1] => ev,
            else => break,
        };
        let seat = event.seat;
        if let SeatPayload::Event(CoreEvent::MatchOver {
            round,
            winner,
            reason,
        }) = &event.payload
        {
            finished[seat.index()] = true;
            ending = Some((*winner, *round, *reason));
        }
        act(manager, &room_id, &mut brains, &event, err).await?;
        if let SeatPayload::Event(core) = &event.payload {
            writeln!(out, "[{:?}] {}", seat, describe(core))?;
        }
    }

    // a decided room closes itself; this only matters if the streams ended early
    match manager.teardown(&room_id) {
        Ok(()) | Err(RoomError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }
    match ending {
        Some((winner, round, reason)) => writeln!(
            out,
            "Winner: {:?} in round {} ({:?})",
            winner, round, reason
        )?,
        None => writeln!(out, "No winner")?,
    }
    Ok(())
}

/// Answers a snapshot that puts its seat on turn.
async fn act(
    manager: &RoomManager,
    room_id: &RoomId,
    brains: &mut [SeatBrain; 2],
    event: &SeatEvent,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let SeatPayload::Snapshot(view) = &event.payload else {
        return Ok(());
    };
    if !view.is_my_turn() {
        return Ok(());
    }
    let slots = brains[view.seat.index()].choose(&view.own_hand, view.exchange_budget_remaining);
    match manager.submit_exchange(room_id, view.seat, slots).await {
        Ok(()) => Ok(()),
        // a snapshot can trail the room by one transition
        Err(e @ RoomError::Rejected(_)) => {
            ui::display_warning(err, &format!("{:?}: {}", view.seat, e))?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn describe(event: &CoreEvent) -> String {
    match event {
        CoreEvent::PhaseChanged { phase, round, turn } => match turn {
            Some(seat) => format!("round {}: {:?}, {:?} to act", round, phase, seat),
            None => format!("round {}: {:?}", round, phase),
        },
        CoreEvent::ExchangeMade { seat, slots } if slots.is_empty() => {
            format!("{:?} stands pat", seat)
        }
        CoreEvent::ExchangeMade { seat, slots } => {
            format!("{:?} exchanges slots {:?}", seat, slots)
        }
        CoreEvent::ShowdownResult {
            round,
            winner,
            labels,
        } => {
            let verdict = match winner {
                Some(seat) => format!("{:?} wins", seat),
                None => "tie".to_string(),
            };
            format!(
                "round {} showdown: P1 {} / P2 {}, {}",
                round,
                labels.get(Seat::P1),
                labels.get(Seat::P2),
                verdict
            )
        }
        CoreEvent::RouletteOutcome { round, outcome } => {
            let result = if outcome.exempt {
                "exempt (Joker)"
            } else if outcome.hit {
                "hit"
            } else {
                "survived"
            };
            format!(
                "round {} draw for {:?}: {} bullet(s), {}",
                round, outcome.loser, outcome.bullets_loaded, result
            )
        }
        CoreEvent::MatchOver {
            round,
            winner,
            reason,
        } => format!("match over in round {}: {:?} wins ({:?})", round, winner, reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn duel_runs_to_a_winner() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_duel_command(Some(11), Some(Policy::Random), None, &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Seed: 11"));
        assert!(text.contains("[P1] match over"));
        assert!(text.contains("[P2] match over"));
        assert!(text.lines().last().unwrap().starts_with("Winner: "));
    }

    #[test]
    fn stand_pat_is_described() {
        let text = describe(&CoreEvent::ExchangeMade {
            seat: Seat::P2,
            slots: vec![],
        });
        assert_eq!(text, "P2 stands pat");
    }
}

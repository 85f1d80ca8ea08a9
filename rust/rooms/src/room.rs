//! The per-room actor.
//!
//! Each room is one tokio task that owns its [`Match`]. Seat actions, status
//! queries and timer callbacks all arrive on the same bounded channel and are
//! applied one at a time, so a match never sees two actions at once. Timers
//! only hold a weak sender and carry the [`Stamp`] they were scheduled
//! against; the match refuses any step whose stamp has gone stale.

use crate::events::EventBus;
use crate::settings::RoomSettings;
use holdem_shot_engine::engine::{Phase, Seat};
use holdem_shot_engine::errors::GameError;
use holdem_shot_engine::events::{Emitted, StateSnapshot};
use holdem_shot_engine::game::{Match, MatchResult, ScheduledStep, Stamp};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

pub type RoomId = String;

pub(crate) type Reply<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub(crate) enum RoomCommand {
    Exchange {
        seat: Seat,
        indices: Vec<usize>,
        reply: Reply<Result<(), GameError>>,
    },
    Surrender {
        seat: Seat,
        reply: Reply<Result<(), GameError>>,
    },
    Disconnect {
        seat: Seat,
        reply: Reply<Result<(), GameError>>,
    },
    Snapshot {
        seat: Seat,
        reply: Reply<StateSnapshot>,
    },
    Status {
        reply: Reply<RoomStatus>,
    },
    TimerFired {
        step: ScheduledStep,
        stamp: Stamp,
    },
}

/// Seat-independent view of a room, safe to show either seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStatus {
    pub room_id: RoomId,
    pub seed: u64,
    pub round: u32,
    pub phase: Phase,
    pub turn: Option<Seat>,
    pub result: Option<MatchResult>,
    pub rounds_settled: usize,
}

pub(crate) struct RoomActor {
    room_id: RoomId,
    game: Match,
    settings: RoomSettings,
    bus: EventBus,
    timer_tx: mpsc::WeakSender<RoomCommand>,
    timer: Option<JoinHandle<()>>,
    announced_end: bool,
}

impl RoomActor {
    pub(crate) fn new(
        room_id: RoomId,
        game: Match,
        settings: RoomSettings,
        bus: EventBus,
        timer_tx: mpsc::WeakSender<RoomCommand>,
    ) -> Self {
        Self {
            room_id,
            game,
            settings,
            bus,
            timer_tx,
            timer: None,
            announced_end: false,
        }
    }

    /// Publishes the opening events, then serves commands until the match
    /// is over with nothing left to publish, or every strong sender is gone.
    pub(crate) async fn run(mut self, mut commands: mpsc::Receiver<RoomCommand>, opening: Vec<Emitted>) {
        self.after_transition(opening);
        while !self.finished() {
            let Some(command) = commands.recv().await else {
                break;
            };
            self.handle(command);
        }
        tracing::debug!(
            room_id = %self.room_id,
            finished = self.finished(),
            "room actor stopped"
        );
    }

    fn finished(&self) -> bool {
        self.game.is_over() && self.game.pending_step().is_none()
    }

    fn handle(&mut self, command: RoomCommand) {
        match command {
            RoomCommand::Exchange {
                seat,
                indices,
                reply,
            } => {
                let result = self.game.submit_exchange(seat, &indices);
                let _ = reply.send(self.settle("exchange", seat, result));
            }
            RoomCommand::Surrender { seat, reply } => {
                let result = self.game.surrender(seat);
                let _ = reply.send(self.settle("surrender", seat, result));
            }
            RoomCommand::Disconnect { seat, reply } => {
                let result = self.game.disconnect(seat);
                let _ = reply.send(self.settle("disconnect", seat, result));
            }
            RoomCommand::Snapshot { seat, reply } => {
                let _ = reply.send(self.game.snapshot_for(seat));
            }
            RoomCommand::Status { reply } => {
                let _ = reply.send(self.status());
            }
            RoomCommand::TimerFired { step, stamp } => match self.game.apply_scheduled(step, stamp) {
                Ok(events) => self.after_transition(events),
                Err(err) => {
                    tracing::debug!(
                        room_id = %self.room_id,
                        step = ?step,
                        round = stamp.round,
                        generation = stamp.generation,
                        error = %err,
                        "ignoring stale timer"
                    );
                }
            },
        }
    }

    /// Fans out an accepted action or logs the rejected one; the caller gets
    /// the verdict either way.
    fn settle(
        &mut self,
        action: &'static str,
        seat: Seat,
        result: Result<Vec<Emitted>, GameError>,
    ) -> Result<(), GameError> {
        match result {
            Ok(events) => {
                tracing::debug!(
                    room_id = %self.room_id,
                    seat = ?seat,
                    action,
                    round = self.game.round(),
                    phase = ?self.game.phase(),
                    "action applied"
                );
                self.after_transition(events);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    room_id = %self.room_id,
                    seat = ?seat,
                    action,
                    error = %err,
                    "action rejected"
                );
                Err(err)
            }
        }
    }

    fn after_transition(&mut self, events: Vec<Emitted>) {
        for emitted in &events {
            self.bus.publish(&self.room_id, emitted);
        }
        for seat in Seat::BOTH {
            self.bus
                .publish_snapshot(&self.room_id, self.game.snapshot_for(seat));
        }
        if let (Some(result), false) = (self.game.result(), self.announced_end) {
            self.announced_end = true;
            tracing::info!(
                room_id = %self.room_id,
                round = result.round,
                winner = ?result.winner,
                reason = ?result.reason,
                "match decided"
            );
        }
        self.schedule_pending();
    }

    /// Replaces the outstanding timer with one for the step the match is
    /// waiting on now.
    fn schedule_pending(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let Some(step) = self.game.pending_step() else {
            return;
        };
        let Some(delay) = self.settings.delay_for(step) else {
            return;
        };
        let stamp = self.game.stamp();
        let tx = self.timer_tx.clone();
        tracing::trace!(
            room_id = %self.room_id,
            step = ?step,
            delay_ms = delay.as_millis() as u64,
            "timer scheduled"
        );
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(RoomCommand::TimerFired { step, stamp }).await;
            }
        }));
    }

    fn status(&self) -> RoomStatus {
        RoomStatus {
            room_id: self.room_id.clone(),
            seed: self.game.seed(),
            round: self.game.round(),
            phase: self.game.phase(),
            turn: self.game.runtime().turn(),
            result: self.game.result(),
            rounds_settled: self.game.records().len(),
        }
    }
}

impl Drop for RoomActor {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

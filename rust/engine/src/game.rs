use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Phase, Runtime, Seat};
use crate::errors::GameError;
use crate::events::{CoreEvent, Emitted, EndReason, SeatLabels, StateSnapshot};
use crate::logger::{RoundOutcome, RoundRecord, ShowdownInfo};
use crate::roulette::{spin, RouletteOutcome, RouletteSetup};
use crate::rules::{validate_exchange, ValidatedExchange};

/// Identifies the exact state a deferred step was scheduled against.
///
/// The generation moves on every transition, so a timer that fires after the
/// match advanced (or ended) carries a stamp that no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamp {
    pub round: u32,
    pub generation: u64,
}

/// Deferred transitions a scheduler drives on behalf of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledStep {
    /// Dealing is over, show the flop
    RevealFlop,
    /// Publish the elimination draw that was already decided
    RevealRoulette,
    /// Tie or survived draw, deal the next round
    StartNextRound,
    /// The seat on turn let its exchange window lapse; it keeps both cards
    TurnTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Seat,
    pub loser: Seat,
    pub reason: EndReason,
    pub round: u32,
}

/// Owns everything about one two-seat match.
///
/// All mutation goes through `&mut self`, so whoever owns the `Match` (a
/// room actor, a simulation loop) serializes the actions for it.
#[derive(Debug)]
pub struct Match {
    seed: u64,
    rng: ChaCha20Rng,
    round: u32,
    runtime: Runtime,
    generation: u64,
    /// Decided at showdown, published by [`Match::reveal_roulette`]
    unrevealed: Option<RouletteOutcome>,
    result: Option<MatchResult>,
    records: Vec<RoundRecord>,
}

impl Match {
    /// Starts round 1 in [`Phase::Dealing`].
    pub fn start(seed: u64) -> (Self, Vec<Emitted>) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let runtime = deal_round(&mut rng, 1);
        let m = Self {
            seed,
            rng,
            round: 1,
            runtime,
            generation: 0,
            unrevealed: None,
            result: None,
            records: Vec::new(),
        };
        let events = vec![m.phase_event()];
        (m, events)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.runtime.phase()
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Records of every round settled so far.
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn stamp(&self) -> Stamp {
        Stamp {
            round: self.round,
            generation: self.generation,
        }
    }

    pub fn snapshot_for(&self, seat: Seat) -> StateSnapshot {
        self.runtime.snapshot_for(seat)
    }

    /// The deferred step the current state is waiting on, if any.
    pub fn pending_step(&self) -> Option<ScheduledStep> {
        if self.unrevealed.is_some() {
            return Some(ScheduledStep::RevealRoulette);
        }
        if self.is_over() {
            return None;
        }
        match self.phase() {
            Phase::Dealing => Some(ScheduledStep::RevealFlop),
            p if p.is_exchange() => Some(ScheduledStep::TurnTimeout),
            Phase::Showdown | Phase::Roulette => Some(ScheduledStep::StartNextRound),
            _ => None,
        }
    }

    /// Whether a step scheduled against `stamp` may still run.
    pub fn accepts(&self, step: ScheduledStep, stamp: Stamp) -> bool {
        stamp == self.stamp() && self.pending_step() == Some(step)
    }

    /// Runs a deferred step, refusing it when it has gone stale.
    pub fn apply_scheduled(
        &mut self,
        step: ScheduledStep,
        stamp: Stamp,
    ) -> Result<Vec<Emitted>, GameError> {
        if !self.accepts(step, stamp) {
            return Err(GameError::StaleStep {
                round: stamp.round,
                generation: stamp.generation,
            });
        }
        match step {
            ScheduledStep::RevealFlop => self.reveal_flop(),
            ScheduledStep::RevealRoulette => self.reveal_roulette(),
            ScheduledStep::StartNextRound => self.begin_next_round(),
            ScheduledStep::TurnTimeout => match self.runtime.turn() {
                Some(seat) => self.apply_exchange(seat, ValidatedExchange::stand()),
                None => Err(GameError::WrongPhase {
                    phase: self.phase(),
                }),
            },
        }
    }

    /// Dealing → FlopExchange: shows the first three board cards.
    pub fn reveal_flop(&mut self) -> Result<Vec<Emitted>, GameError> {
        self.ensure_live()?;
        self.runtime.reveal_flop()?;
        self.generation += 1;
        Ok(vec![self.phase_event()])
    }

    /// Applies a seat's discard request for the open exchange window.
    ///
    /// A rejected request changes nothing. When the request closes the river
    /// window the showdown and the elimination draw are settled on the spot.
    pub fn submit_exchange(
        &mut self,
        seat: Seat,
        indices: &[usize],
    ) -> Result<Vec<Emitted>, GameError> {
        self.ensure_live()?;
        self.runtime.ensure_can_act(seat)?;
        let budget = self.runtime.exchange_state(seat).budget_remaining;
        let validated = validate_exchange(indices, budget)?;
        self.apply_exchange(seat, validated)
    }

    fn apply_exchange(
        &mut self,
        seat: Seat,
        exchange: ValidatedExchange,
    ) -> Result<Vec<Emitted>, GameError> {
        let applied = self.runtime.submit_exchange(seat, &exchange)?;
        self.generation += 1;
        let mut events = vec![Emitted::to_seat(
            seat.other(),
            CoreEvent::ExchangeMade {
                seat,
                slots: applied.slots,
            },
        )];
        if applied.window_closed {
            events.push(self.phase_event());
            if applied.phase == Phase::Showdown {
                events.extend(self.resolve_showdown());
            }
        }
        Ok(events)
    }

    fn resolve_showdown(&mut self) -> Vec<Emitted> {
        let [p1, p2] = self.runtime.evaluate_both();
        let winner = match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => Some(Seat::P1),
            std::cmp::Ordering::Less => Some(Seat::P2),
            std::cmp::Ordering::Equal => None,
        };
        let labels = SeatLabels {
            p1: p1.label(),
            p2: p2.label(),
        };
        let showdown = ShowdownInfo {
            winner,
            labels: labels.clone(),
        };
        let mut events = vec![Emitted::to_both(CoreEvent::ShowdownResult {
            round: self.round,
            winner,
            labels,
        })];

        let Some(winner) = winner else {
            self.push_record(Some(showdown), RoundOutcome::Tie);
            return events;
        };

        let loser = winner.other();
        let setup = RouletteSetup::new(
            loser,
            self.round,
            self.runtime.has_joker(loser),
            self.runtime.has_joker(winner),
        );
        let outcome = spin(&setup, &mut self.rng);
        self.push_record(
            Some(showdown),
            RoundOutcome::Roulette {
                outcome: outcome.clone(),
            },
        );
        // hit or not, nothing observable changes until the reveal
        self.runtime.set_phase(Phase::Roulette);
        self.unrevealed = Some(outcome);
        self.generation += 1;
        events.push(self.phase_event());
        events
    }

    /// Publishes the elimination draw decided at showdown. On a hit this is
    /// where the match ends and the match-over notice goes out.
    pub fn reveal_roulette(&mut self) -> Result<Vec<Emitted>, GameError> {
        let Some(outcome) = self.unrevealed.take() else {
            return Err(GameError::WrongPhase {
                phase: self.phase(),
            });
        };
        self.generation += 1;
        let hit = outcome.hit.then(|| MatchResult {
            winner: outcome.loser.other(),
            loser: outcome.loser,
            reason: EndReason::Showdown,
            round: self.round,
        });
        let mut events = vec![Emitted::to_both(CoreEvent::RouletteOutcome {
            round: self.round,
            outcome,
        })];
        if let Some(result) = hit {
            self.result = Some(result);
            self.runtime.set_phase(Phase::MatchOver);
            events.push(Emitted::to_both(CoreEvent::MatchOver {
                round: result.round,
                winner: result.winner,
                reason: result.reason,
            }));
        }
        Ok(events)
    }

    /// Replaces the round wholesale after a tie or a survived draw.
    pub fn begin_next_round(&mut self) -> Result<Vec<Emitted>, GameError> {
        self.ensure_live()?;
        let ready = match self.phase() {
            Phase::Showdown => true,
            Phase::Roulette => self.unrevealed.is_none(),
            _ => false,
        };
        if !ready {
            return Err(GameError::WrongPhase {
                phase: self.phase(),
            });
        }
        self.round += 1;
        self.runtime = deal_round(&mut self.rng, self.round);
        self.generation += 1;
        Ok(vec![self.phase_event()])
    }

    pub fn surrender(&mut self, seat: Seat) -> Result<Vec<Emitted>, GameError> {
        self.forfeit(seat, EndReason::Surrender)
    }

    pub fn disconnect(&mut self, seat: Seat) -> Result<Vec<Emitted>, GameError> {
        self.forfeit(seat, EndReason::Disconnect)
    }

    /// Ends the match at once with `seat` as the loser. No chamber draw runs
    /// for a forfeit and any draw still waiting to be revealed is dropped.
    fn forfeit(&mut self, seat: Seat, reason: EndReason) -> Result<Vec<Emitted>, GameError> {
        self.ensure_live()?;
        let winner = seat.other();
        let settled_already = matches!(self.phase(), Phase::Showdown | Phase::Roulette);
        if !settled_already {
            self.push_record(None, RoundOutcome::Forfeit { loser: seat, reason });
        }
        self.unrevealed = None;
        self.result = Some(MatchResult {
            winner,
            loser: seat,
            reason,
            round: self.round,
        });
        self.runtime.set_phase(Phase::MatchOver);
        self.generation += 1;
        Ok(vec![Emitted::to_both(CoreEvent::MatchOver {
            round: self.round,
            winner,
            reason,
        })])
    }

    fn ensure_live(&self) -> Result<(), GameError> {
        if self.is_over() {
            Err(GameError::MatchOver)
        } else {
            Ok(())
        }
    }

    fn phase_event(&self) -> Emitted {
        Emitted::to_both(CoreEvent::PhaseChanged {
            phase: self.phase(),
            round: self.round,
            turn: self.runtime.turn(),
        })
    }

    fn push_record(&mut self, showdown: Option<ShowdownInfo>, outcome: RoundOutcome) {
        let rt = &self.runtime;
        self.records.push(RoundRecord {
            match_id: None,
            round: rt.round(),
            deck_seed: rt.deck_seed(),
            opener: rt.opener(),
            board: *rt.board(),
            hands: [*rt.hand(Seat::P1), *rt.hand(Seat::P2)],
            exchanges: rt.exchanges().to_vec(),
            showdown,
            outcome,
            ts: None,
        });
    }

    #[cfg(test)]
    pub(crate) fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }
}

fn deal_round(rng: &mut ChaCha20Rng, round: u32) -> Runtime {
    let opener = if rng.random_bool(0.5) {
        Seat::P1
    } else {
        Seat::P2
    };
    Runtime::deal(round, rng.random(), opener)
}

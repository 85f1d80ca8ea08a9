use crate::errors::RoomError;
use crate::events::{EventBus, EventSubscription};
use crate::room::{RoomActor, RoomCommand, RoomId, RoomStatus};
use crate::settings::RoomSettings;
use chrono::{DateTime, Utc};
use holdem_shot_engine::engine::Seat;
use holdem_shot_engine::events::StateSnapshot;
use holdem_shot_engine::game::Match;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;
use uuid::Uuid;

type RoomMap = Arc<RwLock<HashMap<RoomId, RoomHandle>>>;

#[derive(Debug)]
struct RoomHandle {
    commands: mpsc::Sender<RoomCommand>,
    actor: AbortHandle,
    opened_at: DateTime<Utc>,
}

/// A freshly paired room with one event subscription per seat, registered
/// before the first event went out.
pub struct OpenedRoom {
    pub room_id: RoomId,
    pub p1: EventSubscription,
    pub p2: EventSubscription,
}

/// Directory of live rooms. Each room is served by its own actor task; the
/// manager only routes commands to it. A room leaves the directory when its
/// match ends or it is torn down.
#[derive(Debug)]
pub struct RoomManager {
    rooms: RoomMap,
    bus: EventBus,
    settings: RoomSettings,
}

impl RoomManager {
    pub fn new(settings: RoomSettings) -> Self {
        Self::with_bus(EventBus::new(), settings)
    }

    pub fn with_bus(bus: EventBus, settings: RoomSettings) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            bus,
            settings,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn settings(&self) -> &RoomSettings {
        &self.settings
    }

    /// Deals round 1 of a new match and starts the room's actor.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open_room(&self, seed: u64) -> Result<OpenedRoom, RoomError> {
        let room_id = Uuid::new_v4().to_string();
        let p1 = self.bus.subscribe(room_id.clone(), Seat::P1);
        let p2 = self.bus.subscribe(room_id.clone(), Seat::P2);

        let (game, opening) = Match::start(seed);
        let (tx, rx) = mpsc::channel(self.settings.command_buffer);
        let actor = RoomActor::new(
            room_id.clone(),
            game,
            self.settings.clone(),
            self.bus.clone(),
            tx.downgrade(),
        );

        tracing::info!(room_id = %room_id, seed, "opening room");

        {
            let mut guard = self
                .rooms
                .write()
                .map_err(|_| RoomError::StoragePoisoned)?;
            let task = tokio::spawn(actor.run(rx, opening));
            guard.insert(
                room_id.clone(),
                RoomHandle {
                    commands: tx,
                    actor: task.abort_handle(),
                    opened_at: Utc::now(),
                },
            );
            tokio::spawn(watch_actor(
                room_id.clone(),
                task,
                self.rooms.clone(),
                self.bus.clone(),
            ));
        }

        Ok(OpenedRoom { room_id, p1, p2 })
    }

    /// Another subscription for a seat, e.g. after a transport reconnect.
    pub fn subscribe(&self, room_id: &RoomId, seat: Seat) -> Result<EventSubscription, RoomError> {
        self.sender(room_id)?;
        Ok(self.bus.subscribe(room_id.clone(), seat))
    }

    pub async fn submit_exchange(
        &self,
        room_id: &RoomId,
        seat: Seat,
        indices: Vec<usize>,
    ) -> Result<(), RoomError> {
        let verdict = self
            .request(room_id, |reply| RoomCommand::Exchange {
                seat,
                indices,
                reply,
            })
            .await?;
        verdict.map_err(RoomError::from)
    }

    pub async fn submit_surrender(&self, room_id: &RoomId, seat: Seat) -> Result<(), RoomError> {
        let verdict = self
            .request(room_id, |reply| RoomCommand::Surrender { seat, reply })
            .await?;
        verdict.map_err(RoomError::from)
    }

    /// The transport lost `seat`; the match is forfeited on its behalf.
    pub async fn disconnect(&self, room_id: &RoomId, seat: Seat) -> Result<(), RoomError> {
        tracing::info!(room_id = %room_id, seat = ?seat, "seat disconnected");
        let verdict = self
            .request(room_id, |reply| RoomCommand::Disconnect { seat, reply })
            .await?;
        verdict.map_err(RoomError::from)
    }

    pub async fn snapshot(&self, room_id: &RoomId, seat: Seat) -> Result<StateSnapshot, RoomError> {
        self.request(room_id, |reply| RoomCommand::Snapshot { seat, reply })
            .await
    }

    pub async fn status(&self, room_id: &RoomId) -> Result<RoomStatus, RoomError> {
        self.request(room_id, |reply| RoomCommand::Status { reply })
            .await
    }

    pub fn opened_at(&self, room_id: &RoomId) -> Result<DateTime<Utc>, RoomError> {
        let guard = self
            .rooms
            .read()
            .map_err(|_| RoomError::StoragePoisoned)?;
        guard
            .get(room_id)
            .map(|handle| handle.opened_at)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }

    /// Stops the room at once. Queued commands are dropped unanswered and
    /// the pending timer is cancelled with the actor.
    pub fn teardown(&self, room_id: &RoomId) -> Result<(), RoomError> {
        let handle = {
            let mut guard = self
                .rooms
                .write()
                .map_err(|_| RoomError::StoragePoisoned)?;
            guard
                .remove(room_id)
                .ok_or_else(|| RoomError::NotFound(room_id.clone()))?
        };
        handle.actor.abort();
        self.bus.drop_room(room_id);
        tracing::info!(room_id = %room_id, "room torn down");
        Ok(())
    }

    /// Rooms whose actor is still serving commands.
    pub fn active_rooms(&self) -> usize {
        match self.rooms.read() {
            Ok(guard) => guard
                .values()
                .filter(|handle| !handle.commands.is_closed())
                .count(),
            Err(_) => 0,
        }
    }

    fn sender(&self, room_id: &RoomId) -> Result<mpsc::Sender<RoomCommand>, RoomError> {
        let guard = self
            .rooms
            .read()
            .map_err(|_| RoomError::StoragePoisoned)?;
        guard
            .get(room_id)
            .map(|handle| handle.commands.clone())
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }

    async fn request<T>(
        &self,
        room_id: &RoomId,
        command: impl FnOnce(oneshot::Sender<T>) -> RoomCommand,
    ) -> Result<T, RoomError> {
        let sender = self.sender(room_id)?;
        let (reply, response) = oneshot::channel();
        sender
            .send(command(reply))
            .await
            .map_err(|_| RoomError::Closed(room_id.clone()))?;
        response
            .await
            .map_err(|_| RoomError::Closed(room_id.clone()))
    }
}

/// Waits for a room actor to end, then drops the room from the directory and
/// closes its subscriptions. A panic takes down only its own room.
async fn watch_actor(
    room_id: RoomId,
    task: tokio::task::JoinHandle<()>,
    rooms: RoomMap,
    bus: EventBus,
) {
    let outcome = task.await;
    let removed = match rooms.write() {
        Ok(mut guard) => guard.remove(&room_id).is_some(),
        Err(poisoned) => poisoned.into_inner().remove(&room_id).is_some(),
    };
    bus.drop_room(&room_id);
    match outcome {
        Ok(()) => {
            if removed {
                tracing::info!(room_id = %room_id, "room closed after match end");
            }
        }
        Err(err) if err.is_panic() => {
            tracing::error!(room_id = %room_id, "room actor panicked; room closed");
        }
        Err(_) => {
            tracing::debug!(room_id = %room_id, "room actor cancelled");
        }
    }
}

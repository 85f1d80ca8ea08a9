use crate::room::RoomId;
use holdem_shot_engine::engine::Seat;
use holdem_shot_engine::events::{CoreEvent, Emitted, StateSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

// Bounded per subscriber; a subscriber that falls this far behind is dropped
const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<SeatEvent>;
pub type EventReceiver = mpsc::Receiver<SeatEvent>;

/// What one seat receives from its room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatEvent {
    pub room_id: RoomId,
    pub seat: Seat,
    pub payload: SeatPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SeatPayload {
    Event(CoreEvent),
    /// The round re-rendered for this seat after a transition
    Snapshot(StateSnapshot),
}

pub struct EventSubscription {
    bus: EventBus,
    room_id: RoomId,
    subscriber_id: usize,
    pub seat: Seat,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.room_id, self.subscriber_id);
    }
}

#[derive(Debug)]
struct Subscriber {
    id: usize,
    seat: Seat,
    sender: EventSender,
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<RoomId, Vec<Subscriber>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, room_id: RoomId, seat: Seat) -> EventSubscription {
        let (subscriber_id, receiver) = self.subscribe_raw(room_id.clone(), seat);
        EventSubscription {
            bus: self.clone(),
            room_id,
            subscriber_id,
            seat,
            receiver,
        }
    }

    fn subscribe_raw(&self, room_id: RoomId, seat: Seat) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        let mut guard = match self.inner.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entry(room_id.clone()).or_default().push(Subscriber {
            id,
            seat,
            sender: tx,
        });

        tracing::info!(
            room_id = %room_id,
            seat = ?seat,
            subscriber_id = id,
            "seat subscribed to room events"
        );

        (id, rx)
    }

    /// Fans an engine event out to every seat in its audience.
    pub fn publish(&self, room_id: &RoomId, emitted: &Emitted) {
        for seat in Seat::BOTH {
            if emitted.audience.includes(seat) {
                self.send_to_seat(room_id, seat, SeatPayload::Event(emitted.event.clone()));
            }
        }
    }

    pub fn publish_snapshot(&self, room_id: &RoomId, snapshot: StateSnapshot) {
        self.send_to_seat(room_id, snapshot.seat, SeatPayload::Snapshot(snapshot));
    }

    pub fn send_to_seat(&self, room_id: &RoomId, seat: Seat, payload: SeatPayload) {
        tracing::trace!(
            room_id = %room_id,
            seat = ?seat,
            payload = ?payload,
            "delivering seat event"
        );

        let targets: Vec<(usize, EventSender)> = {
            let guard = match self.inner.subscribers.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            match guard.get(room_id) {
                Some(list) => list
                    .iter()
                    .filter(|s| s.seat == seat)
                    .map(|s| (s.id, s.sender.clone()))
                    .collect(),
                None => Vec::new(),
            }
        };

        if targets.is_empty() {
            tracing::debug!(room_id = %room_id, seat = ?seat, "no subscribers for seat");
            return;
        }

        let event = SeatEvent {
            room_id: room_id.clone(),
            seat,
            payload,
        };
        let mut failed = Vec::new();
        for (id, sender) in targets {
            // never block the room actor on a slow reader
            if let Err(e) = sender.try_send(event.clone()) {
                tracing::warn!(
                    room_id = %room_id,
                    subscriber_id = id,
                    error = ?e,
                    "failed to send event to subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(room_id, &failed);
        }
    }

    pub fn unsubscribe(&self, room_id: &RoomId, subscriber_id: usize) {
        self.remove_subscribers(room_id, &[subscriber_id]);
    }

    pub fn drop_room(&self, room_id: &RoomId) {
        let mut guard = match self.inner.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(room_id);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = match self.inner.subscribers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, room_id: &RoomId, ids: &[usize]) {
        let mut guard = match self.inner.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(list) = guard.get_mut(room_id) {
            list.retain(|s| !ids.contains(&s.id));
            if list.is_empty() {
                guard.remove(room_id);
            }
        }
    }
}

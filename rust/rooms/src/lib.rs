//! Room service for Hold'em & Shot matches.
//!
//! [`RoomManager`] opens rooms, routes seat actions to them and tears them
//! down. Every room is a single tokio task that owns its match, so actions
//! for one room are applied strictly in order while separate rooms run in
//! parallel. Per-seat events arrive through [`EventSubscription`]s; a
//! transport layer forwards them to its clients. A room closes itself once
//! its match is decided and the last events have gone out.
//!
//! ```no_run
//! use holdem_shot_engine::engine::Seat;
//! use holdem_shot_rooms::{RoomManager, RoomSettings};
//!
//! # async fn demo() -> Result<(), holdem_shot_rooms::RoomError> {
//! let manager = RoomManager::new(RoomSettings::default());
//! let mut room = manager.open_room(42)?;
//! while let Some(event) = room.p1.receiver.recv().await {
//!     println!("{:?}", event.payload);
//! }
//! manager.submit_surrender(&room.room_id, Seat::P2).await?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod events;
pub mod logging;
pub mod manager;
pub mod room;
pub mod settings;

pub use errors::RoomError;
pub use events::{EventBus, EventSubscription, SeatEvent, SeatPayload};
pub use manager::{OpenedRoom, RoomManager};
pub use room::{RoomId, RoomStatus};
pub use settings::{RoomSettings, SettingsError};

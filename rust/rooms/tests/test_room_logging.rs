use std::time::Duration;

use holdem_shot_engine::engine::Seat;
use holdem_shot_rooms::logging::init_test_logging;
use holdem_shot_rooms::{RoomError, RoomManager, RoomSettings};
use tracing::Level;

#[tokio::test]
async fn room_lifecycle_is_logged_with_room_id() {
    let logs = init_test_logging();
    let manager = RoomManager::new(RoomSettings::immediate());
    let room = manager.open_room(99).unwrap();
    let room_id = room.room_id.clone();

    // a rejected action is logged at debug, not as an error
    let _ = manager.submit_exchange(&room_id, Seat::P1, vec![5]).await;
    manager.submit_surrender(&room_id, Seat::P1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    // the finished room already left the directory
    assert!(matches!(
        manager.teardown(&room_id),
        Err(RoomError::NotFound(_))
    ));

    let live = manager.open_room(100).unwrap();
    manager.teardown(&live.room_id).unwrap();

    let logged_for = |needle: &str, id: &str| {
        logs.matching(needle)
            .into_iter()
            .filter(|e| e.field("room_id").is_some_and(|v| v.contains(id)))
            .collect::<Vec<_>>()
    };
    let ours = |needle: &str| logged_for(needle, &room_id);

    let opened = ours("opening room");
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].level, Level::INFO);
    assert_eq!(opened[0].field("seed"), Some("99"));

    let rejected = ours("action rejected");
    assert!(rejected.iter().all(|e| e.level == Level::DEBUG));
    assert!(!rejected.is_empty());

    let decided = ours("match decided");
    assert_eq!(decided.len(), 1);
    assert!(decided[0]
        .field("reason")
        .is_some_and(|v| v.contains("Surrender")));

    assert_eq!(ours("room closed after match end").len(), 1);
    assert!(ours("room torn down").is_empty());
    assert_eq!(logged_for("room torn down", &live.room_id).len(), 1);
    assert!(logs.entries().iter().all(|e| e.level != Level::ERROR));
}

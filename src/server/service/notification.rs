//! Room based fan-out of real-time notifications.
//!
//! Every user listens on their own room (`student_<id>` or `owner_<id>`) and administrators share
//! the `admin` room. Publishing is fire-and-forget: an event for a room nobody listens to is
//! dropped, and lagging subscribers miss events rather than slowing publishers down.

use std::{collections::HashMap, fmt, sync::Arc};

use entity::sea_orm_active_enums::UserRole;
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};

use crate::model::notification::NotificationDto;

/// Events buffered per room before slow subscribers start lagging
const ROOM_CAPACITY: usize = 64;

pub const NEW_BOOKING_REQUEST: &str = "new_booking_request";
pub const BOOKING_RESPONSE: &str = "booking_response";
pub const BOOKING_CANCELLED: &str = "booking_cancelled";
pub const CHECKED_IN: &str = "checked_in";
pub const CHECKED_OUT: &str = "checked_out";
pub const HOSTEL_APPROVED: &str = "hostel_approved";
pub const HOSTEL_REJECTED: &str = "hostel_rejected";
pub const NEW_HOSTEL_SUBMITTED: &str = "new_hostel_submitted";
pub const BOOKING_MESSAGE: &str = "booking_message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Student(i32),
    Owner(i32),
    Admin,
}

impl Room {
    /// The personal room of a user, or the shared room for administrators
    pub fn for_user(id: i32, role: UserRole) -> Self {
        match role {
            UserRole::Student => Self::Student(id),
            UserRole::HostelOwner => Self::Owner(id),
            UserRole::Admin => Self::Admin,
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student(id) => write!(f, "student_{}", id),
            Self::Owner(id) => write!(f, "owner_{}", id),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Shared hub of per-room broadcast channels; clones publish to the same rooms.
#[derive(Clone, Default)]
pub struct NotificationHub {
    rooms: Arc<RwLock<HashMap<Room, broadcast::Sender<NotificationDto>>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel of `room`, created on first use. Only subscribing creates channels.
    async fn sender(&self, room: Room) -> broadcast::Sender<NotificationDto> {
        if let Some(sender) = self.rooms.read().await.get(&room) {
            return sender.clone();
        }

        self.rooms
            .write()
            .await
            .entry(room)
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .clone()
    }

    /// Emits `event` with `data` to every subscriber of `room`.
    ///
    /// Never fails: serialization problems are logged and rooms without subscribers drop the event.
    pub async fn publish<T: Serialize>(&self, room: Room, event: &str, data: &T) {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(event, room = %room, "Failed to serialize notification: {}", err);
                return;
            }
        };

        let notification = NotificationDto {
            event: event.to_string(),
            room: room.to_string(),
            data,
        };

        let Some(sender) = self.rooms.read().await.get(&room).cloned() else {
            tracing::debug!(event, room = %room, "No listeners, notification dropped");
            return;
        };
        let delivered = sender.send(notification).unwrap_or(0);

        tracing::debug!(event, room = %room, delivered, "Published notification");
    }

    pub async fn subscribe(&self, room: Room) -> broadcast::Receiver<NotificationDto> {
        self.sender(room).await.subscribe()
    }

    /// Drops the channel of a room once its last subscriber has gone.
    pub async fn prune(&self, room: Room) {
        let mut rooms = self.rooms.write().await;
        if rooms
            .get(&room)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            rooms.remove(&room);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Expect room names to follow the `<role>_<id>` convention
    #[test]
    fn formats_room_names() {
        assert_eq!(Room::Student(4).to_string(), "student_4");
        assert_eq!(Room::for_user(9, UserRole::HostelOwner).to_string(), "owner_9");
        assert_eq!(Room::for_user(1, UserRole::Admin), Room::Admin);
    }

    /// Expect subscribers to receive only events of their own room
    #[tokio::test]
    async fn delivers_to_room_subscribers() {
        let hub = NotificationHub::new();
        let mut owner = hub.subscribe(Room::Owner(1)).await;
        let mut other = hub.subscribe(Room::Owner(2)).await;

        hub.clone()
            .publish(Room::Owner(1), NEW_BOOKING_REQUEST, &json!({ "bookingId": 5 }))
            .await;

        let received = owner.recv().await.unwrap();
        assert_eq!(received.event, NEW_BOOKING_REQUEST);
        assert_eq!(received.room, "owner_1");
        assert_eq!(received.data["bookingId"], 5);
        assert!(other.try_recv().is_err());
    }

    /// Expect publishing without subscribers to be silently dropped
    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let hub = NotificationHub::new();

        hub.publish(Room::Admin, NEW_HOSTEL_SUBMITTED, &json!({})).await;

        let mut admin = hub.subscribe(Room::Admin).await;
        assert!(admin.try_recv().is_err());
    }

    /// Expect events for rooms nobody joined to leave no channel behind
    #[tokio::test]
    async fn publish_creates_no_rooms() {
        let hub = NotificationHub::new();

        for id in 0..100 {
            hub.publish(Room::Student(id), BOOKING_RESPONSE, &json!({ "bookingId": id }))
                .await;
        }
        hub.publish(Room::Admin, NEW_HOSTEL_SUBMITTED, &json!({})).await;

        assert!(hub.rooms.read().await.is_empty());
    }

    /// Expect pruning to keep rooms that still have listeners
    #[tokio::test]
    async fn prunes_only_empty_rooms() {
        let hub = NotificationHub::new();
        let listener = hub.subscribe(Room::Student(3)).await;
        hub.subscribe(Room::Student(4)).await;

        hub.prune(Room::Student(3)).await;
        hub.prune(Room::Student(4)).await;

        let rooms = hub.rooms.read().await;
        assert!(rooms.contains_key(&Room::Student(3)));
        assert!(!rooms.contains_key(&Room::Student(4)));
        drop(listener);
    }
}

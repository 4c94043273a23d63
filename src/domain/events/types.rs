//! Domain events
//!
//! Row-change notifications from the data store and in-process UI
//! signals, broadcast over the application event bus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::booking::SeenRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    RowChanged(RowChangedEvent),
    BookingSeen(BookingSeenEvent),
    NotificationSent(NotificationSentEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::RowChanged(_) => "row_changed",
            Event::BookingSeen(_) => "booking_seen",
            Event::NotificationSent(_) => "notification_sent",
        }
    }

    pub fn booking_id(&self) -> Option<Uuid> {
        match self {
            Event::RowChanged(_) => None,
            Event::BookingSeen(e) => Some(e.booking_id),
            Event::NotificationSent(e) => e.booking_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowChangedEvent {
    pub table: String,
    pub kind: ChangeKind,
    pub row_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl RowChangedEvent {
    pub fn new(table: &str, kind: ChangeKind, row_id: Uuid) -> Self {
        Self {
            table: table.to_string(),
            kind,
            row_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSeenEvent {
    pub booking_id: Uuid,
    pub role: SeenRole,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSentEvent {
    pub message_id: Uuid,
    pub message_type: String,
    pub booking_id: Option<Uuid>,
    pub recipients: usize,
    pub timestamp: DateTime<Utc>,
}

/// Envelope delivered to subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: Uuid,
    pub event: Event,
    pub published_at: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: Uuid::new_v4(),
            event,
            published_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_change_serializes_tagged() {
        let id = Uuid::new_v4();
        let event = Event::RowChanged(RowChangedEvent::new("bookings", ChangeKind::Update, id));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "RowChanged");
        assert_eq!(json["data"]["kind"], "UPDATE");
        assert_eq!(json["data"]["table"], "bookings");
        assert_eq!(event.event_type(), "row_changed");
    }
}

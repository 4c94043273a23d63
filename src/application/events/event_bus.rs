//! In-process event bus
//!
//! A broadcast channel carrying [`EventMessage`]s. Storage adapters
//! announce row writes with [`EventBus::row_changed`]; consumers either
//! take every event ([`EventBus::subscribe`]) or follow one table's
//! change feed ([`EventBus::watch_table`]).

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};
use uuid::Uuid;

use super::types::{ChangeKind, Event, EventMessage, RowChangedEvent};

const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Broadcast `event`; returns how many subscribers received it.
    pub fn publish(&self, event: Event) -> usize {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let delivered = self.sender.send(message).unwrap_or(0);
        debug!(event_type, delivered, "Event published");
        delivered
    }

    /// Announce an insert, update or delete of one row.
    pub fn row_changed(&self, table: &str, kind: ChangeKind, row_id: Uuid) -> usize {
        self.publish(Event::RowChanged(RowChangedEvent::new(table, kind, row_id)))
    }

    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    /// Follow the change feed of `table` only.
    pub fn watch_table(&self, table: impl Into<String>) -> TableChanges {
        TableChanges {
            table: table.into(),
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Every event on the bus. A lagging subscriber skips what it missed.
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
}

impl EventSubscriber {
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(msg) => return Some(msg),
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Event subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// One item of a table change feed
#[derive(Debug, Clone)]
pub enum TableChange {
    Row(RowChangedEvent),
    /// The feed overflowed; an unknown number of rows changed.
    Missed(u64),
}

/// Change feed of a single table.
///
/// Unlike [`EventSubscriber`], an overflow is reported as
/// [`TableChange::Missed`] instead of being skipped, so a consumer that
/// mirrors the table knows to reload it.
pub struct TableChanges {
    table: String,
    receiver: broadcast::Receiver<EventMessage>,
}

impl TableChanges {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub async fn recv(&mut self) -> Option<TableChange> {
        loop {
            match self.receiver.recv().await {
                Ok(EventMessage {
                    event: Event::RowChanged(change),
                    ..
                }) if change.table == self.table => return Some(TableChange::Row(change)),
                Ok(_) => continue,
                Err(RecvError::Lagged(missed)) => {
                    warn!(table = %self.table, missed, "Change feed lagged");
                    return Some(TableChange::Missed(missed));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::domain::booking::SeenRole;
    use crate::domain::events::BookingSeenEvent;

    fn seen(booking_id: Uuid) -> Event {
        Event::BookingSeen(BookingSeenEvent {
            booking_id,
            role: SeenRole::Pilot,
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn subscribers_receive_every_event() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe();
        let id = Uuid::new_v4();

        assert_eq!(bus.publish(seen(id)), 1);
        bus.row_changed("bookings", ChangeKind::Insert, id);

        let first = sub.recv().await.unwrap();
        assert_eq!(first.event.booking_id(), Some(id));
        let second = sub.recv().await.unwrap();
        assert_eq!(second.event.event_type(), "row_changed");
    }

    #[tokio::test]
    async fn table_feed_skips_other_tables_and_events() {
        let bus = EventBus::new();
        let mut feed = bus.watch_table("bookings");
        let id = Uuid::new_v4();

        bus.publish(seen(id));
        bus.row_changed("booking_notes", ChangeKind::Insert, Uuid::new_v4());
        bus.row_changed("bookings", ChangeKind::Delete, id);

        match tokio::time::timeout(Duration::from_millis(100), feed.recv()).await {
            Ok(Some(TableChange::Row(change))) => {
                assert_eq!(change.row_id, id);
                assert_eq!(change.kind, ChangeKind::Delete);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(feed.table(), "bookings");
    }

    #[tokio::test]
    async fn overflow_is_reported_to_table_feed() {
        let bus = EventBus::with_capacity(2);
        let mut feed = bus.watch_table("bookings");
        for _ in 0..5 {
            bus.row_changed("bookings", ChangeKind::Update, Uuid::new_v4());
        }

        assert!(matches!(feed.recv().await, Some(TableChange::Missed(3))));
        assert!(matches!(feed.recv().await, Some(TableChange::Row(_))));
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(seen(Uuid::new_v4())), 0);

        let sub = bus.subscribe();
        let feed = bus.watch_table("bookings");
        assert_eq!(bus.subscriber_count(), 2);
        drop(sub);
        drop(feed);
        assert_eq!(bus.subscriber_count(), 0);
    }
}

//! Realtime listener
//!
//! Re-fetches the booking list and summary whenever the bookings table
//! changes, keeping this session consistent with edits made elsewhere.
//! No diffing: every change triggers a full reload.

use std::sync::Mutex;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::service::BookingAdmin;
use crate::application::events::{SharedEventBus, TableChange};
use crate::domain::BOOKINGS_TABLE;

pub struct RealtimeListener {
    admin: BookingAdmin,
    events: SharedEventBus,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RealtimeListener {
    pub fn new(admin: BookingAdmin) -> Self {
        Self {
            events: admin.events().clone(),
            admin,
            task: Mutex::new(None),
        }
    }

    /// Start listening. Returns `false` if already subscribed.
    pub fn subscribe(&self) -> bool {
        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            debug!("Realtime listener already subscribed");
            return false;
        }

        // Subscribe before spawning so no change published after this
        // call is missed.
        let mut changes = self.events.watch_table(BOOKINGS_TABLE);
        let admin = self.admin.clone();

        *task = Some(tokio::spawn(async move {
            info!(table = changes.table(), "📡 Realtime listener started");
            while let Some(change) = changes.recv().await {
                match change {
                    TableChange::Row(c) => {
                        debug!(kind = ?c.kind, row_id = %c.row_id, "Bookings changed, reloading")
                    }
                    TableChange::Missed(missed) => {
                        debug!(missed, "Bookings feed overflowed, reloading")
                    }
                }
                admin.fetch_bookings().await;
                admin.fetch_summary().await;
            }
            info!("📡 Realtime listener stopped");
        }));
        true
    }

    pub fn unsubscribe(&self) {
        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = task.take() {
            handle.abort();
            info!("📡 Realtime listener unsubscribed");
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }
}

impl Drop for RealtimeListener {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::bookings::testing::Fixture;

    async fn wait_for_rows(admin: &BookingAdmin, expected: usize) -> bool {
        for _ in 0..50 {
            if admin.bookings().await.len() == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn reloads_when_bookings_change() {
        let fx = Fixture::new();
        let listener = RealtimeListener::new(fx.admin.clone());
        assert!(listener.subscribe());
        assert!(listener.is_subscribed());

        let booking = fx.booking("Anna", |_| {}).await;
        assert!(wait_for_rows(&fx.admin, 1).await);
        assert_eq!(fx.admin.summary().await.map(|s| s.total_bookings), Some(1));

        fx.admin.state.write().await.bookings.clear();
        fx.booking("Bob", |_| {}).await;
        assert!(wait_for_rows(&fx.admin, 2).await);
        assert!(fx.admin.bookings().await.iter().any(|b| b.id() == booking.id));
    }

    #[tokio::test]
    async fn subscribe_is_idempotent_and_unsubscribe_stops() {
        let fx = Fixture::new();
        let listener = RealtimeListener::new(fx.admin.clone());
        assert!(listener.subscribe());
        assert!(!listener.subscribe());
        assert_eq!(fx.events.subscriber_count(), 1);

        listener.unsubscribe();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!listener.is_subscribed());

        fx.booking("Anna", |_| {}).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(fx.admin.bookings().await.is_empty());
    }
}

//! Booking administration service
//!
//! `BookingAdmin` is the single application-state object behind the admin
//! booking screens. It is constructed once per session and handed to
//! consumers; clones share the same state.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, error};
use uuid::Uuid;

use super::state::{AdminSession, AdminState, BookingDetails};
use crate::application::events::SharedEventBus;
use crate::application::messages::ErrorKey;
use crate::application::notifications::NotificationDispatcher;
use crate::application::ports::RefundGateway;
use crate::domain::{BookingFilters, BookingSummary, DomainResult, RepositoryProvider};

#[derive(Clone)]
pub struct BookingAdmin {
    pub(super) repos: Arc<dyn RepositoryProvider>,
    pub(super) events: SharedEventBus,
    pub(super) notifier: NotificationDispatcher,
    pub(super) session: AdminSession,
    pub(super) refund_gateway: Option<Arc<dyn RefundGateway>>,
    pub(super) notify_reassignments: bool,
    pub(super) state: Arc<RwLock<AdminState>>,
}

impl BookingAdmin {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        events: SharedEventBus,
        session: AdminSession,
    ) -> Self {
        Self {
            notifier: NotificationDispatcher::new(repos.clone(), events.clone()),
            repos,
            events,
            session,
            refund_gateway: None,
            notify_reassignments: true,
            state: Arc::new(RwLock::new(AdminState::default())),
        }
    }

    pub fn with_refund_gateway(mut self, gateway: Arc<dyn RefundGateway>) -> Self {
        self.refund_gateway = Some(gateway);
        self
    }

    pub fn with_reassignment_notices(mut self, enabled: bool) -> Self {
        self.notify_reassignments = enabled;
        self
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn events(&self) -> &SharedEventBus {
        &self.events
    }

    // ── State access ───────────────────────────────────────────

    pub async fn state(&self) -> RwLockReadGuard<'_, AdminState> {
        self.state.read().await
    }

    pub async fn snapshot(&self) -> AdminState {
        self.state.read().await.clone()
    }

    pub async fn bookings(&self) -> Vec<BookingDetails> {
        self.state.read().await.bookings.clone()
    }

    pub async fn selected_booking(&self) -> Option<BookingDetails> {
        self.state.read().await.selected_booking.clone()
    }

    pub async fn summary(&self) -> Option<BookingSummary> {
        self.state.read().await.summary.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    // ── Filters ────────────────────────────────────────────────

    pub async fn filters(&self) -> BookingFilters {
        self.state.read().await.filters.clone()
    }

    /// Replace the filters. Call `fetch_bookings` to apply them.
    pub async fn set_filters(&self, filters: BookingFilters) {
        debug!(?filters, "Booking filters changed");
        self.state.write().await.filters = filters;
    }

    pub async fn reset_filters(&self) {
        self.state.write().await.filters.reset();
    }

    // ── Selection ──────────────────────────────────────────────

    /// Select a booking and load its notes and history; `None` clears
    /// the selection.
    pub async fn select_booking(&self, id: Option<Uuid>) -> bool {
        let Some(id) = id else {
            self.clear_selection().await;
            return true;
        };

        let Some(details) = self.fetch_booking_by_id(id).await else {
            self.fail(ErrorKey::LoadFailed).await;
            return false;
        };
        self.state.write().await.selected_booking = Some(details);

        let notes = self.fetch_booking_notes(id).await;
        let history = self.fetch_booking_history(id).await;
        notes && history
    }

    pub async fn clear_selection(&self) {
        let mut state = self.state.write().await;
        state.selected_booking = None;
        state.booking_notes.clear();
        state.booking_history.clear();
    }

    /// Add or remove a row from the bulk selection
    pub async fn toggle_booking_id(&self, id: Uuid) {
        let mut state = self.state.write().await;
        if let Some(pos) = state.selected_booking_ids.iter().position(|x| *x == id) {
            state.selected_booking_ids.remove(pos);
        } else {
            state.selected_booking_ids.push(id);
        }
    }

    pub async fn select_all_visible(&self) {
        let mut state = self.state.write().await;
        let ids = state.bookings.iter().map(|b| b.id()).collect();
        state.selected_booking_ids = ids;
    }

    pub async fn clear_selected_ids(&self) {
        self.state.write().await.selected_booking_ids.clear();
    }

    pub async fn selected_booking_ids(&self) -> Vec<Uuid> {
        self.state.read().await.selected_booking_ids.clone()
    }

    // ── Helpers ────────────────────────────────────────────────

    pub(super) async fn fail(&self, key: ErrorKey) {
        self.state.write().await.error = Some(key.message(self.session.locale).to_string());
    }

    /// Run one remote operation under the shared action-loading flag.
    /// Errors are logged and surfaced as `key`; nothing propagates.
    pub(super) async fn run_action<T, F>(&self, op: &'static str, key: ErrorKey, fut: F) -> Option<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        {
            let mut state = self.state.write().await;
            state.is_action_loading = true;
            state.error = None;
        }

        let result = fut.await;
        let mut state = self.state.write().await;
        state.is_action_loading = false;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                error!(op, error = %e, "Booking action failed");
                state.error = Some(key.message(self.session.locale).to_string());
                None
            }
        }
    }

    /// Re-read list and summary, and the selected booking if it is `id`.
    pub(super) async fn refresh_after_mutation(&self, id: Uuid, with_history: bool) {
        self.fetch_bookings().await;
        self.fetch_summary().await;

        if self.state.read().await.is_selected(id) {
            if let Some(details) = self.fetch_booking_by_id(id).await {
                self.state.write().await.selected_booking = Some(details);
            }
            if with_history {
                self.fetch_booking_history(id).await;
            }
        }
    }
}

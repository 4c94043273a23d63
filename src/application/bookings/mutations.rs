//! Booking mutations
//!
//! Each public operation performs its remote write, re-synchronises local
//! state and returns a success flag. Failures are logged and surfaced via
//! `AdminState::error`; nothing is returned as `Err`.

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::service::BookingAdmin;
use super::state::{ReassignRequest, RefundRequest, RescheduleRequest};
use crate::application::events::{BookingSeenEvent, Event};
use crate::application::messages::ErrorKey;
use crate::application::notifications::{AssignmentNotice, RecipientContext, RescheduleNotice};
use crate::domain::message::{MESSAGE_TYPE_REASSIGNMENT, MESSAGE_TYPE_RESCHEDULE};
use crate::domain::{
    Booking, BookingPatch, BookingPriority, BookingStatus, DomainError, DomainResult, Message,
    SeenRole,
};

impl BookingAdmin {
    async fn require_booking(&self, id: Uuid) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))
    }

    // ── Status ─────────────────────────────────────────────────

    pub async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        reason: Option<String>,
    ) -> bool {
        let patch = BookingPatch::status_change(status, reason, Utc::now());
        let updated = self
            .run_action(
                "update_booking_status",
                ErrorKey::UpdateFailed,
                self.repos.bookings().update(id, patch),
            )
            .await;
        if updated.is_none() {
            return false;
        }

        info!(booking_id = %id, %status, "Booking status updated");
        self.refresh_after_mutation(id, true).await;
        true
    }

    /// Apply one status to every id. Stops at the first failure.
    pub async fn bulk_update_status(
        &self,
        ids: &[Uuid],
        status: BookingStatus,
        reason: Option<String>,
    ) -> bool {
        let result = self
            .run_action(
                "bulk_update_status",
                ErrorKey::UpdateFailed,
                self.apply_bulk_status(ids, status, reason),
            )
            .await;

        self.fetch_bookings().await;
        self.fetch_summary().await;
        if result.is_some() {
            info!(count = ids.len(), %status, "Bulk status update applied");
            self.clear_selected_ids().await;
        }
        result.is_some()
    }

    async fn apply_bulk_status(
        &self,
        ids: &[Uuid],
        status: BookingStatus,
        reason: Option<String>,
    ) -> DomainResult<()> {
        let now = Utc::now();
        for id in ids {
            let patch = BookingPatch::status_change(status, reason.clone(), now);
            self.repos.bookings().update(*id, patch).await?;
        }
        Ok(())
    }

    // ── Reschedule ─────────────────────────────────────────────

    /// Move a booking to a new date and notify affected parties.
    ///
    /// The date change and the notification are separate writes. If the
    /// notification fails the booking stays rescheduled, the call returns
    /// `false` and the error says so.
    pub async fn reschedule_booking(&self, request: RescheduleRequest) -> bool {
        let id = request.booking_id;
        let moved = self
            .run_action(
                "reschedule_booking",
                ErrorKey::RescheduleFailed,
                self.apply_reschedule(&request),
            )
            .await;
        let Some((before, ctx)) = moved else {
            return false;
        };

        info!(
            booking_id = %id,
            old_date = %before.selected_date,
            new_date = %request.new_date,
            "Booking rescheduled"
        );

        let notified = match self.notify_reschedule(&before, &ctx, &request).await {
            Ok(count) => {
                info!(booking_id = %id, recipients = count, "Reschedule notification sent");
                true
            }
            Err(e) => {
                error!(booking_id = %id, error = %e, "Reschedule notification failed");
                self.fail(ErrorKey::NotificationFailed).await;
                false
            }
        };

        self.refresh_after_mutation(id, true).await;
        notified
    }

    /// Returns the booking as it was before the move, plus its parties.
    async fn apply_reschedule(
        &self,
        request: &RescheduleRequest,
    ) -> DomainResult<(Booking, RecipientContext)> {
        let current = self.require_booking(request.booking_id).await?;
        let ctx = RecipientContext::load(self.repos.as_ref(), &current).await?;

        let patch = BookingPatch::reschedule(&current, request.new_date, request.reason.clone(), Utc::now());
        self.repos.bookings().update(current.id, patch).await?;
        Ok((current, ctx))
    }

    async fn notify_reschedule(
        &self,
        before: &Booking,
        ctx: &RecipientContext,
        request: &RescheduleRequest,
    ) -> DomainResult<usize> {
        let recipients = ctx.recipients(request.notify_customer, request.notify_pilot);
        if recipients.is_empty() {
            return Ok(0);
        }

        let notice = RescheduleNotice {
            location: &before.location_name,
            old_date: before.selected_date,
            new_date: request.new_date,
            reason: request.reason.as_deref(),
            reasons: &request.reasons,
        };
        let message = Message::new(
            Some(self.session.user_id),
            MESSAGE_TYPE_RESCHEDULE,
            Some(before.id),
            notice.subject(),
            notice.content(),
        );
        self.notifier.dispatch(message, &recipients).await
    }

    // ── Reassignment ───────────────────────────────────────────

    pub async fn reassign_booking(&self, request: ReassignRequest) -> bool {
        let id = request.booking_id;
        let updated = self
            .run_action(
                "reassign_booking",
                ErrorKey::UpdateFailed,
                self.repos.bookings().update(
                    id,
                    BookingPatch::reassign(request.new_pilot_id, request.new_company_id, Utc::now()),
                ),
            )
            .await;
        let Some(updated) = updated else {
            return false;
        };

        info!(
            booking_id = %id,
            pilot_id = ?updated.pilot_id,
            company_id = ?updated.company_id,
            "Booking reassigned"
        );

        if self.notify_reassignments {
            if let Err(e) = self.notify_assignment(&updated, &request).await {
                // Assignment stands; the notice is best effort.
                warn!(booking_id = %id, error = %e, "Reassignment notification failed");
            }
        }

        self.refresh_after_mutation(id, true).await;
        true
    }

    /// Notify only the newly assigned parties.
    async fn notify_assignment(&self, booking: &Booking, request: &ReassignRequest) -> DomainResult<usize> {
        let ctx = RecipientContext::load(self.repos.as_ref(), booking).await?;
        let candidates = [
            ctx.pilot.filter(|_| matches!(request.new_pilot_id, Some(Some(_)))),
            ctx.booking_company.filter(|_| matches!(request.new_company_id, Some(Some(_)))),
        ];
        let mut recipients: Vec<Uuid> = Vec::with_capacity(candidates.len());
        for id in candidates.into_iter().flatten() {
            if !recipients.contains(&id) {
                recipients.push(id);
            }
        }

        let notice = AssignmentNotice {
            customer_name: &booking.customer_name,
            location: &booking.location_name,
            date: booking.selected_date,
        };
        let message = Message::new(
            Some(self.session.user_id),
            MESSAGE_TYPE_REASSIGNMENT,
            Some(booking.id),
            notice.subject(),
            notice.content(),
        );
        self.notifier.dispatch(message, &recipients).await
    }

    // ── Refund ─────────────────────────────────────────────────

    pub async fn refund_booking(&self, request: RefundRequest) -> bool {
        let id = request.booking_id;
        let refunded = self
            .run_action("refund_booking", ErrorKey::RefundFailed, self.apply_refund(&request))
            .await;
        if refunded.is_none() {
            return false;
        }

        info!(
            booking_id = %id,
            amount = request.refund_amount,
            refund_type = %request.refund_type,
            "Booking refunded"
        );
        self.refresh_after_mutation(id, true).await;
        true
    }

    async fn apply_refund(&self, request: &RefundRequest) -> DomainResult<Booking> {
        if request.refund_amount.is_nan() || request.refund_amount <= 0.0 {
            return Err(DomainError::Validation(
                "refund_amount must be positive".to_string(),
            ));
        }
        let booking = self.require_booking(request.booking_id).await?;

        if request.process_gateway_refund {
            match &self.refund_gateway {
                Some(gateway) => gateway.refund(&booking, request.refund_amount).await?,
                None => warn!(
                    booking_id = %booking.id,
                    "No refund gateway configured; recording refund only"
                ),
            }
        }

        let patch = BookingPatch::refund(
            request.refund_amount,
            request.refund_type,
            request.reason.clone(),
            self.session.user_id,
            Utc::now(),
        );
        self.repos.bookings().update(booking.id, patch).await
    }

    // ── Delete ─────────────────────────────────────────────────

    /// Hard delete. Irreversible.
    pub async fn delete_booking(&self, id: Uuid) -> bool {
        let deleted = self
            .run_action("delete_booking", ErrorKey::DeleteFailed, self.repos.bookings().delete(id))
            .await;
        if deleted.is_none() {
            return false;
        }

        info!(booking_id = %id, "Booking deleted");
        {
            let mut state = self.state.write().await;
            if state.is_selected(id) {
                state.selected_booking = None;
                state.booking_notes.clear();
                state.booking_history.clear();
            }
            state.selected_booking_ids.retain(|x| *x != id);
            state.bookings.retain(|b| b.id() != id);
        }
        self.fetch_bookings().await;
        self.fetch_summary().await;
        true
    }

    // ── Seen flags ─────────────────────────────────────────────

    /// Acknowledge a booking for `role`. Patches the local row only and
    /// announces the change on the event bus.
    pub async fn mark_booking_as_seen(&self, id: Uuid, role: SeenRole) -> bool {
        let now = Utc::now();
        let result = self
            .repos
            .bookings()
            .update(id, BookingPatch::seen(role, now))
            .await;
        if let Err(e) = result {
            error!(booking_id = %id, %role, error = %e, "Failed to mark booking as seen");
            self.fail(ErrorKey::UpdateFailed).await;
            return false;
        }

        self.state
            .write()
            .await
            .patch_booking(id, |b| b.mark_seen(role, now));
        self.events.publish(Event::BookingSeen(BookingSeenEvent {
            booking_id: id,
            role,
            timestamp: now,
        }));
        true
    }

    // ── Priority & tags ────────────────────────────────────────

    pub async fn update_booking_priority(&self, id: Uuid, priority: BookingPriority) -> bool {
        let patch = BookingPatch {
            priority: Some(priority),
            ..Default::default()
        };
        let updated = self
            .run_action(
                "update_booking_priority",
                ErrorKey::UpdateFailed,
                self.repos.bookings().update(id, patch),
            )
            .await;
        if updated.is_none() {
            return false;
        }
        self.state
            .write()
            .await
            .patch_booking(id, |b| b.priority = priority);
        true
    }

    pub async fn update_booking_tags(&self, id: Uuid, tags: Vec<String>) -> bool {
        let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !cleaned.iter().any(|c| c == tag) {
                cleaned.push(tag.to_string());
            }
        }

        let patch = BookingPatch {
            tags: Some(cleaned.clone()),
            ..Default::default()
        };
        let updated = self
            .run_action(
                "update_booking_tags",
                ErrorKey::UpdateFailed,
                self.repos.bookings().update(id, patch),
            )
            .await;
        if updated.is_none() {
            return false;
        }
        self.state
            .write()
            .await
            .patch_booking(id, |b| b.tags = cleaned.clone());
        true
    }
}

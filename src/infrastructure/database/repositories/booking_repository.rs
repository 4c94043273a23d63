//! SeaORM implementation of BookingRepository
//!
//! Every successful write is announced on the event bus as a
//! `RowChanged` event for the `bookings` table.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use crate::application::events::{ChangeKind, SharedEventBus};
use crate::domain::{
    search_key, Booking, BookingFilters, BookingPatch, BookingPriority, BookingRepository,
    BookingSource, BookingStatus, BookingSummaryRow, DomainError, DomainResult, PaymentStatus,
    RefundStatus, SeenRole, BOOKINGS_TABLE, LIKE_ESCAPE,
};
use crate::infrastructure::database::entities::booking;

use super::db_err;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
    events: SharedEventBus,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection, events: SharedEventBus) -> Self {
        Self { db, events }
    }

    fn changed(&self, kind: ChangeKind, id: Uuid) {
        self.events.row_changed(BOOKINGS_TABLE, kind, id);
    }

    async fn all_of(&self, query: Select<booking::Entity>) -> DomainResult<Vec<Booking>> {
        let models = query
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        user_id: m.user_id,
        customer_name: m.customer_name,
        customer_phone: m.customer_phone,
        contact_method: m.contact_method,
        country_id: m.country_id,
        country_name: m.country_name,
        location_id: m.location_id,
        location_name: m.location_name,
        flight_type_id: m.flight_type_id,
        flight_type_name: m.flight_type_name,
        selected_date: m.selected_date,
        number_of_people: m.number_of_people,
        base_price: m.base_price,
        total_price: m.total_price,
        currency: m.currency,
        promo_code: m.promo_code,
        promo_discount: m.promo_discount,
        status: BookingStatus::from_str(&m.status),
        payment_status: PaymentStatus::from_str(&m.payment_status),
        booking_source: BookingSource::from_str(&m.booking_source),
        pilot_id: m.pilot_id,
        company_id: m.company_id,
        assigned_at: m.assigned_at,
        original_date: m.original_date,
        reschedule_count: m.reschedule_count,
        last_rescheduled_at: m.last_rescheduled_at,
        reschedule_reason: m.reschedule_reason,
        refund_amount: m.refund_amount,
        refund_status: m.refund_status.as_deref().map(RefundStatus::from_str),
        refunded_at: m.refunded_at,
        refunded_by: m.refunded_by,
        cancellation_reason: m.cancellation_reason,
        on_hold_reason: m.on_hold_reason,
        cancelled_at: m.cancelled_at,
        no_show_at: m.no_show_at,
        seen_by_pilot: m.seen_by_pilot,
        pilot_seen_at: m.pilot_seen_at,
        seen_by_company: m.seen_by_company,
        company_seen_at: m.company_seen_at,
        seen_by_admin: m.seen_by_admin,
        admin_seen_at: m.admin_seen_at,
        priority: BookingPriority::from_str(&m.priority),
        tags: serde_json::from_value(m.tags).unwrap_or_default(),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        search_text: Set(search_key(b.search_fields())),
        id: Set(b.id),
        user_id: Set(b.user_id),
        customer_name: Set(b.customer_name),
        customer_phone: Set(b.customer_phone),
        contact_method: Set(b.contact_method),
        country_id: Set(b.country_id),
        country_name: Set(b.country_name),
        location_id: Set(b.location_id),
        location_name: Set(b.location_name),
        flight_type_id: Set(b.flight_type_id),
        flight_type_name: Set(b.flight_type_name),
        selected_date: Set(b.selected_date),
        number_of_people: Set(b.number_of_people),
        base_price: Set(b.base_price),
        total_price: Set(b.total_price),
        currency: Set(b.currency),
        promo_code: Set(b.promo_code),
        promo_discount: Set(b.promo_discount),
        status: Set(b.status.as_str().to_string()),
        payment_status: Set(b.payment_status.as_str().to_string()),
        booking_source: Set(b.booking_source.as_str().to_string()),
        pilot_id: Set(b.pilot_id),
        company_id: Set(b.company_id),
        assigned_at: Set(b.assigned_at),
        original_date: Set(b.original_date),
        reschedule_count: Set(b.reschedule_count),
        last_rescheduled_at: Set(b.last_rescheduled_at),
        reschedule_reason: Set(b.reschedule_reason),
        refund_amount: Set(b.refund_amount),
        refund_status: Set(b.refund_status.map(|s| s.as_str().to_string())),
        refunded_at: Set(b.refunded_at),
        refunded_by: Set(b.refunded_by),
        cancellation_reason: Set(b.cancellation_reason),
        on_hold_reason: Set(b.on_hold_reason),
        cancelled_at: Set(b.cancelled_at),
        no_show_at: Set(b.no_show_at),
        seen_by_pilot: Set(b.seen_by_pilot),
        pilot_seen_at: Set(b.pilot_seen_at),
        seen_by_company: Set(b.seen_by_company),
        company_seen_at: Set(b.company_seen_at),
        seen_by_admin: Set(b.seen_by_admin),
        admin_seen_at: Set(b.admin_seen_at),
        priority: Set(b.priority.as_str().to_string()),
        tags: Set(serde_json::json!(b.tags)),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

/// Mark only the columns `patch` touches, so concurrent single-field
/// writes to the same row do not overwrite each other.
fn patch_to_active(existing: booking::Model, patch: BookingPatch) -> booking::ActiveModel {
    let mut row = existing.into_active_model();
    if let Some(v) = patch.status {
        row.status = Set(v.as_str().to_string());
    }
    if let Some(v) = patch.payment_status {
        row.payment_status = Set(v.as_str().to_string());
    }
    if let Some(v) = patch.selected_date {
        row.selected_date = Set(v);
    }
    if let Some(v) = patch.original_date {
        row.original_date = Set(Some(v));
    }
    if let Some(v) = patch.reschedule_count {
        row.reschedule_count = Set(v);
    }
    if let Some(v) = patch.last_rescheduled_at {
        row.last_rescheduled_at = Set(Some(v));
    }
    if let Some(v) = patch.reschedule_reason {
        row.reschedule_reason = Set(v);
    }
    if let Some(v) = patch.pilot_id {
        row.pilot_id = Set(v);
    }
    if let Some(v) = patch.company_id {
        row.company_id = Set(v);
    }
    if let Some(v) = patch.assigned_at {
        row.assigned_at = Set(Some(v));
    }
    if let Some(v) = patch.refund_amount {
        row.refund_amount = Set(Some(v));
    }
    if let Some(v) = patch.refund_status {
        row.refund_status = Set(Some(v.as_str().to_string()));
    }
    if let Some(v) = patch.refunded_at {
        row.refunded_at = Set(Some(v));
    }
    if let Some(v) = patch.refunded_by {
        row.refunded_by = Set(Some(v));
    }
    if let Some(v) = patch.cancellation_reason {
        row.cancellation_reason = Set(v);
    }
    if let Some(v) = patch.on_hold_reason {
        row.on_hold_reason = Set(v);
    }
    if let Some(v) = patch.cancelled_at {
        row.cancelled_at = Set(Some(v));
    }
    if let Some(v) = patch.no_show_at {
        row.no_show_at = Set(Some(v));
    }
    match patch.seen {
        Some((SeenRole::Pilot, at)) => {
            row.seen_by_pilot = Set(true);
            row.pilot_seen_at = Set(Some(at));
        }
        Some((SeenRole::Company, at)) => {
            row.seen_by_company = Set(true);
            row.company_seen_at = Set(Some(at));
        }
        Some((SeenRole::Admin, at)) => {
            row.seen_by_admin = Set(true);
            row.admin_seen_at = Set(Some(at));
        }
        None => {}
    }
    if let Some(v) = patch.priority {
        row.priority = Set(v.as_str().to_string());
    }
    if let Some(v) = patch.tags {
        row.tags = Set(serde_json::json!(v));
    }
    row.updated_at = Set(Utc::now());
    row
}

/// Translate filters into a WHERE clause. Search is a substring match
/// on the stored lower-cased `search_text`, with wildcards escaped.
fn filter_condition(filters: &BookingFilters) -> Condition {
    let mut cond = Condition::all();
    if let Some(status) = filters.status {
        cond = cond.add(booking::Column::Status.eq(status.as_str()));
    }
    if let Some(payment) = filters.payment_status {
        cond = cond.add(booking::Column::PaymentStatus.eq(payment.as_str()));
    }
    if let Some(source) = filters.source {
        cond = cond.add(booking::Column::BookingSource.eq(source.as_str()));
    }
    if let Some(priority) = filters.priority {
        cond = cond.add(booking::Column::Priority.eq(priority.as_str()));
    }
    if let Some(pilot_id) = filters.pilot_id {
        cond = cond.add(booking::Column::PilotId.eq(pilot_id));
    }
    if let Some(company_id) = filters.company_id {
        cond = cond.add(booking::Column::CompanyId.eq(company_id));
    }
    if let Some(from) = filters.date_from {
        cond = cond.add(booking::Column::SelectedDate.gte(from));
    }
    if let Some(to) = filters.date_to {
        cond = cond.add(booking::Column::SelectedDate.lte(to));
    }
    if let Some(pattern) = filters.like_pattern() {
        cond = cond.add(
            Expr::col((booking::Entity, booking::Column::SearchText))
                .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
        );
    }
    cond
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_filtered(&self, filters: &BookingFilters) -> DomainResult<Vec<Booking>> {
        debug!("Loading bookings with filters: {:?}", filters);
        self.all_of(booking::Entity::find().filter(filter_condition(filters)))
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_pilot(&self, pilot_id: Uuid) -> DomainResult<Vec<Booking>> {
        self.all_of(booking::Entity::find().filter(booking::Column::PilotId.eq(pilot_id)))
            .await
    }

    async fn find_for_company(&self, company_id: Uuid) -> DomainResult<Vec<Booking>> {
        self.all_of(booking::Entity::find().filter(booking::Column::CompanyId.eq(company_id)))
            .await
    }

    async fn insert(&self, b: Booking) -> DomainResult<()> {
        debug!("Saving booking: {}", b.id);
        let id = b.id;
        domain_to_active(b).insert(&self.db).await.map_err(db_err)?;
        self.changed(ChangeKind::Insert, id);
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: BookingPatch) -> DomainResult<Booking> {
        debug!("Updating booking: {}", id);

        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let stored = patch_to_active(existing, patch)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        self.changed(ChangeKind::Update, id);
        Ok(model_to_domain(stored))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        debug!("Deleting booking: {}", id);
        let result = booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", id));
        }
        self.changed(ChangeKind::Delete, id);
        Ok(())
    }

    async fn summary_rows(&self) -> DomainResult<Vec<BookingSummaryRow>> {
        let models = booking::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(|m| BookingSummaryRow::from(&model_to_domain(m)))
            .collect())
    }
}

//! Booking HTTP handlers
//!
//! Each handler drives one `BookingAdmin` operation. Mutations answer
//! with the refreshed admin state; a failed operation answers with the
//! localized message the service recorded.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::{AdminState, BookingAdmin, BookingDetails};
use crate::domain::{BookingFilters, BookingHistory, BookingNote, BookingSummary};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

use super::dto::*;

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

fn fail<T>(status: StatusCode, message: impl Into<String>) -> ApiResult<T> {
    Err((status, Json(ApiResponse::error(message))))
}

/// Map an operation outcome to the post-operation state or its error
async fn outcome(admin: &BookingAdmin, succeeded: bool) -> ApiResult<AdminState> {
    let state = admin.snapshot().await;
    if succeeded {
        return ok(state);
    }
    let message = state
        .error
        .unwrap_or_else(|| "Operation failed".to_string());
    fail(StatusCode::INTERNAL_SERVER_ERROR, message)
}

// ── State & reads ──────────────────────────────────────────────

pub async fn get_state(State(admin): State<BookingAdmin>) -> ApiResult<AdminState> {
    ok(admin.snapshot().await)
}

pub async fn list_bookings(State(admin): State<BookingAdmin>) -> ApiResult<Vec<BookingDetails>> {
    ok(admin.bookings().await)
}

pub async fn refresh_bookings(State(admin): State<BookingAdmin>) -> ApiResult<AdminState> {
    let loaded = admin.fetch_bookings().await;
    let summarized = admin.fetch_summary().await;
    outcome(&admin, loaded && summarized).await
}

pub async fn get_booking(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
) -> ApiResult<BookingDetails> {
    match admin.fetch_booking_by_id(id).await {
        Some(details) => ok(details),
        None => fail(StatusCode::NOT_FOUND, format!("Booking {id} not found")),
    }
}

pub async fn get_summary(State(admin): State<BookingAdmin>) -> ApiResult<BookingSummary> {
    if !admin.fetch_summary().await {
        let message = admin.error().await.unwrap_or_default();
        return fail(StatusCode::INTERNAL_SERVER_ERROR, message);
    }
    match admin.summary().await {
        Some(summary) => ok(summary),
        None => fail(StatusCode::INTERNAL_SERVER_ERROR, "Summary unavailable"),
    }
}

pub async fn get_notes(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<BookingNote>> {
    if !admin.fetch_booking_notes(id).await {
        let message = admin.error().await.unwrap_or_default();
        return fail(StatusCode::INTERNAL_SERVER_ERROR, message);
    }
    ok(admin.state().await.booking_notes.clone())
}

pub async fn get_history(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<BookingHistory>> {
    if !admin.fetch_booking_history(id).await {
        let message = admin.error().await.unwrap_or_default();
        return fail(StatusCode::INTERNAL_SERVER_ERROR, message);
    }
    ok(admin.state().await.booking_history.clone())
}

pub async fn pilot_bookings(
    State(admin): State<BookingAdmin>,
    Path(pilot_id): Path<Uuid>,
) -> ApiResult<Vec<BookingDetails>> {
    match admin.fetch_bookings_for_pilot(pilot_id).await {
        Ok(rows) => ok(rows),
        Err(e) => fail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

pub async fn company_bookings(
    State(admin): State<BookingAdmin>,
    Path(company_id): Path<Uuid>,
) -> ApiResult<Vec<BookingDetails>> {
    match admin.fetch_bookings_for_company(company_id).await {
        Ok(rows) => ok(rows),
        Err(e) => fail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

pub async fn unseen_count(
    State(admin): State<BookingAdmin>,
    Query(query): Query<UnseenQuery>,
) -> ApiResult<usize> {
    match admin.count_unseen(query.role, query.owner_id).await {
        Ok(count) => ok(count),
        Err(e) => fail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

// ── Filters & selection ────────────────────────────────────────

pub async fn set_filters(
    State(admin): State<BookingAdmin>,
    Json(filters): Json<BookingFilters>,
) -> ApiResult<AdminState> {
    admin.set_filters(filters).await;
    let loaded = admin.fetch_bookings().await;
    outcome(&admin, loaded).await
}

pub async fn reset_filters(State(admin): State<BookingAdmin>) -> ApiResult<AdminState> {
    admin.reset_filters().await;
    let loaded = admin.fetch_bookings().await;
    outcome(&admin, loaded).await
}

pub async fn select_booking(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
) -> ApiResult<AdminState> {
    let selected = admin.select_booking(Some(id)).await;
    outcome(&admin, selected).await
}

pub async fn clear_selection(State(admin): State<BookingAdmin>) -> ApiResult<AdminState> {
    admin.select_booking(None).await;
    ok(admin.snapshot().await)
}

pub async fn toggle_selected_id(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<Uuid>> {
    admin.toggle_booking_id(id).await;
    ok(admin.selected_booking_ids().await)
}

pub async fn select_all_visible(State(admin): State<BookingAdmin>) -> ApiResult<Vec<Uuid>> {
    admin.select_all_visible().await;
    ok(admin.selected_booking_ids().await)
}

pub async fn clear_selected_ids(State(admin): State<BookingAdmin>) -> ApiResult<Vec<Uuid>> {
    admin.clear_selected_ids().await;
    ok(Vec::new())
}

// ── Mutations ──────────────────────────────────────────────────

pub async fn update_status(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateStatusBody>,
) -> ApiResult<AdminState> {
    let done = admin.update_booking_status(id, body.status, body.reason).await;
    outcome(&admin, done).await
}

pub async fn bulk_update_status(
    State(admin): State<BookingAdmin>,
    ValidatedJson(body): ValidatedJson<BulkStatusBody>,
) -> ApiResult<AdminState> {
    let ids = match body.ids {
        Some(ids) => ids,
        None => admin.selected_booking_ids().await,
    };
    if ids.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "No bookings selected");
    }
    let done = admin.bulk_update_status(&ids, body.status, body.reason).await;
    outcome(&admin, done).await
}

pub async fn reschedule(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<RescheduleBody>,
) -> ApiResult<AdminState> {
    let done = admin.reschedule_booking(body.into_request(id)).await;
    outcome(&admin, done).await
}

pub async fn reassign(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<ReassignBody>,
) -> ApiResult<AdminState> {
    let done = admin.reassign_booking(body.into_request(id)).await;
    outcome(&admin, done).await
}

pub async fn refund(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<RefundBody>,
) -> ApiResult<AdminState> {
    let done = admin.refund_booking(body.into_request(id)).await;
    outcome(&admin, done).await
}

pub async fn delete_booking(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
) -> ApiResult<AdminState> {
    let done = admin.delete_booking(id).await;
    outcome(&admin, done).await
}

pub async fn mark_seen(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<SeenBody>,
) -> ApiResult<AdminState> {
    let done = admin.mark_booking_as_seen(id, body.role).await;
    outcome(&admin, done).await
}

pub async fn update_priority(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<PriorityBody>,
) -> ApiResult<AdminState> {
    let done = admin.update_booking_priority(id, body.priority).await;
    outcome(&admin, done).await
}

pub async fn update_tags(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<TagsBody>,
) -> ApiResult<AdminState> {
    let done = admin.update_booking_tags(id, body.tags).await;
    outcome(&admin, done).await
}

// ── Notes ──────────────────────────────────────────────────────

pub async fn add_note(
    State(admin): State<BookingAdmin>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<NoteBody>,
) -> ApiResult<AdminState> {
    let done = admin.add_booking_note(id, &body.content).await;
    outcome(&admin, done).await
}

pub async fn delete_note(
    State(admin): State<BookingAdmin>,
    Path(note_id): Path<Uuid>,
) -> ApiResult<AdminState> {
    let done = admin.delete_booking_note(note_id).await;
    outcome(&admin, done).await
}

pub async fn toggle_pin(
    State(admin): State<BookingAdmin>,
    Path(note_id): Path<Uuid>,
) -> ApiResult<AdminState> {
    let done = admin.toggle_note_pin(note_id).await;
    outcome(&admin, done).await
}

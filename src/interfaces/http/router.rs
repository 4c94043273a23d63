//! API router

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::BookingAdmin;

use super::modules::bookings::handlers as bookings;
use super::modules::health;

fn booking_routes() -> Router<BookingAdmin> {
    Router::new()
        .route("/", get(bookings::list_bookings))
        .route("/refresh", post(bookings::refresh_bookings))
        .route("/state", get(bookings::get_state))
        .route("/summary", get(bookings::get_summary))
        .route("/unseen", get(bookings::unseen_count))
        .route(
            "/filters",
            put(bookings::set_filters).delete(bookings::reset_filters),
        )
        .route("/selection", delete(bookings::clear_selection))
        .route(
            "/selection/ids",
            post(bookings::select_all_visible).delete(bookings::clear_selected_ids),
        )
        .route("/selection/ids/{id}", post(bookings::toggle_selected_id))
        .route("/status", put(bookings::bulk_update_status))
        .route(
            "/{id}",
            get(bookings::get_booking).delete(bookings::delete_booking),
        )
        .route("/{id}/select", post(bookings::select_booking))
        .route("/{id}/status", put(bookings::update_status))
        .route("/{id}/reschedule", post(bookings::reschedule))
        .route("/{id}/reassign", post(bookings::reassign))
        .route("/{id}/refund", post(bookings::refund))
        .route("/{id}/seen", post(bookings::mark_seen))
        .route("/{id}/priority", put(bookings::update_priority))
        .route("/{id}/tags", put(bookings::update_tags))
        .route("/{id}/history", get(bookings::get_history))
        .route(
            "/{id}/notes",
            get(bookings::get_notes).post(bookings::add_note),
        )
}

/// Build the HTTP API around one admin state service
pub fn create_api_router(admin: BookingAdmin) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1/bookings", booking_routes())
        .route("/api/v1/notes/{id}", delete(bookings::delete_note))
        .route("/api/v1/notes/{id}/pin", post(bookings::toggle_pin))
        .route("/api/v1/pilots/{id}/bookings", get(bookings::pilot_bookings))
        .route(
            "/api/v1/companies/{id}/bookings",
            get(bookings::company_bookings),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(admin)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;
    use uuid::Uuid;

    use super::*;
    use crate::application::bookings::testing::Fixture;

    async fn send(router: &mut Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = router.call(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let fx = Fixture::new();
        let mut router = create_api_router(fx.admin.clone());
        let (status, body) = send(&mut router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_booking_is_404() {
        let fx = Fixture::new();
        let mut router = create_api_router(fx.admin.clone());
        let uri = format!("/api/v1/bookings/{}", Uuid::new_v4());
        let (status, body) = send(&mut router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn status_update_returns_refreshed_state() {
        let fx = Fixture::new();
        let booking = fx.booking("Anna", |_| {}).await;
        let mut router = create_api_router(fx.admin.clone());

        let uri = format!("/api/v1/bookings/{}/status", booking.id);
        let (status, body) = send(
            &mut router,
            "PUT",
            &uri,
            Some(json!({"status": "confirmed"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["bookings"][0]["status"], "confirmed");
        assert_eq!(body["data"]["summary"]["confirmed_bookings"], 1);
    }

    #[tokio::test]
    async fn filters_are_shared_by_every_caller() {
        let fx = Fixture::new();
        fx.booking("Anna", |_| {}).await;
        fx.booking("Bob", |_| {}).await;
        let mut first = create_api_router(fx.admin.clone());
        let mut second = first.clone();

        let (status, _) = send(
            &mut first,
            "PUT",
            "/api/v1/bookings/filters",
            Some(json!({"search_term": "anna"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&mut second, "GET", "/api/v1/bookings", None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

        send(&mut second, "DELETE", "/api/v1/bookings/filters", None).await;
        let (_, body) = send(&mut first, "GET", "/api/v1/bookings", None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn non_positive_refund_is_unprocessable() {
        let fx = Fixture::new();
        let booking = fx.booking("Anna", |_| {}).await;
        let mut router = create_api_router(fx.admin.clone());

        let uri = format!("/api/v1/bookings/{}/refund", booking.id);
        let (status, _) = send(
            &mut router,
            "POST",
            &uri,
            Some(json!({"refund_amount": 0.0, "refund_type": "full"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(fx.stored(booking.id).await.refund_status, None);
    }

    #[tokio::test]
    async fn failed_delete_carries_localized_error() {
        let fx = Fixture::new();
        let mut router = create_api_router(fx.admin.clone());
        let uri = format!("/api/v1/bookings/{}", Uuid::new_v4());
        let (status, body) = send(&mut router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to delete booking");
    }
}

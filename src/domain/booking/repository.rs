//! Booking repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::filters::BookingFilters;
use super::model::{Booking, BookingPatch};
use super::summary::BookingSummaryRow;
use crate::domain::DomainResult;

/// Table name used in change notifications
pub const BOOKINGS_TABLE: &str = "bookings";

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings matching `filters`, newest first
    async fn find_filtered(&self, filters: &BookingFilters) -> DomainResult<Vec<Booking>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// Bookings assigned to a pilot, newest first
    async fn find_for_pilot(&self, pilot_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// Bookings assigned to a company, newest first
    async fn find_for_company(&self, company_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// Save a new booking (intake flows and seeding)
    async fn insert(&self, booking: Booking) -> DomainResult<()>;

    /// Apply a partial update and return the stored row
    async fn update(&self, id: Uuid, patch: BookingPatch) -> DomainResult<Booking>;

    /// Hard delete. Irreversible.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// Projection over every booking for the dashboard summary
    async fn summary_rows(&self) -> DomainResult<Vec<BookingSummaryRow>>;
}

//! Booking note repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::BookingNote;
use crate::domain::DomainResult;

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Notes of a booking, pinned first then newest first
    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<BookingNote>>;

    async fn insert(&self, note: BookingNote) -> DomainResult<()>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> DomainResult<()>;
}

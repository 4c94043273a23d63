//! Booking audit trail
//!
//! Rows are written by database-side triggers when status or assignment
//! changes; this core only reads them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingHistory {
    pub id: Uuid,
    pub booking_id: Uuid,
    /// e.g. `status_changed`, `pilot_assigned`
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl BookingHistory {
    pub fn new(
        booking_id: Uuid,
        action: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
        changed_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            action: action.into(),
            old_value,
            new_value,
            changed_by,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Audit rows of a booking, newest first
    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<BookingHistory>>;

    /// Append a row (trigger emulation and seeding)
    async fn append(&self, entry: BookingHistory) -> DomainResult<()>;
}

//! Booking aggregate
//!
//! Contains the Booking entity, list filters, summary aggregation and
//! the repository interface.

pub mod filters;
pub mod model;
pub mod repository;
pub mod summary;

pub use filters::{search_key, BookingFilters, LIKE_ESCAPE};
pub use model::{
    Booking, BookingPatch, BookingPriority, BookingSource, BookingStatus, PaymentStatus,
    RefundStatus, RefundType, SeenRole,
};
pub use repository::{BookingRepository, BOOKINGS_TABLE};
pub use summary::{BookingSummary, BookingSummaryRow};

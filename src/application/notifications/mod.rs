//! Booking notifications
//!
//! Composes multi-language messages and fans them out to every party
//! affected by a booking change.

pub mod fanout;
pub mod templates;

pub use fanout::{NotificationDispatcher, RecipientContext};
pub use templates::{format_date, AssignmentNotice, RescheduleNotice};

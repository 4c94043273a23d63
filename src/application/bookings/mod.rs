//! Booking administration
//!
//! - `service`: the `BookingAdmin` state object, selection and filters
//! - `readers`: list, single-booking, notes, history and summary reads
//! - `mutations`: status, reschedule, reassignment, refund, delete, seen
//!   flags, priority and tags
//! - `notes`: note add/delete/pin
//! - `realtime`: change-driven reload

pub mod mutations;
pub mod notes;
pub mod readers;
pub mod realtime;
pub mod service;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use realtime::RealtimeListener;
pub use service::BookingAdmin;
pub use state::{
    AdminSession, AdminState, BookingDetails, ReassignRequest, RefundRequest, RescheduleRequest,
};

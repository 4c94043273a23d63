pub mod bookings;
pub mod events;
pub mod messages;
pub mod notifications;
pub mod ports;

// Re-export key types for convenience
pub use bookings::{
    AdminSession, AdminState, BookingAdmin, BookingDetails, RealtimeListener, ReassignRequest,
    RefundRequest, RescheduleRequest,
};
pub use events::{
    create_event_bus, EventBus, EventSubscriber, SharedEventBus, TableChange, TableChanges,
};
pub use messages::ErrorKey;
pub use notifications::{NotificationDispatcher, RecipientContext};
pub use ports::RefundGateway;

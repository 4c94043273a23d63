//! # Paraglide booking administration
//!
//! Administrative core of a multi-role paragliding marketplace: list,
//! inspect, filter and mutate flight bookings, with notification fan-out
//! on reschedules and reassignments, a dashboard summary and a
//! change-driven reload of the admin view.
//!
//! ## Architecture
//!
//! - **domain**: bookings, notes, history, parties, messages, locales,
//!   repository traits
//! - **application**: the `BookingAdmin` state service, notification
//!   fan-out, event bus, realtime listener
//! - **infrastructure**: SeaORM persistence and an in-memory provider
//! - **interfaces**: REST API over the admin service
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{
    create_event_bus, AdminSession, BookingAdmin, EventBus, RealtimeListener, SharedEventBus,
};
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
pub use interfaces::http::create_api_router;

//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_parties;
mod m20250101_000002_create_bookings;
mod m20250101_000003_create_booking_notes_and_history;
mod m20250101_000004_create_messages;
mod m20250101_000005_add_search_text_to_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_parties::Migration),
            Box::new(m20250101_000002_create_bookings::Migration),
            Box::new(m20250101_000003_create_booking_notes_and_history::Migration),
            Box::new(m20250101_000004_create_messages::Migration),
            Box::new(m20250101_000005_add_search_text_to_bookings::Migration),
        ]
    }
}

//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::application::events::SharedEventBus;
use crate::domain::{
    BookingRepository, CompanyRepository, HistoryRepository, MessageRepository, NoteRepository,
    PilotRepository, ProfileRepository, RepositoryProvider,
};

use super::booking_repository::SeaOrmBookingRepository;
use super::history_repository::SeaOrmHistoryRepository;
use super::message_repository::SeaOrmMessageRepository;
use super::note_repository::SeaOrmNoteRepository;
use super::party_repository::{
    SeaOrmCompanyRepository, SeaOrmPilotRepository, SeaOrmProfileRepository,
};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-table repository accessors.
/// Booking writes are published to `events` as row changes.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone(), events.clone());
/// let booking = repos.bookings().find_by_id(id).await?;
/// let notes = repos.notes().list_for_booking(id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    bookings: SeaOrmBookingRepository,
    notes: SeaOrmNoteRepository,
    history: SeaOrmHistoryRepository,
    pilots: SeaOrmPilotRepository,
    companies: SeaOrmCompanyRepository,
    profiles: SeaOrmProfileRepository,
    messages: SeaOrmMessageRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection, events: SharedEventBus) -> Self {
        Self {
            bookings: SeaOrmBookingRepository::new(db.clone(), events),
            notes: SeaOrmNoteRepository::new(db.clone()),
            history: SeaOrmHistoryRepository::new(db.clone()),
            pilots: SeaOrmPilotRepository::new(db.clone()),
            companies: SeaOrmCompanyRepository::new(db.clone()),
            profiles: SeaOrmProfileRepository::new(db.clone()),
            messages: SeaOrmMessageRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn notes(&self) -> &dyn NoteRepository {
        &self.notes
    }

    fn history(&self) -> &dyn HistoryRepository {
        &self.history
    }

    fn pilots(&self) -> &dyn PilotRepository {
        &self.pilots
    }

    fn companies(&self) -> &dyn CompanyRepository {
        &self.companies
    }

    fn profiles(&self) -> &dyn ProfileRepository {
        &self.profiles
    }

    fn messages(&self) -> &dyn MessageRepository {
        &self.messages
    }
}

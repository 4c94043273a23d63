//! In-memory repository provider for development and testing

pub mod repositories;

use crate::application::events::SharedEventBus;
use crate::domain::{
    BookingRepository, CompanyRepository, HistoryRepository, MessageRepository, NoteRepository,
    PilotRepository, ProfileRepository, RepositoryProvider,
};

pub use repositories::*;

/// Repository provider holding everything in process memory.
///
/// Booking writes are announced on the event bus like the database
/// provider does, so the realtime listener works against it.
pub struct InMemoryRepositoryProvider {
    bookings: InMemoryBookingRepository,
    notes: InMemoryNoteRepository,
    history: InMemoryHistoryRepository,
    pilots: InMemoryPilotRepository,
    companies: InMemoryCompanyRepository,
    profiles: InMemoryProfileRepository,
    messages: InMemoryMessageRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new(events: SharedEventBus) -> Self {
        Self {
            bookings: InMemoryBookingRepository::new(events),
            notes: InMemoryNoteRepository::default(),
            history: InMemoryHistoryRepository::default(),
            pilots: InMemoryPilotRepository::default(),
            companies: InMemoryCompanyRepository::default(),
            profiles: InMemoryProfileRepository::default(),
            messages: InMemoryMessageRepository::default(),
        }
    }

    /// Concrete message store, for outage simulation
    pub fn message_store(&self) -> &InMemoryMessageRepository {
        &self.messages
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

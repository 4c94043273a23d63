//! DashMap-backed repositories

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::application::events::{ChangeKind, SharedEventBus};
use crate::domain::note::sort_notes;
use crate::domain::{
    Booking, BookingFilters, BookingHistory, BookingNote, BookingPatch, BookingRepository,
    BookingSummaryRow, Company, CompanyRepository, DomainError, DomainResult, HistoryRepository,
    Message, MessageRecipient, MessageRepository, NoteRepository, Pilot, PilotRepository, Profile,
    ProfileRepository, BOOKINGS_TABLE,
};

fn newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub struct InMemoryBookingRepository {
    rows: DashMap<Uuid, Booking>,
    events: SharedEventBus,
}

impl InMemoryBookingRepository {
    pub fn new(events: SharedEventBus) -> Self {
        Self {
            rows: DashMap::new(),
            events,
        }
    }

    fn changed(&self, kind: ChangeKind, id: Uuid) {
        self.events.row_changed(BOOKINGS_TABLE, kind, id);
    }

    fn collect(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let mut out: Vec<Booking> = self
            .rows
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        newest_first(&mut out);
        out
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_filtered(&self, filters: &BookingFilters) -> DomainResult<Vec<Booking>> {
        Ok(self.collect(|b| filters.matches(b)))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_for_pilot(&self, pilot_id: Uuid) -> DomainResult<Vec<Booking>> {
        Ok(self.collect(|b| b.pilot_id == Some(pilot_id)))
    }

    async fn find_for_company(&self, company_id: Uuid) -> DomainResult<Vec<Booking>> {
        Ok(self.collect(|b| b.company_id == Some(company_id)))
    }

    async fn insert(&self, booking: Booking) -> DomainResult<()> {
        let id = booking.id;
        if self.rows.contains_key(&id) {
            return Err(DomainError::Conflict(format!("booking {id}")));
        }
        self.rows.insert(id, booking);
        self.changed(ChangeKind::Insert, id);
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: BookingPatch) -> DomainResult<Booking> {
        let updated = {
            let mut row = self
                .rows
                .get_mut(&id)
                .ok_or_else(|| DomainError::not_found("Booking", id))?;
            patch.apply(row.value_mut());
            row.value().clone()
        };
        self.changed(ChangeKind::Update, id);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rows
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Booking", id))?;
        self.changed(ChangeKind::Delete, id);
        Ok(())
    }

    async fn summary_rows(&self) -> DomainResult<Vec<BookingSummaryRow>> {
        Ok(self
            .rows
            .iter()
            .map(|r| BookingSummaryRow::from(r.value()))
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryNoteRepository {
    rows: DashMap<Uuid, BookingNote>,
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<BookingNote>> {
        let mut notes: Vec<BookingNote> = self
            .rows
            .iter()
            .filter(|r| r.booking_id == booking_id)
            .map(|r| r.value().clone())
            .collect();
        sort_notes(&mut notes);
        Ok(notes)
    }

    async fn insert(&self, note: BookingNote) -> DomainResult<()> {
        self.rows.insert(note.id, note);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("BookingNote", id))
    }

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> DomainResult<()> {
        let mut row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("BookingNote", id))?;
        row.is_pinned = pinned;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryHistoryRepository {
    rows: DashMap<Uuid, BookingHistory>,
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<BookingHistory>> {
        let mut rows: Vec<BookingHistory> = self
            .rows
            .iter()
            .filter(|r| r.booking_id == booking_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn append(&self, entry: BookingHistory) -> DomainResult<()> {
        self.rows.insert(entry.id, entry);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPilotRepository {
    rows: DashMap<Uuid, Pilot>,
}

#[async_trait]
impl PilotRepository for InMemoryPilotRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Pilot>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Pilot>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.rows.get(id).map(|r| r.value().clone()))
            .collect())
    }

    async fn save(&self, pilot: Pilot) -> DomainResult<()> {
        self.rows.insert(pilot.id, pilot);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    rows: DashMap<Uuid, Company>,
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Company>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Company>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.rows.get(id).map(|r| r.value().clone()))
            .collect())
    }

    async fn save(&self, company: Company) -> DomainResult<()> {
        self.rows.insert(company.id, company);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    rows: DashMap<Uuid, Profile>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Profile>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn save(&self, profile: Profile) -> DomainResult<()> {
        self.rows.insert(profile.id, profile);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: DashMap<Uuid, Message>,
    recipients: DashMap<Uuid, MessageRecipient>,
    unavailable: AtomicBool,
}

impl InMemoryMessageRepository {
    /// Simulate an outage of the messages tables
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("messages table unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert_message(&self, message: Message) -> DomainResult<()> {
        self.check_available()?;
        self.messages.insert(message.id, message);
        Ok(())
    }

    async fn insert_recipients(&self, recipients: Vec<MessageRecipient>) -> DomainResult<()> {
        self.check_available()?;
        for r in recipients {
            self.recipients.insert(r.id, r);
        }
        Ok(())
    }

    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<Message>> {
        let mut out: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.booking_id == Some(booking_id))
            .map(|m| m.value().clone())
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn recipients_of(&self, message_id: Uuid) -> DomainResult<Vec<MessageRecipient>> {
        Ok(self
            .recipients
            .iter()
            .filter(|r| r.message_id == message_id)
            .map(|r| r.value().clone())
            .collect())
    }
}

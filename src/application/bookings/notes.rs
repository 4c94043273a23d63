//! Admin notes on the selected booking

use tracing::{error, info};
use uuid::Uuid;

use super::service::BookingAdmin;
use crate::application::messages::ErrorKey;
use crate::domain::note::sort_notes;
use crate::domain::{BookingNote, DomainError, DomainResult};

impl BookingAdmin {
    /// Name shown on notes written in this session
    async fn author_name(&self) -> DomainResult<String> {
        let profile = self.repos.profiles().find_by_id(self.session.user_id).await?;
        Ok(profile
            .and_then(|p| p.full_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.session.display_name.clone()))
    }

    async fn insert_note(&self, booking_id: Uuid, content: &str) -> DomainResult<()> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("note content is empty".to_string()));
        }
        let author = self.author_name().await?;
        let note = BookingNote::new(booking_id, self.session.user_id, author, content);
        self.repos.notes().insert(note).await
    }

    /// Add a note and reload the booking's notes.
    pub async fn add_booking_note(&self, booking_id: Uuid, content: &str) -> bool {
        let added = self
            .run_action("add_booking_note", ErrorKey::NoteFailed, self.insert_note(booking_id, content))
            .await;
        if added.is_none() {
            return false;
        }
        info!(%booking_id, "Booking note added");
        self.fetch_booking_notes(booking_id).await
    }

    /// Delete a note; the local list is patched without a re-read.
    pub async fn delete_booking_note(&self, note_id: Uuid) -> bool {
        let deleted = self
            .run_action("delete_booking_note", ErrorKey::NoteFailed, self.repos.notes().delete(note_id))
            .await;
        if deleted.is_none() {
            return false;
        }
        self.state
            .write()
            .await
            .booking_notes
            .retain(|n| n.id != note_id);
        true
    }

    /// Flip a note's pin and re-sort the local list.
    pub async fn toggle_note_pin(&self, note_id: Uuid) -> bool {
        let current = self
            .state
            .read()
            .await
            .booking_notes
            .iter()
            .find(|n| n.id == note_id)
            .map(|n| n.is_pinned);
        let Some(pinned) = current else {
            error!(%note_id, "Cannot toggle pin of a note that is not loaded");
            self.fail(ErrorKey::NoteFailed).await;
            return false;
        };

        let updated = self
            .run_action(
                "toggle_note_pin",
                ErrorKey::NoteFailed,
                self.repos.notes().set_pinned(note_id, !pinned),
            )
            .await;
        if updated.is_none() {
            return false;
        }

        let mut state = self.state.write().await;
        if let Some(note) = state.booking_notes.iter_mut().find(|n| n.id == note_id) {
            note.is_pinned = !pinned;
        }
        sort_notes(&mut state.booking_notes);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::application::bookings::testing::Fixture;
    use crate::domain::{Profile, RepositoryProvider};

    #[tokio::test]
    async fn notes_use_profile_name_and_pinned_sort_first() {
        let fx = Fixture::new();
        fx.store
            .profiles()
            .save(Profile {
                id: fx.admin_id,
                full_name: Some("Tamar Admin".into()),
                email: None,
            })
            .await
            .unwrap();
        let booking = fx.booking("Anna", |_| {}).await;

        assert!(fx.admin.add_booking_note(booking.id, "first").await);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(fx.admin.add_booking_note(booking.id, "second").await);

        let notes = fx.admin.snapshot().await.booking_notes;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "second");
        assert_eq!(notes[0].author_name, "Tamar Admin");
        assert_eq!(notes[0].author_id, fx.admin_id);

        let older = notes[1].id;
        assert!(fx.admin.toggle_note_pin(older).await);
        let notes = fx.admin.snapshot().await.booking_notes;
        assert_eq!(notes[0].id, older);
        assert!(notes[0].is_pinned);

        assert!(fx.admin.delete_booking_note(older).await);
        let notes = fx.admin.snapshot().await.booking_notes;
        assert_eq!(notes.len(), 1);
        assert_eq!(fx.store.notes().list_for_booking(booking.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn session_name_is_used_without_profile() {
        let fx = Fixture::new();
        let booking = fx.booking("Anna", |_| {}).await;
        assert!(fx.admin.add_booking_note(booking.id, "hello").await);
        assert_eq!(fx.admin.snapshot().await.booking_notes[0].author_name, "Admin");
    }

    #[tokio::test]
    async fn blank_note_and_unknown_pin_fail() {
        let fx = Fixture::new();
        let booking = fx.booking("Anna", |_| {}).await;
        assert!(!fx.admin.add_booking_note(booking.id, "   ").await);
        assert_eq!(fx.admin.error().await.as_deref(), Some("Failed to save note"));

        fx.admin.clear_error().await;
        assert!(!fx.admin.toggle_note_pin(uuid::Uuid::new_v4()).await);
        assert!(fx.admin.error().await.is_some());
    }
}

//! Admin notes attached to a booking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingNote {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
}

impl BookingNote {
    pub fn new(
        booking_id: Uuid,
        author_id: Uuid,
        author_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            author_id,
            author_name: author_name.into(),
            content: content.into(),
            is_pinned: false,
            created_at: Utc::now(),
        }
    }
}

/// Pinned notes first, then newest first.
pub fn sort_notes(notes: &mut [BookingNote]) {
    notes.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn pinned_notes_sort_before_newer_ones() {
        let booking = Uuid::new_v4();
        let author = Uuid::new_v4();
        let mut old_pinned = BookingNote::new(booking, author, "Admin", "old");
        old_pinned.created_at = Utc::now() - Duration::days(3);
        old_pinned.is_pinned = true;
        let mut older = BookingNote::new(booking, author, "Admin", "older");
        older.created_at = Utc::now() - Duration::days(1);
        let newest = BookingNote::new(booking, author, "Admin", "newest");

        let mut notes = vec![older, newest, old_pinned];
        sort_notes(&mut notes);
        let order: Vec<_> = notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(order, vec!["old", "newest", "older"]);
    }
}

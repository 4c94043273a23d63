//! Booking list filters

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Booking, BookingPriority, BookingSource, BookingStatus, PaymentStatus};

/// Separates the fields of a search key; never part of a search term.
const KEY_SEPARATOR: char = '\u{1f}';

/// Lower-cased searchable text built from [`Booking::search_fields`].
///
/// Stored alongside each row so a store whose `LOWER()` only folds
/// ASCII still matches Cyrillic, Georgian or Turkish input.
pub fn search_key(fields: [&str; 3]) -> String {
    fields
        .map(str::to_lowercase)
        .join(&KEY_SEPARATOR.to_string())
}

/// Escape character used by [`BookingFilters::like_pattern`].
pub const LIKE_ESCAPE: char = '!';

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Active view over the booking list.
///
/// Every set dimension narrows the result (logical AND). `None` means
/// "all". The search term matches customer name, phone or location
/// name, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingFilters {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub source: Option<BookingSource>,
    pub pilot_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search_term: String,
    pub priority: Option<BookingPriority>,
}

impl BookingFilters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Lower-cased search term without control characters, or `None`
    /// when blank.
    pub fn normalized_search(&self) -> Option<String> {
        let term: String = self
            .search_term
            .chars()
            .filter(|c| !c.is_control())
            .collect();
        let term = term.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// `%term%` with wildcards escaped, matched against [`search_key`].
    pub fn like_pattern(&self) -> Option<String> {
        self.normalized_search()
            .map(|term| format!("%{}%", escape_like(&term)))
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        if self.status.is_some_and(|s| s != booking.status) {
            return false;
        }
        if self.payment_status.is_some_and(|s| s != booking.payment_status) {
            return false;
        }
        if self.source.is_some_and(|s| s != booking.booking_source) {
            return false;
        }
        if self.priority.is_some_and(|p| p != booking.priority) {
            return false;
        }
        if self.pilot_id.is_some() && self.pilot_id != booking.pilot_id {
            return false;
        }
        if self.company_id.is_some() && self.company_id != booking.company_id {
            return false;
        }
        if self.date_from.is_some_and(|d| booking.selected_date < d) {
            return false;
        }
        if self.date_to.is_some_and(|d| booking.selected_date > d) {
            return false;
        }
        match self.normalized_search() {
            Some(term) => booking
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(name: &str, phone: &str, location: &str, status: BookingStatus) -> Booking {
        let mut b = Booking::new(
            name,
            phone,
            location,
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            200.0,
        );
        b.status = status;
        b
    }

    #[test]
    fn default_filters_match_everything() {
        let f = BookingFilters::default();
        assert!(f.matches(&booking("Giorgi", "555", "Kazbegi", BookingStatus::Cancelled)));
    }

    #[test]
    fn status_and_search_combine_with_and() {
        let bookings = vec![
            booking("Ana", "555100", "Gudauri", BookingStatus::Pending),
            booking("Nino", "555200", "Kazbegi", BookingStatus::Confirmed),
            booking("Oliver", "555300", "Banana Hill", BookingStatus::Confirmed),
            booking("Banana Ltd", "555400", "Mestia", BookingStatus::Cancelled),
            booking("Tom", "555500", "Mestia", BookingStatus::Confirmed),
        ];
        let filters = BookingFilters {
            status: Some(BookingStatus::Confirmed),
            search_term: "ANA".into(),
            ..Default::default()
        };

        let names: Vec<_> = bookings
            .iter()
            .filter(|b| filters.matches(b))
            .map(|b| b.customer_name.as_str())
            .collect();
        assert_eq!(names, vec!["Oliver"]);
    }

    #[test]
    fn search_matches_phone() {
        let f = BookingFilters {
            search_term: " 5553 ".into(),
            ..Default::default()
        };
        assert!(f.matches(&booking("Tom", "555300", "Mestia", BookingStatus::Pending)));
        assert!(!f.matches(&booking("Tom", "555400", "Mestia", BookingStatus::Pending)));
    }

    #[test]
    fn date_range_is_inclusive() {
        let mut b = booking("Tom", "1", "Mestia", BookingStatus::Pending);
        b.selected_date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        let f = BookingFilters {
            date_from: NaiveDate::from_ymd_opt(2025, 7, 10),
            date_to: NaiveDate::from_ymd_opt(2025, 7, 10),
            ..Default::default()
        };
        assert!(f.matches(&b));
        b.selected_date = NaiveDate::from_ymd_opt(2025, 7, 11).unwrap();
        assert!(!f.matches(&b));
    }

    #[test]
    fn assignment_filters_require_exact_owner() {
        let pilot = Uuid::new_v4();
        let mut b = booking("Tom", "1", "Mestia", BookingStatus::Pending);
        let f = BookingFilters {
            pilot_id: Some(pilot),
            ..Default::default()
        };
        assert!(!f.matches(&b));
        b.pilot_id = Some(pilot);
        assert!(f.matches(&b));
    }

    #[test]
    fn search_folds_non_ascii_case() {
        let b = booking("Анна Иванова", "1", "Ölüdeniz", BookingStatus::Pending);
        for term in ["АННА", "анна", "ölü", "ÖLÜ"] {
            let f = BookingFilters {
                search_term: term.into(),
                ..Default::default()
            };
            assert!(f.matches(&b), "{term}");
        }
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        let f = BookingFilters {
            search_term: " 100%_off! ".into(),
            ..Default::default()
        };
        assert_eq!(f.like_pattern().as_deref(), Some("%100!%!_off!!%"));
        assert_eq!(BookingFilters::default().like_pattern(), None);
    }

    #[test]
    fn search_key_keeps_fields_apart() {
        let b = booking("Ana", "555", "Gudauri", BookingStatus::Pending);
        let key = search_key(b.search_fields());
        assert!(key.starts_with("ana"));
        assert!(!key.contains("ana555"));
        let f = BookingFilters {
            search_term: "ana\u{1f}555".into(),
            ..Default::default()
        };
        assert!(!f.matches(&b));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut f = BookingFilters {
            priority: Some(BookingPriority::Urgent),
            search_term: "x".into(),
            ..Default::default()
        };
        f.reset();
        assert_eq!(f, BookingFilters::default());
    }
}

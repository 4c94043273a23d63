//! Admin view state and request types

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{
    Booking, BookingFilters, BookingHistory, BookingNote, BookingSummary, Company, Locale, Pilot,
    RefundType,
};

/// Signed-in administrator driving the service
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user_id: Uuid,
    /// Used as note author when the profile has no name
    pub display_name: String,
    /// Language of error messages
    pub locale: Locale,
}

impl AdminSession {
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Booking with its assigned pilot and company joined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub pilot: Option<Pilot>,
    pub company: Option<Company>,
}

impl BookingDetails {
    pub fn id(&self) -> Uuid {
        self.booking.id
    }
}

/// Everything the admin screens render.
///
/// Rewritten wholesale on re-fetch; patched in place only by the
/// low-latency operations (seen flags, priority, tags, notes).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminState {
    pub bookings: Vec<BookingDetails>,
    pub selected_booking: Option<BookingDetails>,
    pub selected_booking_ids: Vec<Uuid>,
    pub booking_notes: Vec<BookingNote>,
    pub booking_history: Vec<BookingHistory>,
    pub summary: Option<BookingSummary>,
    pub filters: BookingFilters,
    pub is_loading: bool,
    pub is_action_loading: bool,
    pub error: Option<String>,
}

impl AdminState {
    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected_booking
            .as_ref()
            .is_some_and(|b| b.booking.id == id)
    }

    /// Apply `f` to the listed row and to the selected booking if it
    /// is the same one.
    pub fn patch_booking(&mut self, id: Uuid, mut f: impl FnMut(&mut Booking)) {
        if let Some(row) = self.bookings.iter_mut().find(|b| b.booking.id == id) {
            f(&mut row.booking);
        }
        if let Some(selected) = self.selected_booking.as_mut() {
            if selected.booking.id == id {
                f(&mut selected.booking);
            }
        }
    }
}

pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleRequest {
    pub booking_id: Uuid,
    pub new_date: NaiveDate,
    pub reason: Option<String>,
    /// Per-locale reason text shown in the notification
    #[serde(default)]
    pub reasons: HashMap<Locale, String>,
    #[serde(default = "default_true")]
    pub notify_customer: bool,
    #[serde(default = "default_true")]
    pub notify_pilot: bool,
}

/// Absent ids are left untouched; `null` clears the assignment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReassignRequest {
    pub booking_id: Uuid,
    #[serde(default, deserialize_with = "double_option")]
    pub new_pilot_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub new_company_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefundRequest {
    pub booking_id: Uuid,
    pub refund_amount: f64,
    pub refund_type: RefundType,
    pub reason: Option<String>,
    /// Also move the money through the configured refund gateway
    #[serde(default)]
    pub process_gateway_refund: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassign_distinguishes_absent_from_null() {
        let id = Uuid::new_v4();
        let req: ReassignRequest = serde_json::from_value(serde_json::json!({
            "booking_id": id,
            "new_pilot_id": null,
        }))
        .unwrap();
        assert_eq!(req.new_pilot_id, Some(None));
        assert_eq!(req.new_company_id, None);
    }

    #[test]
    fn reschedule_notifies_by_default() {
        let req: RescheduleRequest = serde_json::from_value(serde_json::json!({
            "booking_id": Uuid::new_v4(),
            "new_date": "2025-07-01",
            "reason": null,
            "reasons": {"de": "Wind"},
        }))
        .unwrap();
        assert!(req.notify_customer && req.notify_pilot);
        assert_eq!(req.reasons.get(&Locale::De).map(String::as_str), Some("Wind"));
    }
}

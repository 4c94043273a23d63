//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            pub fn from_str(s: &str) -> Self {
                match s {
                    $($text => Self::$variant,)+
                    _ => Self::$default,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

string_enum! {
    /// Lifecycle status of a booking
    BookingStatus, default = Pending {
        Pending => "pending",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
        OnHold => "on_hold",
        NoShow => "no_show",
        Rescheduled => "rescheduled",
    }
}

string_enum! {
    PaymentStatus, default = PendingDeposit {
        PendingDeposit => "pending_deposit",
        DepositPaid => "deposit_paid",
        FullyPaid => "fully_paid",
        Refunded => "refunded",
    }
}

string_enum! {
    /// Where the booking came from
    BookingSource, default = PlatformGeneral {
        /// Booked through the public marketplace
        PlatformGeneral => "platform_general",
        /// Booked on a company's own page
        CompanyDirect => "company_direct",
        /// Booked on a pilot's own page
        PilotDirect => "pilot_direct",
    }
}

string_enum! {
    RefundStatus, default = Pending {
        Pending => "pending",
        Processed => "processed",
        Partial => "partial",
    }
}

string_enum! {
    RefundType, default = Full {
        Full => "full",
        Partial => "partial",
    }
}

string_enum! {
    BookingPriority, default = Normal {
        Low => "low",
        Normal => "normal",
        High => "high",
        Urgent => "urgent",
    }
}

string_enum! {
    /// Party acknowledging a booking
    SeenRole, default = Admin {
        Pilot => "pilot",
        Company => "company",
        Admin => "admin",
    }
}

impl Default for BookingPriority {
    fn default() -> Self {
        Self::Normal
    }
}

/// A reservation of a paragliding flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    /// Customer account, when the customer booked while signed in
    pub user_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_phone: String,
    pub contact_method: Option<String>,

    pub country_id: Option<Uuid>,
    pub country_name: Option<String>,
    pub location_id: Option<Uuid>,
    pub location_name: String,
    pub flight_type_id: Option<Uuid>,
    pub flight_type_name: Option<String>,

    pub selected_date: NaiveDate,
    pub number_of_people: i32,

    pub base_price: f64,
    pub total_price: f64,
    pub currency: String,
    pub promo_code: Option<String>,
    pub promo_discount: f64,

    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub booking_source: BookingSource,

    pub pilot_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub assigned_at: Option<DateTime<Utc>>,

    /// Date before the first reschedule; written once
    pub original_date: Option<NaiveDate>,
    pub reschedule_count: i32,
    pub last_rescheduled_at: Option<DateTime<Utc>>,
    pub reschedule_reason: Option<String>,

    pub refund_amount: Option<f64>,
    pub refund_status: Option<RefundStatus>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub refunded_by: Option<Uuid>,

    pub cancellation_reason: Option<String>,
    pub on_hold_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub no_show_at: Option<DateTime<Utc>>,

    pub seen_by_pilot: bool,
    pub pilot_seen_at: Option<DateTime<Utc>>,
    pub seen_by_company: bool,
    pub company_seen_at: Option<DateTime<Utc>>,
    pub seen_by_admin: bool,
    pub admin_seen_at: Option<DateTime<Utc>>,

    pub priority: BookingPriority,
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Create a pending web booking with no assignment.
    pub fn new(
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        location_name: impl Into<String>,
        selected_date: NaiveDate,
        total_price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            contact_method: None,
            country_id: None,
            country_name: None,
            location_id: None,
            location_name: location_name.into(),
            flight_type_id: None,
            flight_type_name: None,
            selected_date,
            number_of_people: 1,
            base_price: total_price,
            total_price,
            currency: "GEL".to_string(),
            promo_code: None,
            promo_discount: 0.0,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::PendingDeposit,
            booking_source: BookingSource::PlatformGeneral,
            pilot_id: None,
            company_id: None,
            assigned_at: None,
            original_date: None,
            reschedule_count: 0,
            last_rescheduled_at: None,
            reschedule_reason: None,
            refund_amount: None,
            refund_status: None,
            refunded_at: None,
            refunded_by: None,
            cancellation_reason: None,
            on_hold_reason: None,
            cancelled_at: None,
            no_show_at: None,
            seen_by_pilot: false,
            pilot_seen_at: None,
            seen_by_company: false,
            company_seen_at: None,
            seen_by_admin: false,
            admin_seen_at: None,
            priority: BookingPriority::Normal,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Fields the list search looks at
    pub fn search_fields(&self) -> [&str; 3] {
        [
            self.customer_name.as_str(),
            self.customer_phone.as_str(),
            self.location_name.as_str(),
        ]
    }

    pub fn is_seen_by(&self, role: SeenRole) -> bool {
        match role {
            SeenRole::Pilot => self.seen_by_pilot,
            SeenRole::Company => self.seen_by_company,
            SeenRole::Admin => self.seen_by_admin,
        }
    }

    pub fn mark_seen(&mut self, role: SeenRole, at: DateTime<Utc>) {
        match role {
            SeenRole::Pilot => {
                self.seen_by_pilot = true;
                self.pilot_seen_at = Some(at);
            }
            SeenRole::Company => {
                self.seen_by_company = true;
                self.company_seen_at = Some(at);
            }
            SeenRole::Admin => {
                self.seen_by_admin = true;
                self.admin_seen_at = Some(at);
            }
        }
    }
}

/// Partial update of a booking row.
///
/// `None` leaves a column untouched. Nullable columns use a nested
/// `Option` so they can be cleared explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub selected_date: Option<NaiveDate>,
    pub original_date: Option<NaiveDate>,
    pub reschedule_count: Option<i32>,
    pub last_rescheduled_at: Option<DateTime<Utc>>,
    pub reschedule_reason: Option<Option<String>>,
    pub pilot_id: Option<Option<Uuid>>,
    pub company_id: Option<Option<Uuid>>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub refund_amount: Option<f64>,
    pub refund_status: Option<RefundStatus>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub refunded_by: Option<Uuid>,
    pub cancellation_reason: Option<Option<String>>,
    pub on_hold_reason: Option<Option<String>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub no_show_at: Option<DateTime<Utc>>,
    pub seen: Option<(SeenRole, DateTime<Utc>)>,
    pub priority: Option<BookingPriority>,
    pub tags: Option<Vec<String>>,
}

impl BookingPatch {
    /// Status change with its status-specific side columns.
    pub fn status_change(status: BookingStatus, reason: Option<String>, now: DateTime<Utc>) -> Self {
        let mut patch = Self {
            status: Some(status),
            ..Default::default()
        };
        match status {
            BookingStatus::Cancelled => {
                patch.cancelled_at = Some(now);
                patch.cancellation_reason = Some(reason);
            }
            BookingStatus::OnHold => patch.on_hold_reason = Some(reason),
            BookingStatus::NoShow => patch.no_show_at = Some(now),
            _ => {}
        }
        patch
    }

    /// Move `current` to `new_date`, keeping the very first date in
    /// `original_date`.
    pub fn reschedule(
        current: &Booking,
        new_date: NaiveDate,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            selected_date: Some(new_date),
            original_date: Some(current.original_date.unwrap_or(current.selected_date)),
            reschedule_count: Some(current.reschedule_count + 1),
            last_rescheduled_at: Some(now),
            reschedule_reason: Some(reason),
            ..Default::default()
        }
    }

    /// Reassignment. A new company without an explicit pilot drops the
    /// current pilot so the company picks its own.
    pub fn reassign(
        new_pilot_id: Option<Option<Uuid>>,
        new_company_id: Option<Option<Uuid>>,
        now: DateTime<Utc>,
    ) -> Self {
        let pilot_id = match (&new_pilot_id, &new_company_id) {
            (None, Some(Some(_))) => Some(None),
            _ => new_pilot_id,
        };
        Self {
            pilot_id,
            company_id: new_company_id,
            assigned_at: Some(now),
            ..Default::default()
        }
    }

    pub fn refund(
        amount: f64,
        refund_type: RefundType,
        reason: Option<String>,
        refunded_by: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        let (refund_status, payment_status) = match refund_type {
            RefundType::Full => (RefundStatus::Processed, PaymentStatus::Refunded),
            RefundType::Partial => (RefundStatus::Partial, PaymentStatus::DepositPaid),
        };
        Self {
            refund_amount: Some(amount),
            refund_status: Some(refund_status),
            refunded_at: Some(now),
            refunded_by: Some(refunded_by),
            payment_status: Some(payment_status),
            cancellation_reason: Some(reason),
            ..Default::default()
        }
    }

    pub fn seen(role: SeenRole, now: DateTime<Utc>) -> Self {
        Self {
            seen: Some((role, now)),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch in place and bump `updated_at`.
    pub fn apply(self, booking: &mut Booking) {
        if let Some(v) = self.status {
            booking.status = v;
        }
        if let Some(v) = self.payment_status {
            booking.payment_status = v;
        }
        if let Some(v) = self.selected_date {
            booking.selected_date = v;
        }
        if let Some(v) = self.original_date {
            booking.original_date = Some(v);
        }
        if let Some(v) = self.reschedule_count {
            booking.reschedule_count = v;
        }
        if let Some(v) = self.last_rescheduled_at {
            booking.last_rescheduled_at = Some(v);
        }
        if let Some(v) = self.reschedule_reason {
            booking.reschedule_reason = v;
        }
        if let Some(v) = self.pilot_id {
            booking.pilot_id = v;
        }
        if let Some(v) = self.company_id {
            booking.company_id = v;
        }
        if let Some(v) = self.assigned_at {
            booking.assigned_at = Some(v);
        }
        if let Some(v) = self.refund_amount {
            booking.refund_amount = Some(v);
        }
        if let Some(v) = self.refund_status {
            booking.refund_status = Some(v);
        }
        if let Some(v) = self.refunded_at {
            booking.refunded_at = Some(v);
        }
        if let Some(v) = self.refunded_by {
            booking.refunded_by = Some(v);
        }
        if let Some(v) = self.cancellation_reason {
            booking.cancellation_reason = v;
        }
        if let Some(v) = self.on_hold_reason {
            booking.on_hold_reason = v;
        }
        if let Some(v) = self.cancelled_at {
            booking.cancelled_at = Some(v);
        }
        if let Some(v) = self.no_show_at {
            booking.no_show_at = Some(v);
        }
        if let Some((role, at)) = self.seen {
            booking.mark_seen(role, at);
        }
        if let Some(v) = self.priority {
            booking.priority = v;
        }
        if let Some(v) = self.tags {
            booking.tags = v;
        }
        booking.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_booking() -> Booking {
        Booking::new("Ana Beridze", "+995555000111", "Gudauri", date("2025-06-10"), 250.0)
    }

    #[test]
    fn new_booking_is_pending_and_unassigned() {
        let b = sample_booking();
        assert_eq!(b.status, BookingStatus::Pending);
        assert_eq!(b.payment_status, PaymentStatus::PendingDeposit);
        assert_eq!(b.reschedule_count, 0);
        assert!(b.pilot_id.is_none());
        assert!(b.original_date.is_none());
    }

    #[test]
    fn unknown_status_falls_back_to_default() {
        assert_eq!(BookingStatus::from_str("on_hold"), BookingStatus::OnHold);
        assert_eq!(BookingStatus::from_str("bogus"), BookingStatus::Pending);
        assert_eq!(BookingStatus::ALL.len(), 7);
    }

    #[test]
    fn cancelling_stamps_time_and_reason() {
        let now = Utc::now();
        let mut b = sample_booking();
        BookingPatch::status_change(BookingStatus::Cancelled, Some("weather".into()), now).apply(&mut b);
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert_eq!(b.cancelled_at, Some(now));
        assert_eq!(b.cancellation_reason.as_deref(), Some("weather"));
        assert!(b.no_show_at.is_none());
    }

    #[test]
    fn hold_and_no_show_set_their_own_columns() {
        let now = Utc::now();
        let mut b = sample_booking();
        BookingPatch::status_change(BookingStatus::OnHold, Some("wind".into()), now).apply(&mut b);
        assert_eq!(b.on_hold_reason.as_deref(), Some("wind"));
        assert!(b.cancelled_at.is_none());

        BookingPatch::status_change(BookingStatus::NoShow, None, now).apply(&mut b);
        assert_eq!(b.no_show_at, Some(now));
        assert_eq!(b.on_hold_reason.as_deref(), Some("wind"));
    }

    #[test]
    fn original_date_is_kept_across_reschedules() {
        let mut b = sample_booking();
        BookingPatch::reschedule(&b, date("2025-06-12"), Some("wind".into()), Utc::now()).apply(&mut b);
        assert_eq!(b.original_date, Some(date("2025-06-10")));
        assert_eq!(b.selected_date, date("2025-06-12"));
        assert_eq!(b.reschedule_count, 1);

        BookingPatch::reschedule(&b, date("2025-06-20"), None, Utc::now()).apply(&mut b);
        assert_eq!(b.original_date, Some(date("2025-06-10")));
        assert_eq!(b.selected_date, date("2025-06-20"));
        assert_eq!(b.reschedule_count, 2);
        assert!(b.reschedule_reason.is_none());
    }

    #[test]
    fn new_company_without_pilot_clears_pilot() {
        let mut b = sample_booking();
        b.pilot_id = Some(Uuid::new_v4());
        let company = Uuid::new_v4();
        BookingPatch::reassign(None, Some(Some(company)), Utc::now()).apply(&mut b);
        assert_eq!(b.company_id, Some(company));
        assert!(b.pilot_id.is_none());
        assert!(b.assigned_at.is_some());
    }

    #[test]
    fn explicit_pilot_survives_company_change() {
        let mut b = sample_booking();
        let pilot = Uuid::new_v4();
        let company = Uuid::new_v4();
        BookingPatch::reassign(Some(Some(pilot)), Some(Some(company)), Utc::now()).apply(&mut b);
        assert_eq!(b.pilot_id, Some(pilot));
        assert_eq!(b.company_id, Some(company));
    }

    #[test]
    fn partial_refund_keeps_deposit_paid() {
        let admin = Uuid::new_v4();
        let mut b = sample_booking();
        BookingPatch::refund(50.0, RefundType::Partial, Some("late".into()), admin, Utc::now()).apply(&mut b);
        assert_eq!(b.refund_amount, Some(50.0));
        assert_eq!(b.refund_status, Some(RefundStatus::Partial));
        assert_eq!(b.payment_status, PaymentStatus::DepositPaid);
        assert_eq!(b.refunded_by, Some(admin));
        assert_eq!(b.cancellation_reason.as_deref(), Some("late"));
    }

    #[test]
    fn full_refund_marks_refunded() {
        let mut b = sample_booking();
        BookingPatch::refund(250.0, RefundType::Full, None, Uuid::new_v4(), Utc::now()).apply(&mut b);
        assert_eq!(b.refund_status, Some(RefundStatus::Processed));
        assert_eq!(b.payment_status, PaymentStatus::Refunded);
    }

    #[test]
    fn seen_patch_only_touches_its_role() {
        let mut b = sample_booking();
        BookingPatch::seen(SeenRole::Pilot, Utc::now()).apply(&mut b);
        assert!(b.is_seen_by(SeenRole::Pilot));
        assert!(b.pilot_seen_at.is_some());
        assert!(!b.is_seen_by(SeenRole::Company));
        assert!(!b.is_seen_by(SeenRole::Admin));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(BookingPatch::default().is_empty());
        assert!(!BookingPatch::seen(SeenRole::Admin, Utc::now()).is_empty());
    }
}

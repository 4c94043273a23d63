//! Dashboard summary over all bookings

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::{Booking, BookingStatus, PaymentStatus};

/// Lightweight projection used for the summary; avoids loading whole rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummaryRow {
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub total_price: f64,
    pub refund_amount: Option<f64>,
    pub selected_date: NaiveDate,
}

impl From<&Booking> for BookingSummaryRow {
    fn from(b: &Booking) -> Self {
        Self {
            status: b.status,
            payment_status: b.payment_status,
            total_price: b.total_price,
            refund_amount: b.refund_amount,
            selected_date: b.selected_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub confirmed_bookings: usize,
    pub completed_bookings: usize,
    pub cancelled_bookings: usize,
    pub on_hold_bookings: usize,
    pub no_show_bookings: usize,
    pub rescheduled_bookings: usize,
    pub total_revenue: f64,
    pub total_refunded: f64,
    pub pending_deposits: usize,
    pub today_bookings: usize,
    /// Bookings dated within `[today - 7 days, today]`
    pub this_week_bookings: usize,
}

impl BookingSummary {
    /// Full client-side aggregation; no pagination.
    pub fn compute(rows: &[BookingSummaryRow], today: NaiveDate) -> Self {
        let week_ago = today - Duration::days(7);
        let mut summary = Self {
            total_bookings: rows.len(),
            ..Default::default()
        };

        for row in rows {
            match row.status {
                BookingStatus::Pending => summary.pending_bookings += 1,
                BookingStatus::Confirmed => summary.confirmed_bookings += 1,
                BookingStatus::Completed => summary.completed_bookings += 1,
                BookingStatus::Cancelled => summary.cancelled_bookings += 1,
                BookingStatus::OnHold => summary.on_hold_bookings += 1,
                BookingStatus::NoShow => summary.no_show_bookings += 1,
                BookingStatus::Rescheduled => summary.rescheduled_bookings += 1,
            }
            summary.total_revenue += row.total_price;
            summary.total_refunded += row.refund_amount.unwrap_or(0.0);
            if row.payment_status == PaymentStatus::PendingDeposit {
                summary.pending_deposits += 1;
            }
            if row.selected_date == today {
                summary.today_bookings += 1;
            }
            if row.selected_date >= week_ago && row.selected_date <= today {
                summary.this_week_bookings += 1;
            }
        }

        summary
    }

    pub fn count_for(&self, status: BookingStatus) -> usize {
        match status {
            BookingStatus::Pending => self.pending_bookings,
            BookingStatus::Confirmed => self.confirmed_bookings,
            BookingStatus::Completed => self.completed_bookings,
            BookingStatus::Cancelled => self.cancelled_bookings,
            BookingStatus::OnHold => self.on_hold_bookings,
            BookingStatus::NoShow => self.no_show_bookings,
            BookingStatus::Rescheduled => self.rescheduled_bookings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: BookingStatus, price: f64, date: NaiveDate) -> BookingSummaryRow {
        BookingSummaryRow {
            status,
            payment_status: PaymentStatus::DepositPaid,
            total_price: price,
            refund_amount: None,
            selected_date: date,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    #[test]
    fn counts_each_status() {
        let rows: Vec<_> = BookingStatus::ALL
            .iter()
            .map(|s| row(*s, 100.0, today()))
            .collect();
        let summary = BookingSummary::compute(&rows, today());
        assert_eq!(summary.total_bookings, 7);
        for status in BookingStatus::ALL {
            assert_eq!(summary.count_for(*status), 1, "{status}");
        }
        assert_eq!(summary.total_revenue, 700.0);
        assert_eq!(summary.today_bookings, 7);
    }

    #[test]
    fn week_window_includes_seventh_day_only() {
        let rows = vec![
            row(BookingStatus::Pending, 0.0, today() - Duration::days(7)),
            row(BookingStatus::Pending, 0.0, today() - Duration::days(8)),
        ];
        let summary = BookingSummary::compute(&rows, today());
        assert_eq!(summary.this_week_bookings, 1);
        assert_eq!(summary.today_bookings, 0);
    }

    #[test]
    fn sums_refunds_and_pending_deposits() {
        let mut refunded = row(BookingStatus::Cancelled, 300.0, today());
        refunded.refund_amount = Some(120.5);
        let mut unpaid = row(BookingStatus::Pending, 80.0, today() + Duration::days(3));
        unpaid.payment_status = PaymentStatus::PendingDeposit;

        let summary = BookingSummary::compute(&[refunded, unpaid], today());
        assert_eq!(summary.total_refunded, 120.5);
        assert_eq!(summary.total_revenue, 380.0);
        assert_eq!(summary.pending_deposits, 1);
        assert_eq!(summary.this_week_bookings, 1);
    }

    #[test]
    fn empty_input_gives_zeroes() {
        assert_eq!(BookingSummary::compute(&[], today()), BookingSummary::default());
    }
}

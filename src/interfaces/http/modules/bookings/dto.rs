//! Request bodies for the booking endpoints

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::application::bookings::state::double_option;
use crate::application::{ReassignRequest, RefundRequest, RescheduleRequest};
use crate::domain::{BookingPriority, BookingStatus, Locale, RefundType, SeenRole};

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusBody {
    pub status: BookingStatus,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

/// Without `ids` the current bulk selection is used
#[derive(Debug, Deserialize, Validate)]
pub struct BulkStatusBody {
    #[validate(length(min = 1))]
    pub ids: Option<Vec<Uuid>>,
    pub status: BookingStatus,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct RescheduleBody {
    pub new_date: NaiveDate,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
    #[serde(default)]
    pub reasons: HashMap<Locale, String>,
    #[serde(default = "default_true")]
    pub notify_customer: bool,
    #[serde(default = "default_true")]
    pub notify_pilot: bool,
}

impl RescheduleBody {
    pub fn into_request(self, booking_id: Uuid) -> RescheduleRequest {
        RescheduleRequest {
            booking_id,
            new_date: self.new_date,
            reason: self.reason,
            reasons: self.reasons,
            notify_customer: self.notify_customer,
            notify_pilot: self.notify_pilot,
        }
    }
}

/// A missing field leaves the assignment alone, `null` clears it
#[derive(Debug, Deserialize, Validate)]
pub struct ReassignBody {
    #[serde(default, deserialize_with = "double_option")]
    pub new_pilot_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub new_company_id: Option<Option<Uuid>>,
}

impl ReassignBody {
    pub fn into_request(self, booking_id: Uuid) -> ReassignRequest {
        ReassignRequest {
            booking_id,
            new_pilot_id: self.new_pilot_id,
            new_company_id: self.new_company_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefundBody {
    #[validate(range(min = 0.01, message = "must be positive"))]
    pub refund_amount: f64,
    pub refund_type: RefundType,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
    #[serde(default)]
    pub process_gateway_refund: bool,
}

impl RefundBody {
    pub fn into_request(self, booking_id: Uuid) -> RefundRequest {
        RefundRequest {
            booking_id,
            refund_amount: self.refund_amount,
            refund_type: self.refund_type,
            reason: self.reason,
            process_gateway_refund: self.process_gateway_refund,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SeenBody {
    pub role: SeenRole,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NoteBody {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PriorityBody {
    pub priority: BookingPriority,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagsBody {
    #[validate(length(max = 32))]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnseenQuery {
    pub role: SeenRole,
    pub owner_id: Option<Uuid>,
}

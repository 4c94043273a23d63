//! Multi-language inbox messages and their per-user delivery rows

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::locale::LocalizedText;
use crate::domain::DomainResult;

pub const MESSAGE_TYPE_RESCHEDULE: &str = "booking_rescheduled";
pub const MESSAGE_TYPE_REASSIGNMENT: &str = "booking_assigned";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Option<Uuid>,
    pub message_type: String,
    pub booking_id: Option<Uuid>,
    pub subject: LocalizedText,
    pub content: LocalizedText,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        sender_id: Option<Uuid>,
        message_type: impl Into<String>,
        booking_id: Option<Uuid>,
        subject: LocalizedText,
        content: LocalizedText,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            message_type: message_type.into(),
            booking_id,
            subject,
            content,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecipient {
    pub id: Uuid,
    pub message_id: Uuid,
    pub user_id: Uuid,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MessageRecipient {
    /// Unread delivery row for `user_id`
    pub fn unread(message_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            message_id,
            user_id,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn insert_message(&self, message: Message) -> DomainResult<()>;

    async fn insert_recipients(&self, recipients: Vec<MessageRecipient>) -> DomainResult<()>;

    /// Messages about a booking, newest first
    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<Message>>;

    async fn recipients_of(&self, message_id: Uuid) -> DomainResult<Vec<MessageRecipient>>;
}

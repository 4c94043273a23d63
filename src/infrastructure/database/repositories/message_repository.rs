//! SeaORM implementation of MessageRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{DomainResult, LocalizedText, Message, MessageRecipient, MessageRepository};
use crate::infrastructure::database::entities::{message, message_recipient};

use super::db_err;

pub struct SeaOrmMessageRepository {
    db: DatabaseConnection,
}

impl SeaOrmMessageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn message_to_domain(m: message::Model) -> Message {
    Message {
        id: m.id,
        sender_id: m.sender_id,
        message_type: m.message_type,
        booking_id: m.booking_id,
        subject: LocalizedText {
            ka: m.subject_ka,
            en: m.subject_en,
            ru: m.subject_ru,
            de: m.subject_de,
            tr: m.subject_tr,
            ar: m.subject_ar,
        },
        content: LocalizedText {
            ka: m.content_ka,
            en: m.content_en,
            ru: m.content_ru,
            de: m.content_de,
            tr: m.content_tr,
            ar: m.content_ar,
        },
        created_at: m.created_at,
    }
}

fn recipient_to_active(r: MessageRecipient) -> message_recipient::ActiveModel {
    message_recipient::ActiveModel {
        id: Set(r.id),
        message_id: Set(r.message_id),
        user_id: Set(r.user_id),
        is_read: Set(r.is_read),
        read_at: Set(r.read_at),
        created_at: Set(r.created_at),
    }
}

#[async_trait]
impl MessageRepository for SeaOrmMessageRepository {
    async fn insert_message(&self, m: Message) -> DomainResult<()> {
        debug!("Saving message {} ({})", m.id, m.message_type);
        let model = message::ActiveModel {
            id: Set(m.id),
            sender_id: Set(m.sender_id),
            message_type: Set(m.message_type),
            booking_id: Set(m.booking_id),
            subject_ka: Set(m.subject.ka),
            subject_en: Set(m.subject.en),
            subject_ru: Set(m.subject.ru),
            subject_de: Set(m.subject.de),
            subject_tr: Set(m.subject.tr),
            subject_ar: Set(m.subject.ar),
            content_ka: Set(m.content.ka),
            content_en: Set(m.content.en),
            content_ru: Set(m.content.ru),
            content_de: Set(m.content.de),
            content_tr: Set(m.content.tr),
            content_ar: Set(m.content.ar),
            created_at: Set(m.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn insert_recipients(&self, recipients: Vec<MessageRecipient>) -> DomainResult<()> {
        if recipients.is_empty() {
            return Ok(());
        }
        message_recipient::Entity::insert_many(recipients.into_iter().map(recipient_to_active))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<Message>> {
        let models = message::Entity::find()
            .filter(message::Column::BookingId.eq(booking_id))
            .order_by_desc(message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(message_to_domain).collect())
    }

    async fn recipients_of(&self, message_id: Uuid) -> DomainResult<Vec<MessageRecipient>> {
        let models = message_recipient::Entity::find()
            .filter(message_recipient::Column::MessageId.eq(message_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(|m| MessageRecipient {
                id: m.id,
                message_id: m.message_id,
                user_id: m.user_id,
                is_read: m.is_read,
                read_at: m.read_at,
                created_at: m.created_at,
            })
            .collect())
    }
}

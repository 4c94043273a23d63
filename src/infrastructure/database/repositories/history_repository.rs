//! SeaORM implementation of HistoryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{BookingHistory, DomainResult, HistoryRepository};
use crate::infrastructure::database::entities::booking_history;

use super::db_err;

pub struct SeaOrmHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryRepository for SeaOrmHistoryRepository {
    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<BookingHistory>> {
        let models = booking_history::Entity::find()
            .filter(booking_history::Column::BookingId.eq(booking_id))
            .order_by_desc(booking_history::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(|m| BookingHistory {
                id: m.id,
                booking_id: m.booking_id,
                action: m.action,
                old_value: m.old_value,
                new_value: m.new_value,
                changed_by: m.changed_by,
                created_at: m.created_at,
            })
            .collect())
    }

    async fn append(&self, entry: BookingHistory) -> DomainResult<()> {
        let model = booking_history::ActiveModel {
            id: Set(entry.id),
            booking_id: Set(entry.booking_id),
            action: Set(entry.action),
            old_value: Set(entry.old_value),
            new_value: Set(entry.new_value),
            changed_by: Set(entry.changed_by),
            created_at: Set(entry.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

//! SeaORM implementation of NoteRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{BookingNote, DomainError, DomainResult, NoteRepository};
use crate::infrastructure::database::entities::booking_note;

use super::db_err;

pub struct SeaOrmNoteRepository {
    db: DatabaseConnection,
}

impl SeaOrmNoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: booking_note::Model) -> BookingNote {
    BookingNote {
        id: m.id,
        booking_id: m.booking_id,
        author_id: m.author_id,
        author_name: m.author_name,
        content: m.content,
        is_pinned: m.is_pinned,
        created_at: m.created_at,
    }
}

#[async_trait]
impl NoteRepository for SeaOrmNoteRepository {
    async fn list_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<BookingNote>> {
        let models = booking_note::Entity::find()
            .filter(booking_note::Column::BookingId.eq(booking_id))
            .order_by_desc(booking_note::Column::IsPinned)
            .order_by_desc(booking_note::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn insert(&self, note: BookingNote) -> DomainResult<()> {
        debug!("Saving note {} for booking {}", note.id, note.booking_id);
        let model = booking_note::ActiveModel {
            id: Set(note.id),
            booking_id: Set(note.booking_id),
            author_id: Set(note.author_id),
            author_name: Set(note.author_name),
            content: Set(note.content),
            is_pinned: Set(note.is_pinned),
            created_at: Set(note.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = booking_note::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("BookingNote", id));
        }
        Ok(())
    }

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> DomainResult<()> {
        let result = booking_note::Entity::update_many()
            .col_expr(booking_note::Column::IsPinned, Expr::value(pinned))
            .filter(booking_note::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("BookingNote", id));
        }
        Ok(())
    }
}

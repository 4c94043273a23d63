//! Create booking_notes and booking_history tables
//!
//! Both cascade when their booking is deleted.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingNotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookingNotes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BookingNotes::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingNotes::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(BookingNotes::AuthorName).string().not_null())
                    .col(ColumnDef::new(BookingNotes::Content).text().not_null())
                    .col(
                        ColumnDef::new(BookingNotes::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BookingNotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_notes_booking")
                            .from(BookingNotes::Table, BookingNotes::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_notes_booking")
                    .table(BookingNotes::Table)
                    .col(BookingNotes::BookingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookingHistory::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingHistory::Action).string().not_null())
                    .col(ColumnDef::new(BookingHistory::OldValue).text())
                    .col(ColumnDef::new(BookingHistory::NewValue).text())
                    .col(ColumnDef::new(BookingHistory::ChangedBy).uuid())
                    .col(
                        ColumnDef::new(BookingHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_history_booking")
                            .from(BookingHistory::Table, BookingHistory::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_history_booking")
                    .table(BookingHistory::Table)
                    .col(BookingHistory::BookingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BookingNotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BookingNotes {
    Table,
    Id,
    BookingId,
    AuthorId,
    AuthorName,
    Content,
    IsPinned,
    CreatedAt,
}

#[derive(Iden)]
pub enum BookingHistory {
    Table,
    Id,
    BookingId,
    Action,
    OldValue,
    NewValue,
    ChangedBy,
    CreatedAt,
}

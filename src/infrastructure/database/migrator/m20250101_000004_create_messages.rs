//! Create messages and message_recipients tables
//!
//! Messages carry one subject and one body per supported locale.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut messages = Table::create();
        messages
            .table(Messages::Table)
            .if_not_exists()
            .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Messages::SenderId).uuid())
            .col(ColumnDef::new(Messages::MessageType).string().not_null())
            .col(ColumnDef::new(Messages::BookingId).uuid());
        for col in [
            Messages::SubjectKa,
            Messages::SubjectEn,
            Messages::SubjectRu,
            Messages::SubjectDe,
            Messages::SubjectTr,
            Messages::SubjectAr,
        ] {
            messages.col(ColumnDef::new(col).string().not_null().default(""));
        }
        for col in [
            Messages::ContentKa,
            Messages::ContentEn,
            Messages::ContentRu,
            Messages::ContentDe,
            Messages::ContentTr,
            Messages::ContentAr,
        ] {
            messages.col(ColumnDef::new(col).text().not_null().default(""));
        }
        messages.col(
            ColumnDef::new(Messages::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        );

        manager.create_table(messages.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messages_booking")
                    .table(Messages::Table)
                    .col(Messages::BookingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MessageRecipients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessageRecipients::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MessageRecipients::MessageId).uuid().not_null())
                    .col(ColumnDef::new(MessageRecipients::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(MessageRecipients::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(MessageRecipients::ReadAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(MessageRecipients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_recipients_message")
                            .from(MessageRecipients::Table, MessageRecipients::MessageId)
                            .to(Messages::Table, Messages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_message_recipients_user")
                    .table(MessageRecipients::Table)
                    .col(MessageRecipients::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MessageRecipients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Messages {
    Table,
    Id,
    SenderId,
    MessageType,
    BookingId,
    SubjectKa,
    SubjectEn,
    SubjectRu,
    SubjectDe,
    SubjectTr,
    SubjectAr,
    ContentKa,
    ContentEn,
    ContentRu,
    ContentDe,
    ContentTr,
    ContentAr,
    CreatedAt,
}

#[derive(Iden)]
pub enum MessageRecipients {
    Table,
    Id,
    MessageId,
    UserId,
    IsRead,
    ReadAt,
    CreatedAt,
}

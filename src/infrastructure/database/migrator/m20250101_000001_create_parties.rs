//! Create profiles, companies and pilots tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profiles::FullName).string())
                    .col(ColumnDef::new(Profiles::Email).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Companies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Companies::UserId).uuid().not_null())
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Phone).string())
                    .col(ColumnDef::new(Companies::Email).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pilots::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pilots::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Pilots::UserId).uuid().not_null())
                    .col(ColumnDef::new(Pilots::CompanyId).uuid())
                    .col(ColumnDef::new(Pilots::FirstName).string().not_null())
                    .col(ColumnDef::new(Pilots::LastName).string().not_null())
                    .col(ColumnDef::new(Pilots::Phone).string())
                    .col(ColumnDef::new(Pilots::Email).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pilots_company")
                    .table(Pilots::Table)
                    .col(Pilots::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pilots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Profiles {
    Table,
    Id,
    FullName,
    Email,
}

#[derive(Iden)]
pub enum Companies {
    Table,
    Id,
    UserId,
    Name,
    Phone,
    Email,
}

#[derive(Iden)]
pub enum Pilots {
    Table,
    Id,
    UserId,
    CompanyId,
    FirstName,
    LastName,
    Phone,
    Email,
}

//! Migration: Add search_text to bookings
//!
//! SQL `LOWER()` only folds ASCII on SQLite, so the searchable text is
//! lower-cased in Rust and stored. Existing rows are backfilled here.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::search_key;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Bookings::Table)
                    .add_column(
                        ColumnDef::new(Bookings::SearchText)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        let select = Query::select()
            .columns([
                Bookings::Id,
                Bookings::CustomerName,
                Bookings::CustomerPhone,
                Bookings::LocationName,
            ])
            .from(Bookings::Table)
            .to_owned();

        for row in db.query_all(backend.build(&select)).await? {
            let id: Uuid = row.try_get("", "id")?;
            let name: String = row.try_get("", "customer_name")?;
            let phone: String = row.try_get("", "customer_phone")?;
            let location: String = row.try_get("", "location_name")?;

            let update = Query::update()
                .table(Bookings::Table)
                .value(Bookings::SearchText, search_key([name.as_str(), phone.as_str(), location.as_str()]))
                .and_where(Expr::col(Bookings::Id).eq(id))
                .to_owned();
            db.execute(backend.build(&update)).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Bookings::Table)
                    .drop_column(Bookings::SearchText)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    CustomerName,
    CustomerPhone,
    LocationName,
    SearchText,
}

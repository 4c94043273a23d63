//! Create bookings table
//!
//! Pilot and company ids are plain references; the party tables may
//! live in another schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::UserId).uuid())
                    .col(ColumnDef::new(Bookings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerPhone).string().not_null())
                    .col(ColumnDef::new(Bookings::ContactMethod).string())
                    .col(ColumnDef::new(Bookings::CountryId).uuid())
                    .col(ColumnDef::new(Bookings::CountryName).string())
                    .col(ColumnDef::new(Bookings::LocationId).uuid())
                    .col(ColumnDef::new(Bookings::LocationName).string().not_null())
                    .col(ColumnDef::new(Bookings::FlightTypeId).uuid())
                    .col(ColumnDef::new(Bookings::FlightTypeName).string())
                    .col(ColumnDef::new(Bookings::SelectedDate).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::NumberOfPeople)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Bookings::BasePrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalPrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Bookings::Currency)
                            .string()
                            .not_null()
                            .default("GEL"),
                    )
                    .col(ColumnDef::new(Bookings::PromoCode).string())
                    .col(
                        ColumnDef::new(Bookings::PromoDiscount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::PaymentStatus)
                            .string()
                            .not_null()
                            .default("pending_deposit"),
                    )
                    .col(
                        ColumnDef::new(Bookings::BookingSource)
                            .string()
                            .not_null()
                            .default("platform_general"),
                    )
                    .col(ColumnDef::new(Bookings::PilotId).uuid())
                    .col(ColumnDef::new(Bookings::CompanyId).uuid())
                    .col(ColumnDef::new(Bookings::AssignedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::OriginalDate).date())
                    .col(
                        ColumnDef::new(Bookings::RescheduleCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Bookings::LastRescheduledAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::RescheduleReason).text())
                    .col(ColumnDef::new(Bookings::RefundAmount).double())
                    .col(ColumnDef::new(Bookings::RefundStatus).string())
                    .col(ColumnDef::new(Bookings::RefundedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::RefundedBy).uuid())
                    .col(ColumnDef::new(Bookings::CancellationReason).text())
                    .col(ColumnDef::new(Bookings::OnHoldReason).text())
                    .col(ColumnDef::new(Bookings::CancelledAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::NoShowAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Bookings::SeenByPilot)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Bookings::PilotSeenAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Bookings::SeenByCompany)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Bookings::CompanySeenAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Bookings::SeenByAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Bookings::AdminSeenAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Bookings::Priority)
                            .string()
                            .not_null()
                            .default("normal"),
                    )
                    .col(ColumnDef::new(Bookings::Tags).json().not_null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("idx_bookings_status", Bookings::Status),
            ("idx_bookings_pilot", Bookings::PilotId),
            ("idx_bookings_company", Bookings::CompanyId),
            ("idx_bookings_selected_date", Bookings::SelectedDate),
            ("idx_bookings_created_at", Bookings::CreatedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Bookings::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    UserId,
    CustomerName,
    CustomerPhone,
    ContactMethod,
    CountryId,
    CountryName,
    LocationId,
    LocationName,
    FlightTypeId,
    FlightTypeName,
    SelectedDate,
    NumberOfPeople,
    BasePrice,
    TotalPrice,
    Currency,
    PromoCode,
    PromoDiscount,
    Status,
    PaymentStatus,
    BookingSource,
    PilotId,
    CompanyId,
    AssignedAt,
    OriginalDate,
    RescheduleCount,
    LastRescheduledAt,
    RescheduleReason,
    RefundAmount,
    RefundStatus,
    RefundedAt,
    RefundedBy,
    CancellationReason,
    OnHoldReason,
    CancelledAt,
    NoShowAt,
    SeenByPilot,
    PilotSeenAt,
    SeenByCompany,
    CompanySeenAt,
    SeenByAdmin,
    AdminSeenAt,
    Priority,
    Tags,
    CreatedAt,
    UpdatedAt,
}

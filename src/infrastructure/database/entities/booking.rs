//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(nullable)]
    pub user_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_phone: String,
    #[sea_orm(nullable)]
    pub contact_method: Option<String>,

    #[sea_orm(nullable)]
    pub country_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub country_name: Option<String>,
    #[sea_orm(nullable)]
    pub location_id: Option<Uuid>,
    pub location_name: String,
    #[sea_orm(nullable)]
    pub flight_type_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub flight_type_name: Option<String>,

    pub selected_date: Date,
    pub number_of_people: i32,

    pub base_price: f64,
    pub total_price: f64,
    pub currency: String,
    #[sea_orm(nullable)]
    pub promo_code: Option<String>,
    pub promo_discount: f64,

    /// pending, confirmed, completed, cancelled, on_hold, no_show, rescheduled
    pub status: String,
    /// pending_deposit, deposit_paid, fully_paid, refunded
    pub payment_status: String,
    /// platform_general, company_direct, pilot_direct
    pub booking_source: String,

    #[sea_orm(nullable)]
    pub pilot_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub company_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub assigned_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub original_date: Option<Date>,
    pub reschedule_count: i32,
    #[sea_orm(nullable)]
    pub last_rescheduled_at: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub reschedule_reason: Option<String>,

    #[sea_orm(nullable)]
    pub refund_amount: Option<f64>,
    #[sea_orm(nullable)]
    pub refund_status: Option<String>,
    #[sea_orm(nullable)]
    pub refunded_at: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub refunded_by: Option<Uuid>,

    #[sea_orm(nullable)]
    pub cancellation_reason: Option<String>,
    #[sea_orm(nullable)]
    pub on_hold_reason: Option<String>,
    #[sea_orm(nullable)]
    pub cancelled_at: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub no_show_at: Option<DateTimeUtc>,

    pub seen_by_pilot: bool,
    #[sea_orm(nullable)]
    pub pilot_seen_at: Option<DateTimeUtc>,
    pub seen_by_company: bool,
    #[sea_orm(nullable)]
    pub company_seen_at: Option<DateTimeUtc>,
    pub seen_by_admin: bool,
    #[sea_orm(nullable)]
    pub admin_seen_at: Option<DateTimeUtc>,

    /// low, normal, high, urgent
    pub priority: String,
    /// JSON array of strings
    pub tags: Json,
    /// Lower-cased name, phone and location, written on every save
    pub search_text: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pilot::Entity",
        from = "Column::PilotId",
        to = "super::pilot::Column::Id"
    )]
    Pilot,
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "super::booking_note::Entity")]
    Notes,
    #[sea_orm(has_many = "super::booking_history::Entity")]
    History,
}

impl Related<super::pilot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pilot.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::booking_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl Related<super::booking_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Message entity with one subject/content column pair per locale

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(nullable)]
    pub sender_id: Option<Uuid>,
    pub message_type: String,
    #[sea_orm(nullable)]
    pub booking_id: Option<Uuid>,

    pub subject_ka: String,
    pub subject_en: String,
    pub subject_ru: String,
    pub subject_de: String,
    pub subject_tr: String,
    pub subject_ar: String,

    pub content_ka: String,
    pub content_en: String,
    pub content_ru: String,
    pub content_de: String,
    pub content_tr: String,
    pub content_ar: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::message_recipient::Entity")]
    Recipients,
}

impl Related<super::message_recipient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

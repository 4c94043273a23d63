//! SeaORM implementations for pilots, companies and profiles

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::{
    Company, CompanyRepository, DomainResult, Pilot, PilotRepository, Profile, ProfileRepository,
};
use crate::infrastructure::database::entities::{company, pilot, profile};

use super::db_err;

// ── Pilots ──────────────────────────────────────────────────────

pub struct SeaOrmPilotRepository {
    db: DatabaseConnection,
}

impl SeaOrmPilotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn pilot_to_domain(m: pilot::Model) -> Pilot {
    Pilot {
        id: m.id,
        user_id: m.user_id,
        company_id: m.company_id,
        first_name: m.first_name,
        last_name: m.last_name,
        phone: m.phone,
        email: m.email,
    }
}

#[async_trait]
impl PilotRepository for SeaOrmPilotRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Pilot>> {
        let model = pilot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(pilot_to_domain))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Pilot>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = pilot::Entity::find()
            .filter(pilot::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(pilot_to_domain).collect())
    }

    async fn save(&self, p: Pilot) -> DomainResult<()> {
        let model = pilot::ActiveModel {
            id: Set(p.id),
            user_id: Set(p.user_id),
            company_id: Set(p.company_id),
            first_name: Set(p.first_name),
            last_name: Set(p.last_name),
            phone: Set(p.phone),
            email: Set(p.email),
        };
        pilot::Entity::insert(model)
            .on_conflict(
                OnConflict::column(pilot::Column::Id)
                    .update_columns([
                        pilot::Column::UserId,
                        pilot::Column::CompanyId,
                        pilot::Column::FirstName,
                        pilot::Column::LastName,
                        pilot::Column::Phone,
                        pilot::Column::Email,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ── Companies ───────────────────────────────────────────────────

pub struct SeaOrmCompanyRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn company_to_domain(m: company::Model) -> Company {
    Company {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        phone: m.phone,
        email: m.email,
    }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Company>> {
        let model = company::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(company_to_domain))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Company>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = company::Entity::find()
            .filter(company::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(company_to_domain).collect())
    }

    async fn save(&self, c: Company) -> DomainResult<()> {
        let model = company::ActiveModel {
            id: Set(c.id),
            user_id: Set(c.user_id),
            name: Set(c.name),
            phone: Set(c.phone),
            email: Set(c.email),
        };
        company::Entity::insert(model)
            .on_conflict(
                OnConflict::column(company::Column::Id)
                    .update_columns([
                        company::Column::UserId,
                        company::Column::Name,
                        company::Column::Phone,
                        company::Column::Email,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ── Profiles ────────────────────────────────────────────────────

pub struct SeaOrmProfileRepository {
    db: DatabaseConnection,
}

impl SeaOrmProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for SeaOrmProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Profile>> {
        let model = profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(|m| Profile {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
        }))
    }

    async fn save(&self, p: Profile) -> DomainResult<()> {
        let model = profile::ActiveModel {
            id: Set(p.id),
            full_name: Set(p.full_name),
            email: Set(p.email),
        };
        profile::Entity::insert(model)
            .on_conflict(
                OnConflict::column(profile::Column::Id)
                    .update_columns([profile::Column::FullName, profile::Column::Email])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

//! Pilots, companies and user profiles referenced by bookings
//!
//! These are owned by their own profile-management flows; the booking
//! core only reads them to join display fields and to resolve the user
//! accounts that receive notifications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    pub id: Uuid,
    /// Login account of the pilot
    pub user_id: Uuid,
    /// Employing company, if any
    pub company_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Pilot {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    /// Login account of the company owner
    pub user_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[async_trait]
pub trait PilotRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Pilot>>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Pilot>>;
    async fn save(&self, pilot: Pilot) -> DomainResult<()>;
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Company>>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Company>>;
    async fn save(&self, company: Company) -> DomainResult<()>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Profile>>;
    async fn save(&self, profile: Profile) -> DomainResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pilot_full_name_trims_missing_parts() {
        let pilot = Pilot {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company_id: None,
            first_name: "Levan".into(),
            last_name: String::new(),
            phone: None,
            email: None,
        };
        assert_eq!(pilot.full_name(), "Levan");
    }
}

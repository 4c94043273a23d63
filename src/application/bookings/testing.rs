//! Shared fixtures for service tests

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use super::service::BookingAdmin;
use super::state::AdminSession;
use crate::application::events::{create_event_bus, SharedEventBus};
use crate::domain::{Booking, Company, Locale, Pilot, RepositoryProvider};
use crate::infrastructure::memory::InMemoryRepositoryProvider;

pub(crate) struct Fixture {
    pub admin: BookingAdmin,
    pub store: Arc<InMemoryRepositoryProvider>,
    pub events: SharedEventBus,
    pub admin_id: Uuid,
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

impl Fixture {
    pub fn new() -> Self {
        let events = create_event_bus();
        let store = Arc::new(InMemoryRepositoryProvider::new(events.clone()));
        let admin_id = Uuid::new_v4();
        let session = AdminSession::new(admin_id, "Admin").with_locale(Locale::En);
        let admin = BookingAdmin::new(store.clone(), events.clone(), session);
        Self {
            admin,
            store,
            events,
            admin_id,
        }
    }

    /// Insert a booking; `created_at` is spaced so list order is stable.
    pub async fn booking(&self, name: &str, customize: impl FnOnce(&mut Booking)) -> Booking {
        let mut booking = Booking::new(name, "+995 555 000", "Gudauri", date(2025, 7, 10), 300.0);
        booking.user_id = Some(Uuid::new_v4());
        let count = self.store.bookings().summary_rows().await.unwrap().len() as i64;
        booking.created_at = Utc::now() - Duration::hours(100) + Duration::minutes(count);
        customize(&mut booking);
        self.store.bookings().insert(booking.clone()).await.unwrap();
        booking
    }

    pub async fn company(&self, name: &str) -> Company {
        let company = Company {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            phone: None,
            email: None,
        };
        self.store.companies().save(company.clone()).await.unwrap();
        company
    }

    pub async fn pilot(&self, company_id: Option<Uuid>) -> Pilot {
        let pilot = Pilot {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company_id,
            first_name: "Giorgi".to_string(),
            last_name: "Kapanadze".to_string(),
            phone: None,
            email: None,
        };
        self.store.pilots().save(pilot.clone()).await.unwrap();
        pilot
    }

    pub async fn stored(&self, id: Uuid) -> Booking {
        self.store.bookings().find_by_id(id).await.unwrap().unwrap()
    }
}

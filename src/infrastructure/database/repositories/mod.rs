//! SeaORM repository implementations

pub mod booking_repository;
pub mod history_repository;
pub mod message_repository;
pub mod note_repository;
pub mod party_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;
use crate::shared::errors::InfraError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;
    use uuid::Uuid;

    use super::*;
    use crate::application::events::{create_event_bus, ChangeKind, Event};
    use crate::application::{AdminSession, BookingAdmin};
    use crate::domain::{
        Booking, BookingFilters, BookingNote, BookingPatch, BookingStatus, Company, Locale,
        LocalizedText, Message, MessageRecipient, Pilot, RepositoryProvider, SeenRole,
    };
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    async fn memory_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    #[tokio::test]
    async fn booking_round_trip_with_filters_and_change_feed() {
        let events = create_event_bus();
        let mut sub = events.subscribe();
        let repos = SeaOrmRepositoryProvider::new(memory_db().await, events.clone());

        let mut anna = Booking::new("Anna Beridze", "+995 555 1", "Gudauri", date(10), 300.0);
        anna.tags = vec!["vip".into()];
        let bob = Booking::new("Bob", "+1 202", "Kazbegi", date(12), 150.0);
        repos.bookings().insert(anna.clone()).await.unwrap();
        repos.bookings().insert(bob.clone()).await.unwrap();

        let first = sub.recv().await.unwrap();
        match first.event {
            Event::RowChanged(change) => {
                assert_eq!(change.table, "bookings");
                assert_eq!(change.kind, ChangeKind::Insert);
                assert_eq!(change.row_id, anna.id);
            }
            other => panic!("unexpected event {other:?}"),
        }

        let loaded = repos.bookings().find_by_id(anna.id).await.unwrap().unwrap();
        assert_eq!(loaded.tags, vec!["vip".to_string()]);
        assert_eq!(loaded.selected_date, date(10));

        let filters = BookingFilters {
            search_term: "GUDA".into(),
            ..Default::default()
        };
        let found = repos.bookings().find_filtered(&filters).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, anna.id);

        let filters = BookingFilters {
            date_from: Some(date(11)),
            ..Default::default()
        };
        let found = repos.bookings().find_filtered(&filters).await.unwrap();
        assert_eq!(found.iter().map(|b| b.id).collect::<Vec<_>>(), vec![bob.id]);

        let updated = repos
            .bookings()
            .update(
                anna.id,
                BookingPatch::status_change(
                    BookingStatus::Cancelled,
                    Some("weather".into()),
                    chrono::Utc::now(),
                ),
            )
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Cancelled);
        assert_eq!(updated.cancellation_reason.as_deref(), Some("weather"));
        assert!(updated.cancelled_at.is_some());

        assert_eq!(repos.bookings().summary_rows().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleting_a_booking_cascades_to_notes() {
        let repos = SeaOrmRepositoryProvider::new(memory_db().await, create_event_bus());
        let booking = Booking::new("Anna", "1", "Gudauri", date(10), 100.0);
        repos.bookings().insert(booking.clone()).await.unwrap();

        let note = BookingNote::new(booking.id, Uuid::new_v4(), "Admin", "call back");
        repos.notes().insert(note.clone()).await.unwrap();
        repos.notes().set_pinned(note.id, true).await.unwrap();
        let notes = repos.notes().list_for_booking(booking.id).await.unwrap();
        assert!(notes[0].is_pinned);

        repos.bookings().delete(booking.id).await.unwrap();
        assert!(repos.bookings().find_by_id(booking.id).await.unwrap().is_none());
        assert!(repos.notes().list_for_booking(booking.id).await.unwrap().is_empty());
        assert!(repos.bookings().delete(booking.id).await.is_err());
    }

    #[tokio::test]
    async fn parties_and_messages_persist() {
        let repos = SeaOrmRepositoryProvider::new(memory_db().await, create_event_bus());

        let company = Company {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Sky Tours".into(),
            phone: None,
            email: None,
        };
        let pilot = Pilot {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company_id: Some(company.id),
            first_name: "Giorgi".into(),
            last_name: "K".into(),
            phone: None,
            email: None,
        };
        repos.companies().save(company.clone()).await.unwrap();
        repos.pilots().save(pilot.clone()).await.unwrap();
        repos.pilots().save(pilot.clone()).await.unwrap();

        let pilots = repos.pilots().find_by_ids(&[pilot.id]).await.unwrap();
        assert_eq!(pilots.len(), 1);
        assert_eq!(pilots[0].company_id, Some(company.id));
        assert!(repos.companies().find_by_ids(&[]).await.unwrap().is_empty());

        let booking_id = Uuid::new_v4();
        let text = LocalizedText::from_fn(|l: Locale| l.as_str().to_string());
        let message = Message::new(None, "booking_rescheduled", Some(booking_id), text.clone(), text);
        repos.messages().insert_message(message.clone()).await.unwrap();
        repos
            .messages()
            .insert_recipients(vec![
                MessageRecipient::unread(message.id, pilot.user_id),
                MessageRecipient::unread(message.id, company.user_id),
            ])
            .await
            .unwrap();

        let stored = repos.messages().list_for_booking(booking_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].subject.de, "de");
        let recipients = repos.messages().recipients_of(message.id).await.unwrap();
        assert_eq!(recipients.len(), 2);
        assert!(recipients.iter().all(|r| !r.is_read));
    }

    async fn seed_both(
        bookings: &[Booking],
    ) -> (SeaOrmRepositoryProvider, InMemoryRepositoryProvider) {
        let sql = SeaOrmRepositoryProvider::new(memory_db().await, create_event_bus());
        let mem = InMemoryRepositoryProvider::new(create_event_bus());
        for b in bookings {
            sql.bookings().insert(b.clone()).await.unwrap();
            mem.bookings().insert(b.clone()).await.unwrap();
        }
        (sql, mem)
    }

    async fn ids(repos: &dyn RepositoryProvider, filters: &BookingFilters) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = repos
            .bookings()
            .find_filtered(filters)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn search_agrees_across_stores() {
        let mut confirmed = Booking::new("Levan", "+995 599", "Gudauri", date(14), 200.0);
        confirmed.status = BookingStatus::Confirmed;
        let bookings = vec![
            Booking::new("Анна Иванова", "+7 900", "Kazbegi", date(10), 300.0),
            Booking::new("Özge", "+90 532", "Ölüdeniz", date(11), 250.0),
            Booking::new("Nino", "+995 555", "Mestia 100%", date(12), 150.0),
            Booking::new("Bob", "+1 202", "Tbilisi", date(13), 120.0),
            confirmed,
        ];
        let (sql, mem) = seed_both(&bookings).await;

        let cases: [(&str, usize); 12] = [
            ("анна", 1),
            ("АННА", 1),
            ("Анна", 1),
            ("özge", 1),
            ("ÖZGE", 1),
            ("ölü", 1),
            ("_", 0),
            ("%", 1),
            ("100%", 1),
            ("!", 0),
            ("GUDAURI", 1),
            ("+995", 2),
        ];
        for (term, expected) in cases {
            let filters = BookingFilters {
                search_term: term.into(),
                ..Default::default()
            };
            let from_sql = ids(&sql, &filters).await;
            let from_mem = ids(&mem, &filters).await;
            assert_eq!(from_sql, from_mem, "term {term:?}");
            assert_eq!(from_sql.len(), expected, "term {term:?}");
        }

        let filters = BookingFilters {
            status: Some(BookingStatus::Confirmed),
            search_term: "+995".into(),
            ..Default::default()
        };
        assert_eq!(ids(&sql, &filters).await, ids(&mem, &filters).await);
        assert_eq!(ids(&sql, &filters).await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_single_field_updates_both_land() {
        let repos = SeaOrmRepositoryProvider::new(memory_db().await, create_event_bus());
        let booking = Booking::new("Anna", "1", "Gudauri", date(10), 100.0);
        repos.bookings().insert(booking.clone()).await.unwrap();

        let now = chrono::Utc::now();
        let (status, seen) = tokio::join!(
            repos.bookings().update(
                booking.id,
                BookingPatch::status_change(BookingStatus::Confirmed, None, now),
            ),
            repos.bookings().update(booking.id, BookingPatch::seen(SeenRole::Pilot, now)),
        );
        status.unwrap();
        seen.unwrap();

        let stored = repos.bookings().find_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert!(stored.seen_by_pilot);
        assert_eq!(stored.customer_name, "Anna");
    }

    #[tokio::test]
    async fn search_text_survives_partial_update() {
        let repos = SeaOrmRepositoryProvider::new(memory_db().await, create_event_bus());
        let booking = Booking::new("Ölmez", "1", "Gudauri", date(10), 100.0);
        repos.bookings().insert(booking.clone()).await.unwrap();
        repos
            .bookings()
            .update(booking.id, BookingPatch::status_change(BookingStatus::OnHold, None, chrono::Utc::now()))
            .await
            .unwrap();

        let filters = BookingFilters {
            search_term: "ÖLMEZ".into(),
            ..Default::default()
        };
        assert_eq!(ids(&repos, &filters).await, vec![booking.id]);
    }

    #[tokio::test]
    async fn admin_service_runs_on_the_database_provider() {
        let events = create_event_bus();
        let repos = Arc::new(SeaOrmRepositoryProvider::new(memory_db().await, events.clone()));
        let admin = BookingAdmin::new(
            repos.clone(),
            events,
            AdminSession::new(Uuid::new_v4(), "Admin").with_locale(Locale::En),
        );
        let anna = Booking::new("Анна", "+7 900", "Kazbegi", date(10), 300.0);
        repos.bookings().insert(anna.clone()).await.unwrap();
        repos
            .bookings()
            .insert(Booking::new("Bob", "+1 202", "Tbilisi", date(11), 100.0))
            .await
            .unwrap();

        admin
            .set_filters(BookingFilters {
                search_term: "АННА".into(),
                ..Default::default()
            })
            .await;
        assert!(admin.fetch_bookings().await);
        let rows = admin.bookings().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), anna.id);

        assert!(admin.update_booking_status(anna.id, BookingStatus::Confirmed, None).await);
        assert!(admin.mark_booking_as_seen(anna.id, SeenRole::Admin).await);
        let stored = repos.bookings().find_by_id(anna.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert!(stored.seen_by_admin);
        assert_eq!(admin.summary().await.map(|s| s.confirmed_bookings), Some(1));
    }
}

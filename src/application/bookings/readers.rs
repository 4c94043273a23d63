//! Entity readers: translate view state into repository reads and join
//! pilots and companies onto bookings.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::service::BookingAdmin;
use super::state::BookingDetails;
use crate::application::messages::ErrorKey;
use crate::domain::{Booking, BookingFilters, BookingSummary, DomainResult, SeenRole};

fn unique(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

impl BookingAdmin {
    /// Attach pilot and company records to each booking.
    pub(super) async fn join(&self, bookings: Vec<Booking>) -> DomainResult<Vec<BookingDetails>> {
        let pilot_ids = unique(bookings.iter().filter_map(|b| b.pilot_id));
        let company_ids = unique(bookings.iter().filter_map(|b| b.company_id));

        let pilots: HashMap<_, _> = if pilot_ids.is_empty() {
            HashMap::new()
        } else {
            self.repos
                .pilots()
                .find_by_ids(&pilot_ids)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };
        let companies: HashMap<_, _> = if company_ids.is_empty() {
            HashMap::new()
        } else {
            self.repos
                .companies()
                .find_by_ids(&company_ids)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        Ok(bookings
            .into_iter()
            .map(|booking| BookingDetails {
                pilot: booking.pilot_id.and_then(|id| pilots.get(&id).cloned()),
                company: booking.company_id.and_then(|id| companies.get(&id).cloned()),
                booking,
            })
            .collect())
    }

    async fn load_filtered(&self, filters: &BookingFilters) -> DomainResult<Vec<BookingDetails>> {
        let bookings = self.repos.bookings().find_filtered(filters).await?;
        self.join(bookings).await
    }

    /// Reload the list with the current filters.
    ///
    /// On failure the previous list is kept and `error` is set.
    pub async fn fetch_bookings(&self) -> bool {
        let filters = {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.filters.clone()
        };

        let result = self.load_filtered(&filters).await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(bookings) => {
                debug!(count = bookings.len(), "Bookings loaded");
                state.bookings = bookings;
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch bookings");
                state.error = Some(ErrorKey::LoadFailed.message(self.session.locale).to_string());
                false
            }
        }
    }

    async fn load_one(&self, id: Uuid) -> DomainResult<Option<BookingDetails>> {
        match self.repos.bookings().find_by_id(id).await? {
            Some(b) => Ok(self.join(vec![b]).await?.pop()),
            None => Ok(None),
        }
    }

    /// One booking in the joined shape; `None` when missing or on error.
    pub async fn fetch_booking_by_id(&self, id: Uuid) -> Option<BookingDetails> {
        match self.load_one(id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(booking_id = %id, error = %e, "Failed to fetch booking");
                None
            }
        }
    }

    pub async fn fetch_summary(&self) -> bool {
        match self.repos.bookings().summary_rows().await {
            Ok(rows) => {
                let summary = BookingSummary::compute(&rows, Utc::now().date_naive());
                self.state.write().await.summary = Some(summary);
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch booking summary");
                self.fail(ErrorKey::LoadFailed).await;
                false
            }
        }
    }

    pub async fn fetch_booking_notes(&self, booking_id: Uuid) -> bool {
        match self.repos.notes().list_for_booking(booking_id).await {
            Ok(notes) => {
                self.state.write().await.booking_notes = notes;
                true
            }
            Err(e) => {
                error!(%booking_id, error = %e, "Failed to fetch booking notes");
                self.fail(ErrorKey::LoadFailed).await;
                false
            }
        }
    }

    pub async fn fetch_booking_history(&self, booking_id: Uuid) -> bool {
        match self.repos.history().list_for_booking(booking_id).await {
            Ok(history) => {
                self.state.write().await.booking_history = history;
                true
            }
            Err(e) => {
                error!(%booking_id, error = %e, "Failed to fetch booking history");
                self.fail(ErrorKey::LoadFailed).await;
                false
            }
        }
    }

    // ── Per-role list views ────────────────────────────────────

    /// A pilot's own bookings, independent of the admin filters
    pub async fn fetch_bookings_for_pilot(&self, pilot_id: Uuid) -> DomainResult<Vec<BookingDetails>> {
        let bookings = self.repos.bookings().find_for_pilot(pilot_id).await?;
        self.join(bookings).await
    }

    /// A company's own bookings, independent of the admin filters
    pub async fn fetch_bookings_for_company(
        &self,
        company_id: Uuid,
    ) -> DomainResult<Vec<BookingDetails>> {
        let bookings = self.repos.bookings().find_for_company(company_id).await?;
        self.join(bookings).await
    }

    /// Badge count of bookings `role` has not acknowledged yet.
    ///
    /// `owner_id` is the pilot or company id; ignored for admins.
    pub async fn count_unseen(&self, role: SeenRole, owner_id: Option<Uuid>) -> DomainResult<usize> {
        let bookings = match (role, owner_id) {
            (SeenRole::Pilot, Some(id)) => self.repos.bookings().find_for_pilot(id).await?,
            (SeenRole::Company, Some(id)) => self.repos.bookings().find_for_company(id).await?,
            (SeenRole::Admin, _) => {
                self.repos
                    .bookings()
                    .find_filtered(&BookingFilters::default())
                    .await?
            }
            (_, None) => return Ok(0),
        };
        Ok(bookings.iter().filter(|b| !b.is_seen_by(role)).count())
    }
}

//! Notification fan-out: one message, one delivery row per recipient

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::events::{Event, NotificationSentEvent, SharedEventBus};
use crate::domain::{Booking, DomainResult, Message, MessageRecipient, RepositoryProvider};

/// User accounts connected to a booking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipientContext {
    pub customer: Option<Uuid>,
    pub pilot: Option<Uuid>,
    pub booking_company: Option<Uuid>,
    /// Company employing the assigned pilot; may differ from the
    /// booking's own company
    pub pilot_company: Option<Uuid>,
}

impl RecipientContext {
    pub async fn load(repos: &dyn RepositoryProvider, booking: &Booking) -> DomainResult<Self> {
        let mut ctx = Self {
            customer: booking.user_id,
            ..Default::default()
        };

        if let Some(pilot_id) = booking.pilot_id {
            if let Some(pilot) = repos.pilots().find_by_id(pilot_id).await? {
                ctx.pilot = Some(pilot.user_id);
                if let Some(company_id) = pilot.company_id {
                    ctx.pilot_company = repos
                        .companies()
                        .find_by_id(company_id)
                        .await?
                        .map(|c| c.user_id);
                }
            }
        }

        if let Some(company_id) = booking.company_id {
            ctx.booking_company = repos
                .companies()
                .find_by_id(company_id)
                .await?
                .map(|c| c.user_id);
        }

        Ok(ctx)
    }

    /// Deduplicated recipient user ids, in role order.
    pub fn recipients(&self, notify_customer: bool, notify_pilot: bool) -> Vec<Uuid> {
        let candidates = [
            self.customer.filter(|_| notify_customer),
            self.pilot.filter(|_| notify_pilot),
            self.booking_company,
            self.pilot_company,
        ];
        let mut out: Vec<Uuid> = Vec::with_capacity(candidates.len());
        for id in candidates.into_iter().flatten() {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }
}

/// Writes a message and its delivery rows.
///
/// The two inserts are independent writes; a failure on the second
/// leaves an orphan message without recipients.
#[derive(Clone)]
pub struct NotificationDispatcher {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
}

impl NotificationDispatcher {
    pub fn new(repos: Arc<dyn RepositoryProvider>, events: SharedEventBus) -> Self {
        Self { repos, events }
    }

    /// Returns the number of delivery rows written. An empty recipient
    /// list writes nothing.
    pub async fn dispatch(&self, message: Message, recipients: &[Uuid]) -> DomainResult<usize> {
        if recipients.is_empty() {
            debug!(message_type = %message.message_type, "No recipients, skipping message");
            return Ok(0);
        }

        let message_id = message.id;
        let message_type = message.message_type.clone();
        let booking_id = message.booking_id;

        self.repos.messages().insert_message(message).await?;

        let rows: Vec<MessageRecipient> = recipients
            .iter()
            .map(|user_id| MessageRecipient::unread(message_id, *user_id))
            .collect();
        self.repos.messages().insert_recipients(rows).await?;

        info!(
            %message_id,
            %message_type,
            ?booking_id,
            recipients = recipients.len(),
            "Notification dispatched"
        );
        self.events.publish(Event::NotificationSent(NotificationSentEvent {
            message_id,
            message_type,
            booking_id,
            recipients: recipients.len(),
            timestamp: Utc::now(),
        }));

        Ok(recipients.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Uuid, Uuid, Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn all_roles_distinct_gives_four() {
        let (customer, pilot, d, c) = ids();
        let ctx = RecipientContext {
            customer: Some(customer),
            pilot: Some(pilot),
            booking_company: Some(d),
            pilot_company: Some(c),
        };
        assert_eq!(ctx.recipients(true, true), vec![customer, pilot, d, c]);
    }

    #[test]
    fn same_company_in_two_roles_is_listed_once() {
        let (customer, pilot, company, _) = ids();
        let ctx = RecipientContext {
            customer: Some(customer),
            pilot: Some(pilot),
            booking_company: Some(company),
            pilot_company: Some(company),
        };
        assert_eq!(ctx.recipients(true, true), vec![customer, pilot, company]);
    }

    #[test]
    fn flags_gate_customer_and_pilot_only() {
        let (customer, pilot, company, pilot_company) = ids();
        let ctx = RecipientContext {
            customer: Some(customer),
            pilot: Some(pilot),
            booking_company: Some(company),
            pilot_company: Some(pilot_company),
        };
        assert_eq!(ctx.recipients(false, false), vec![company, pilot_company]);
        assert_eq!(ctx.recipients(true, false), vec![customer, company, pilot_company]);
    }

    #[test]
    fn empty_context_has_no_recipients() {
        assert!(RecipientContext::default().recipients(true, true).is_empty());
    }
}

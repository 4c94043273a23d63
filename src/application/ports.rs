//! Outbound ports: interfaces to external systems the booking core
//! drives but does not own.

use async_trait::async_trait;

use crate::domain::{Booking, DomainResult};

/// Moves money back to the customer through a payment provider.
///
/// Invoked before the refund is recorded on the booking, so a failed
/// gateway call leaves the booking untouched.
#[async_trait]
pub trait RefundGateway: Send + Sync {
    async fn refund(&self, booking: &Booking, amount: f64) -> DomainResult<()>;
}

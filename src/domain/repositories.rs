//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-table repositories
//! - `DomainResult`: standard result type for domain operations

use super::booking::BookingRepository;
use super::history::HistoryRepository;
use super::message::MessageRepository;
use super::note::NoteRepository;
use super::party::{CompanyRepository, PilotRepository, ProfileRepository};
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let booking = repos.bookings().find_by_id(id).await?;
///     let notes = repos.notes().list_for_booking(id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;
    fn notes(&self) -> &dyn NoteRepository;
    fn history(&self) -> &dyn HistoryRepository;
    fn pilots(&self) -> &dyn PilotRepository;
    fn companies(&self) -> &dyn CompanyRepository;
    fn profiles(&self) -> &dyn ProfileRepository;
    fn messages(&self) -> &dyn MessageRepository;
}

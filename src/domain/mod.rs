pub mod booking;
pub mod events;
pub mod history;
pub mod locale;
pub mod message;
pub mod note;
pub mod party;
pub mod repositories;

// Re-export commonly used types
pub use booking::{
    Booking, BookingFilters, BookingPatch, BookingPriority, BookingRepository, BookingSource,
    BookingStatus, BookingSummary, BookingSummaryRow, PaymentStatus, RefundStatus, RefundType,
    SeenRole, search_key, BOOKINGS_TABLE, LIKE_ESCAPE,
};
pub use history::{BookingHistory, HistoryRepository};
pub use locale::{Locale, LocalizedText};
pub use message::{Message, MessageRecipient, MessageRepository};
pub use note::{BookingNote, NoteRepository};
pub use party::{
    Company, CompanyRepository, Pilot, PilotRepository, Profile, ProfileRepository,
};
pub use repositories::{DomainResult, RepositoryProvider};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;

//! Database entities module

pub mod booking;
pub mod booking_history;
pub mod booking_note;
pub mod company;
pub mod message;
pub mod message_recipient;
pub mod pilot;
pub mod profile;

pub use booking::Entity as Booking;
pub use booking_history::Entity as BookingHistory;
pub use booking_note::Entity as BookingNote;
pub use company::Entity as Company;
pub use message::Entity as Message;
pub use message_recipient::Entity as MessageRecipient;
pub use pilot::Entity as Pilot;
pub use profile::Entity as Profile;

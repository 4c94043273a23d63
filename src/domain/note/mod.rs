pub mod model;
pub mod repository;

pub use model::{sort_notes, BookingNote};
pub use repository::NoteRepository;

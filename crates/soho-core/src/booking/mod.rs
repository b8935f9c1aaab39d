//! Booking lookup for the guest being answered.

mod directory;
mod model;

pub use directory::BookingDirectory;
pub use model::{BookingDetails, BookingLookup, BookingStatus, select_lookup};

use async_trait::async_trait;

use super::model::BookingLookup;
use crate::error::Result;

/// Booking system collaborator.
#[async_trait]
pub trait BookingDirectory: Send + Sync {
    /// Finds bookings whose guest name contains `name`, ignoring case.
    ///
    /// A blank `name` yields an empty lookup.
    async fn search_by_guest(&self, name: &str) -> Result<BookingLookup>;
}

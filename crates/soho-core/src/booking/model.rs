use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BookingStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Confirmed or checked in.
    pub fn is_ongoing(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub id: String,
    pub guest_name: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub room_type: String,
    pub status: BookingStatus,
    /// Display amount, e.g. `₹42,500`
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Bookings of one guest split into the current stay and history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingLookup {
    pub current: Option<BookingDetails>,
    /// Most recent check-in first.
    pub past: Vec<BookingDetails>,
}

impl BookingLookup {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.past.is_empty()
    }
}

/// Selects the bookings of `bookings` matching `query` and splits them.
///
/// `current` is the first ongoing match in directory order, else the match
/// with the latest check-in. Everything else lands in `past`.
pub fn select_lookup(bookings: &[BookingDetails], query: &str) -> BookingLookup {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return BookingLookup::default();
    }

    let matches: Vec<&BookingDetails> = bookings
        .iter()
        .filter(|b| b.guest_name.to_lowercase().contains(&q))
        .collect();

    let mut by_recency = matches.clone();
    // stable: equal check-ins keep directory order
    by_recency.sort_by(|a, b| b.check_in.cmp(&a.check_in));

    let current = matches
        .iter()
        .find(|b| b.status.is_ongoing())
        .or_else(|| by_recency.first())
        .map(|b| (*b).clone());
    let past = by_recency
        .into_iter()
        .filter(|b| current.as_ref().is_none_or(|c| c.id != b.id))
        .cloned()
        .collect();

    BookingLookup { current, past }
}

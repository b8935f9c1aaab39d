//! In-memory booking directory with sample reservations.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

use soho_core::booking::{BookingDetails, BookingDirectory, BookingLookup, BookingStatus, select_lookup};
use soho_core::error::Result;

pub struct InMemoryBookingDirectory {
    bookings: Vec<BookingDetails>,
    latency: Option<Duration>,
}

impl InMemoryBookingDirectory {
    pub fn new(bookings: Vec<BookingDetails>) -> Self {
        Self {
            bookings,
            latency: None,
        }
    }

    /// Directory seeded with the sample reservations.
    pub fn with_samples() -> Self {
        Self::new(sample_bookings())
    }

    /// Simulates booking-system latency on every search.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl BookingDirectory for InMemoryBookingDirectory {
    async fn search_by_guest(&self, name: &str) -> Result<BookingLookup> {
        let lookup = select_lookup(&self.bookings, name);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(lookup)
    }
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn booking(
    id: &str,
    guest: &str,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    room_type: &str,
    status: BookingStatus,
    amount: &str,
    notes: Option<&str>,
) -> BookingDetails {
    BookingDetails {
        id: id.to_string(),
        guest_name: guest.to_string(),
        check_in,
        check_out,
        room_type: room_type.to_string(),
        status,
        amount: amount.to_string(),
        notes: notes.map(str::to_string),
    }
}

pub fn sample_bookings() -> Vec<BookingDetails> {
    vec![
        booking(
            "BK-98231",
            "Liza",
            at(2025, 10, 28, 14),
            at(2025, 11, 2, 11),
            "Executive",
            BookingStatus::CheckedIn,
            "₹42,500",
            Some("Late check-in due to flight delay"),
        ),
        booking("BK-65001", "Liza", at(2025, 7, 12, 14), at(2025, 7, 15, 11), "Standard", BookingStatus::CheckedOut, "₹18,900", None),
        booking("BK-64011", "Liza", at(2025, 3, 9, 14), at(2025, 3, 12, 11), "Deluxe", BookingStatus::CheckedOut, "₹27,000", None),
        booking("BK-77410", "Priya", at(2025, 9, 10, 14), at(2025, 9, 13, 11), "Deluxe", BookingStatus::CheckedOut, "₹24,000", None),
        booking("BK-66109", "Arjun", at(2025, 11, 5, 14), at(2025, 11, 8, 11), "Standard", BookingStatus::Confirmed, "₹16,500", None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liza_lookup() {
        let directory = InMemoryBookingDirectory::with_samples();
        let lookup = directory.search_by_guest("liza").await.unwrap();

        assert_eq!(lookup.current.unwrap().id, "BK-98231");
        let past: Vec<_> = lookup.past.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(past, vec!["BK-65001", "BK-64011"]);
    }

    #[tokio::test]
    async fn test_empty_query_finds_nothing() {
        let directory = InMemoryBookingDirectory::with_samples();
        assert!(directory.search_by_guest("  ").await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let directory =
            InMemoryBookingDirectory::with_samples().with_latency(Duration::from_millis(200));
        let started = tokio::time::Instant::now();
        let lookup = directory.search_by_guest("Arjun").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(200));
        assert_eq!(lookup.current.unwrap().id, "BK-66109");
    }
}

use std::path::Path;

use anyhow::Result;

use soho_core::booking::BookingDetails;

use super::context::open_app;

fn print_booking(b: &BookingDetails) {
    println!(
        "  {} {} {} -> {} {} {}",
        b.id,
        b.room_type,
        b.check_in.format("%Y-%m-%d"),
        b.check_out.format("%Y-%m-%d"),
        b.status,
        b.amount
    );
    if let Some(notes) = &b.notes {
        println!("    {}", notes);
    }
}

pub async fn run(config: Option<&Path>, thread_id: &str) -> Result<()> {
    let app = open_app(config).await?;
    let lookup = app.inbox.find_bookings(thread_id).await;

    if lookup.is_empty() {
        println!("No bookings found for thread {}", thread_id);
        return Ok(());
    }
    if let Some(current) = &lookup.current {
        println!("Current:");
        print_booking(current);
    }
    if !lookup.past.is_empty() {
        println!("Past:");
        lookup.past.iter().for_each(print_booking);
    }
    Ok(())
}

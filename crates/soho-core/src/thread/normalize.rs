//! Canonicalization applied once when a thread enters the store.
//!
//! After [`normalize_thread`] every thread carries a guest (when it has any
//! inbound message) and a duplicate-free tag list, so downstream code never
//! defaults optional fields itself.

use super::guest::Guest;
use super::model::Thread;

/// Name used when the first inbound sender has no display name.
pub const FALLBACK_GUEST_NAME: &str = "Guest";

/// Lowercases `name` and replaces every run of characters outside
/// `[a-z0-9]` with a single `-`, including runs at either end.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug
}

/// Infers a guest profile from the first inbound message of `thread`.
pub fn infer_guest(thread: &Thread) -> Option<Guest> {
    let first = thread.messages.iter().find(|m| m.inbound)?;
    let name = match first.sender_name.trim() {
        "" => FALLBACK_GUEST_NAME,
        trimmed => trimmed,
    };
    let slug = slugify(name);

    let mut guest = Guest::new(name);
    guest.avatar_url = Some(format!("/avatars/{slug}.svg"));
    guest.username = (!slug.is_empty()).then_some(slug);
    Some(guest)
}

/// Produces the canonical form of `thread`.
pub fn normalize_thread(mut thread: Thread) -> Thread {
    if thread.guest.is_none() {
        thread.guest = infer_guest(&thread);
    }
    thread.ai = thread.ai.dedup_tags();
    thread
}

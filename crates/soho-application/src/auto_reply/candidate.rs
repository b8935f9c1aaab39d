//! Reply candidate selection shared by suggestions and auto-reply.

use chrono::{DateTime, Utc};

use soho_core::property::{PromotionReply, find_match};
use soho_core::thread::{Message, Thread};

/// The untransformed reply chosen for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyCandidate {
    pub text: String,
    /// Recommendation sent after a reply about an expired promotion.
    pub follow_up: Option<String>,
    /// Present when the inbound text quoted a promotion code.
    pub promotion: Option<PromotionReply>,
}

/// Chooses the reply to `inbound`.
///
/// A quoted promotion code wins; otherwise the thread's first suggested
/// reply, otherwise `fallback`.
pub fn compute_candidate(
    thread: &Thread,
    inbound: &Message,
    now: DateTime<Utc>,
    fallback: &str,
) -> ReplyCandidate {
    let promotions = &thread.property.promotions;
    if let Some(matched) = find_match(&inbound.text, promotions) {
        let reply = PromotionReply::compose(matched, promotions, now);
        return ReplyCandidate {
            text: reply.reply.clone(),
            follow_up: reply.follow_up.clone(),
            promotion: Some(reply),
        };
    }

    let text = thread
        .ai
        .first_suggestion()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string();
    ReplyCandidate {
        text,
        follow_up: None,
        promotion: None,
    }
}

//! Promotion matching and promotion-aware reply composition.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::model::Promotion;

/// Lifecycle of a promotion relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PromotionStatus {
    /// `now < start`
    Upcoming,
    /// `start <= now <= end`
    Active,
    /// `now > end`
    Expired,
}

/// Compiled mention patterns keyed by trimmed code.
static CODE_PATTERNS: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Case-insensitive pattern matching `code` delimited by non-word characters
/// or the ends of the text, so codes ending in a symbol still match.
fn mention_pattern(code: &str) -> Option<Regex> {
    let mut patterns = CODE_PATTERNS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = patterns.get(code) {
        return Some(re.clone());
    }
    let re = Regex::new(&format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(code))).ok()?;
    patterns.insert(code.to_string(), re.clone());
    Some(re)
}

const DATE_FORMAT: &str = "%b %-d, %Y";

fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

impl Promotion {
    pub fn status_at(&self, now: DateTime<Utc>) -> PromotionStatus {
        if now < self.start {
            PromotionStatus::Upcoming
        } else if now > self.end {
            PromotionStatus::Expired
        } else {
            PromotionStatus::Active
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == PromotionStatus::Active
    }

    /// Returns true if the code occurs in `text` as a whole word, ignoring case.
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        let code = self.code.trim();
        if code.is_empty() {
            return false;
        }
        mention_pattern(code).is_some_and(|re| re.is_match(text))
    }

    /// Text used when an agent shares the promotion with a guest.
    pub fn share_text(&self) -> String {
        let mut text = format!(
            "Promotion: {} (code {}). Valid {} – {}",
            self.title,
            self.code.to_uppercase(),
            format_date(self.start),
            format_date(self.end)
        );
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            text.push_str(". ");
            text.push_str(description);
        }
        text
    }
}

/// Returns the first promotion, in property order, whose code appears in `text`.
pub fn find_match<'a>(text: &str, promotions: &'a [Promotion]) -> Option<&'a Promotion> {
    promotions.iter().find(|p| p.is_mentioned_in(text))
}

/// The promotion to recommend instead of an expired one.
///
/// First active promotion in property order; otherwise the one with the
/// soonest future start, ties going to the earlier entry.
pub fn next_available(promotions: &[Promotion], now: DateTime<Utc>) -> Option<&Promotion> {
    if let Some(active) = promotions.iter().find(|p| p.is_active_at(now)) {
        return Some(active);
    }
    promotions
        .iter()
        .filter(|p| p.status_at(now) == PromotionStatus::Upcoming)
        .fold(None, |best: Option<&Promotion>, p| match best {
            Some(b) if b.start <= p.start => Some(b),
            _ => Some(p),
        })
}

/// Reply synthesized for a message that quotes a promotion code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionReply {
    pub code: String,
    pub status: PromotionStatus,
    pub reply: String,
    /// Only produced for expired promotions with an alternative available.
    pub follow_up: Option<String>,
}

impl PromotionReply {
    /// Composes the reply for `matched`, consulting `promotions` for a
    /// follow-up recommendation when `matched` has expired.
    pub fn compose(matched: &Promotion, promotions: &[Promotion], now: DateTime<Utc>) -> Self {
        let status = matched.status_at(now);
        let code = matched.code.to_uppercase();
        let reply = match status {
            PromotionStatus::Active => format!(
                "Thanks for reaching out! {} ({}) is active until {}. \
                 You're eligible and we'll apply the discount to your booking.",
                matched.title,
                code,
                format_date(matched.end)
            ),
            PromotionStatus::Expired => format!(
                "Thanks for reaching out! Unfortunately {} ({}) expired on {}.",
                matched.title,
                code,
                format_date(matched.end)
            ),
            PromotionStatus::Upcoming => format!(
                "Thanks for reaching out! {} ({}) starts on {}. \
                 In the meantime, please check our current offers.",
                matched.title,
                code,
                format_date(matched.start)
            ),
        };

        let follow_up = match status {
            PromotionStatus::Expired => next_available(promotions, now)
                .filter(|next| next.code != matched.code)
                .map(|next| follow_up_text(next, now)),
            _ => None,
        };

        Self {
            code,
            status,
            reply,
            follow_up,
        }
    }
}

fn follow_up_text(next: &Promotion, now: DateTime<Utc>) -> String {
    let code = next.code.to_uppercase();
    if next.is_active_at(now) {
        format!(
            "Good news: you can use {} ({}) instead, valid until {}.",
            next.title,
            code,
            format_date(next.end)
        )
    } else {
        format!(
            "Good news: {} ({}) will be available from {}.",
            next.title,
            code,
            format_date(next.start)
        )
    }
}

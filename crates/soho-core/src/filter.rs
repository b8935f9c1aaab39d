//! Thread visibility under a composite filter.
//!
//! Every criterion is conjunctive. A `None` criterion means "all"; a specific
//! value never matches a thread that lacks the compared field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::sla::SlaPolicy;
use crate::thread::{CustomerType, Platform, Sentiment, Thread};

/// Status partition applied before every other criterion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum View {
    /// Every thread that is not resolved
    #[default]
    Inbox,
    /// Resolved threads only
    Archive,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SlaFilter {
    #[default]
    All,
    Delayed,
    OnTime,
}

/// Filter configuration for [`matches`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub view: View,
    pub sentiment: Option<Sentiment>,
    pub platform: Option<Platform>,
    /// Compared case-insensitively against the guest location.
    pub location: Option<String>,
    pub customer_type: Option<CustomerType>,
    /// Compared exactly against the property name.
    pub hotel: Option<String>,
    pub sla: SlaFilter,
    /// Free text; empty matches everything.
    pub query: String,
}

impl FilterCriteria {
    pub fn archive() -> Self {
        Self {
            view: View::Archive,
            ..Default::default()
        }
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_customer_type(mut self, customer_type: CustomerType) -> Self {
        self.customer_type = Some(customer_type);
        self
    }

    pub fn with_hotel(mut self, hotel: impl Into<String>) -> Self {
        self.hotel = Some(hotel.into());
        self
    }

    pub fn with_sla(mut self, sla: SlaFilter) -> Self {
        self.sla = sla;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

/// [`matches_with`] under the default SLA targets.
pub fn matches(thread: &Thread, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    matches_with(thread, criteria, now, &SlaPolicy::default())
}

pub fn matches_with(
    thread: &Thread,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
    policy: &SlaPolicy,
) -> bool {
    let in_view = match criteria.view {
        View::Inbox => !thread.is_resolved(),
        View::Archive => thread.is_resolved(),
    };
    if !in_view {
        return false;
    }

    if criteria.sentiment.is_some_and(|s| s != thread.ai.sentiment) {
        return false;
    }
    if criteria.platform.is_some_and(|p| p != thread.platform) {
        return false;
    }
    if let Some(location) = &criteria.location {
        let guest_location = thread.guest.as_ref().and_then(|g| g.location.as_deref());
        match guest_location {
            Some(l) if l.to_lowercase() == location.to_lowercase() => {}
            _ => return false,
        }
    }
    if criteria
        .customer_type
        .is_some_and(|c| c != thread.customer_type())
    {
        return false;
    }
    if criteria
        .hotel
        .as_deref()
        .is_some_and(|h| h != thread.property.name)
    {
        return false;
    }

    let sla_ok = match criteria.sla {
        SlaFilter::All => true,
        SlaFilter::Delayed => policy.is_delayed(thread, now),
        SlaFilter::OnTime => !policy.is_delayed(thread, now),
    };
    sla_ok && matches_query(thread, &criteria.query)
}

/// Case-insensitive substring search. Only the empty query matches
/// everything; whitespace is searched for literally.
fn matches_query(thread: &Thread, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    thread.title.to_lowercase().contains(&q)
        || thread
            .messages
            .iter()
            .any(|m| m.text.to_lowercase().contains(&q))
        || thread.ai.tags.iter().any(|t| t.to_lowercase().contains(&q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{message, sample_thread};
    use crate::thread::{Guest, ThreadStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_views_partition_by_status() {
        for status in [ThreadStatus::Open, ThreadStatus::Pending, ThreadStatus::Resolved] {
            let thread = sample_thread("t1").with_status(status);
            let inbox = matches(&thread, &FilterCriteria::default(), now());
            let archive = matches(&thread, &FilterCriteria::archive(), now());
            assert_ne!(inbox, archive);
            assert_eq!(archive, status == ThreadStatus::Resolved);
        }
    }

    #[test]
    fn test_negative_20_minutes_is_delayed_not_on_time() {
        let mut thread = sample_thread("t1");
        thread.ai.sentiment = Sentiment::Negative;
        thread.messages = vec![message("m1", "t1", true, now() - Duration::minutes(20))];

        let delayed = FilterCriteria::default().with_sla(SlaFilter::Delayed);
        let on_time = FilterCriteria::default().with_sla(SlaFilter::OnTime);
        assert!(matches(&thread, &delayed, now()));
        assert!(!matches(&thread, &on_time, now()));
    }

    #[test]
    fn test_location_is_case_insensitive_and_requires_guest() {
        let mut thread = sample_thread("t1");
        let mut guest = Guest::new("Ana");
        guest.location = Some("Lisbon, PT".into());
        thread.guest = Some(guest);

        let criteria = FilterCriteria::default().with_location("lisbon, pt");
        assert!(matches(&thread, &criteria, now()));

        thread.guest = None;
        assert!(!matches(&thread, &criteria, now()));
    }

    #[test]
    fn test_missing_customer_type_counts_as_regular() {
        let mut thread = sample_thread("t1");
        thread.guest = None;
        let regular = FilterCriteria::default().with_customer_type(CustomerType::Regular);
        let vip = FilterCriteria::default().with_customer_type(CustomerType::Vip);
        assert!(matches(&thread, &regular, now()));
        assert!(!matches(&thread, &vip, now()));
    }

    #[test]
    fn test_hotel_is_exact() {
        let thread = sample_thread("t1");
        let name = thread.property.name.clone();
        assert!(matches(&thread, &FilterCriteria::default().with_hotel(name.clone()), now()));
        assert!(!matches(
            &thread,
            &FilterCriteria::default().with_hotel(name.to_uppercase()),
            now()
        ));
    }

    #[test]
    fn test_query_searches_title_messages_and_tags() {
        let mut thread = sample_thread("t1");
        thread.title = "Broken AC".into();
        let mut msg = message("m1", "t1", true, now());
        msg.text = "The pool was closed".into();
        thread.messages = vec![msg];
        thread.ai.tags = vec!["Refund".into()];

        for q in ["broken", "POOL", "refund", ""] {
            assert!(matches(&thread, &FilterCriteria::default().with_query(q), now()), "{q}");
        }
        assert!(!matches(&thread, &FilterCriteria::default().with_query("wifi"), now()));
    }

    #[test]
    fn test_whitespace_query_is_literal() {
        let mut spaced = sample_thread("t1");
        spaced.title = "Broken AC".into();
        let mut single = sample_thread("t2");
        single.title = "Checkout".into();
        let mut msg = message("m1", "t2", true, now());
        msg.text = "Late".into();
        single.messages = vec![msg];

        let criteria = FilterCriteria::default().with_query(" ");
        assert!(matches(&spaced, &criteria, now()));
        assert!(!matches(&single, &criteria, now()));
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let thread = sample_thread("t1");
        let criteria = FilterCriteria::default()
            .with_platform(thread.platform)
            .with_sentiment(Sentiment::Negative);
        let expected = thread.ai.sentiment == Sentiment::Negative;
        assert_eq!(matches(&thread, &criteria, now()), expected);
    }

    #[test]
    fn test_sla_filter_parses_snake_case() {
        assert_eq!("on_time".parse::<SlaFilter>().unwrap(), SlaFilter::OnTime);
        assert_eq!(SlaFilter::Delayed.to_string(), "delayed");
    }
}

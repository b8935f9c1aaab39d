//! SLA evaluation.
//!
//! A thread is delayed when the guest's last message has waited longer than
//! the sentiment-dependent target and the thread is not resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::thread::{Sentiment, Thread};

/// Target response times in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicy {
    pub negative_minutes: i64,
    pub default_minutes: i64,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            negative_minutes: 15,
            default_minutes: 30,
        }
    }
}

impl SlaPolicy {
    pub fn target_minutes(&self, sentiment: Sentiment) -> i64 {
        match sentiment {
            Sentiment::Negative => self.negative_minutes,
            Sentiment::Positive | Sentiment::Neutral => self.default_minutes,
        }
    }

    /// Minutes the guest has been waiting since their last message, if any.
    pub fn elapsed_minutes(thread: &Thread, now: DateTime<Utc>) -> Option<f64> {
        thread
            .last_inbound()
            .map(|m| (now - m.timestamp).num_milliseconds() as f64 / 60_000.0)
    }

    pub fn is_delayed(&self, thread: &Thread, now: DateTime<Utc>) -> bool {
        if thread.is_resolved() {
            return false;
        }
        match Self::elapsed_minutes(thread, now) {
            Some(elapsed) => elapsed > self.target_minutes(thread.ai.sentiment) as f64,
            None => false,
        }
    }
}

/// [`SlaPolicy::is_delayed`] with the default 15/30 minute targets.
pub fn is_delayed(thread: &Thread, now: DateTime<Utc>) -> bool {
    SlaPolicy::default().is_delayed(thread, now)
}

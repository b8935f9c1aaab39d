pub mod booking;
pub mod clock;
pub mod config;
pub mod datetime;
pub mod error;
pub mod filter;
pub mod notification;
pub mod property;
pub mod reply;
pub mod sla;
pub mod thread;

// Re-export common error type
pub use error::{Result, SohoError};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};

    use crate::property::PropertyInfo;
    use crate::thread::{
        AiMeta, Guest, Message, Platform, Sentiment, Thread, ThreadStatus,
    };

    pub fn sample_thread(id: &str) -> Thread {
        let now = Utc::now();
        Thread {
            id: id.to_string(),
            platform: Platform::Facebook,
            title: format!("Thread {id}"),
            last_updated: now,
            assignment: None,
            status: ThreadStatus::Open,
            guest: Some(Guest::new("Ana Souza")),
            messages: vec![message(&format!("{id}-m1"), id, true, now)],
            ai: AiMeta::new(Sentiment::Neutral),
            property: PropertyInfo::new("Seaside Resort Goa"),
        }
    }

    pub fn message(id: &str, thread_id: &str, inbound: bool, timestamp: DateTime<Utc>) -> Message {
        Message {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            platform: Platform::Facebook,
            sender_name: if inbound { "Ana Souza" } else { "Agent" }.to_string(),
            text: format!("message {id}"),
            timestamp,
            inbound,
            attachments: Vec::new(),
        }
    }
}

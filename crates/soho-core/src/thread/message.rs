//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Platform;

/// Kind of media attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
}

/// A media attachment (data URL or absolute URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Attachment {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: AttachmentKind::Image,
            url: url.into(),
            alt: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// One inbound (guest) or outbound (agent/system) utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub platform: Platform,
    pub sender_name: String,
    /// May be empty when the message only carries attachments.
    #[serde(default)]
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// `true` when sent by the guest.
    pub inbound: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a new outbound message with a fresh id.
    pub fn outbound(
        thread_id: impl Into<String>,
        platform: Platform,
        sender_name: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            thread_id: thread_id.into(),
            platform,
            sender_name: sender_name.into(),
            text: text.into(),
            timestamp,
            inbound: false,
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_json_shape() {
        let now = Utc::now();
        let msg = Message::outbound("t1", Platform::Facebook, "Agent", "Hello", now)
            .with_attachments(vec![Attachment::image("https://cdn/x.png").with_alt("room")]);

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["threadId"], "t1");
        assert_eq!(json["senderName"], "Agent");
        assert_eq!(json["inbound"], false);
        assert_eq!(json["attachments"][0]["type"], "image");
        assert_eq!(json["attachments"][0]["alt"], "room");
    }

    #[test]
    fn test_outbound_ids_are_unique() {
        let now = Utc::now();
        let a = Message::outbound("t1", Platform::X, "Agent", "a", now);
        let b = Message::outbound("t1", Platform::X, "Agent", "b", now);
        assert_ne!(a.id, b.id);
    }
}

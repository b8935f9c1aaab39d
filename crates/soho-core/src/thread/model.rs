//! Thread domain model.
//!
//! A thread is one conversation with one guest on one platform. Threads are
//! treated as values: every mutation produces a derived copy which replaces
//! the stored thread as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ai::AiMeta;
use super::guest::{CustomerType, Guest};
use super::message::Message;
use crate::property::PropertyInfo;

/// Social platform a thread originates from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    Facebook,
    Instagram,
    X,
    Google,
    Tripadvisor,
}

/// Workflow status of a thread.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThreadStatus {
    Open,
    Pending,
    Resolved,
}

/// Assignment priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Who is handling a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub assignee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub priority: Priority,
}

impl Assignment {
    pub fn new(assignee: impl Into<String>, priority: Priority) -> Self {
        Self {
            assignee: assignee.into(),
            department: None,
            priority,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// A conversation with a guest.
///
/// This is the canonical, fully normalized record the engine operates on,
/// independent of the storage format it was loaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    /// Stable unique identifier
    pub id: String,
    pub platform: Platform,
    /// Display title
    pub title: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<Assignment>,
    pub status: ThreadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
    /// Append-only; insertion order is chronological order.
    #[serde(default)]
    pub messages: Vec<Message>,
    pub ai: AiMeta,
    pub property: PropertyInfo,
}

impl Thread {
    pub fn is_resolved(&self) -> bool {
        self.status == ThreadStatus::Resolved
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent message sent by the guest.
    pub fn last_inbound(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.inbound)
    }

    /// Returns the last message only when it is inbound, i.e. the guest is
    /// still waiting for an answer.
    pub fn awaiting_reply(&self) -> Option<&Message> {
        self.last_message().filter(|m| m.inbound)
    }

    pub fn customer_type(&self) -> CustomerType {
        self.guest
            .as_ref()
            .map(|g| g.customer_type)
            .unwrap_or_default()
    }

    pub fn guest_name(&self) -> Option<&str> {
        self.guest.as_ref().map(|g| g.name.as_str())
    }

    pub fn guest_language(&self) -> Option<&str> {
        self.guest.as_ref().and_then(|g| g.language.as_deref())
    }

    /// Timestamp shown in thread lists: the last guest message, else the
    /// last update.
    pub fn display_timestamp(&self) -> DateTime<Utc> {
        self.last_inbound()
            .map(|m| m.timestamp)
            .unwrap_or(self.last_updated)
    }

    // ============================================================================
    // Derived copies
    // ============================================================================

    /// Appends `message` and refreshes `last_updated`.
    pub fn with_message(mut self, message: Message, now: DateTime<Utc>) -> Self {
        self.messages.push(message);
        self.last_updated = now;
        self
    }

    /// Removes the first message carrying `message_id`; unchanged if absent.
    pub fn without_message(mut self, message_id: &str) -> Self {
        if let Some(pos) = self.messages.iter().position(|m| m.id == message_id) {
            self.messages.remove(pos);
        }
        self
    }

    pub fn with_assignment(mut self, assignment: Option<Assignment>) -> Self {
        self.assignment = assignment;
        self
    }

    pub fn with_status(mut self, status: ThreadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.ai = self.ai.with_tag(tag);
        self
    }

    pub fn without_tag(mut self, tag: &str) -> Self {
        self.ai = self.ai.without_tag(tag);
        self
    }
}

/// The persisted unit: every thread of the inbox.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InboxSnapshot {
    pub threads: Vec<Thread>,
}

impl InboxSnapshot {
    pub fn new(threads: Vec<Thread>) -> Self {
        Self { threads }
    }
}

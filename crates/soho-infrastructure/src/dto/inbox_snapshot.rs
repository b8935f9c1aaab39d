//! Inbox snapshot DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Original browser-storage layout (`threadTitle`, optional
//!   `customerType`)
//! - **1.1.0**: Legacy guest "Rahul" renamed to "Liza" (profile and message
//!   sender names)
//! - **2.0.0**: Canonical thread record with `title`; guests and tags
//!   normalized on load

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use soho_core::property::PropertyInfo;
use soho_core::thread::{
    AiMeta, Assignment, CustomerType, Guest, InboxSnapshot, Message, Platform, Thread,
    ThreadStatus, normalize_thread,
};

/// Entity name under which the snapshot migration path is registered.
pub const INBOX_SNAPSHOT_ENTITY: &str = "inbox_snapshot";

// ============================================================================
// Guest DTOs
// ============================================================================

/// Guest DTO V1.0.0 (customer type may be missing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestV1_0_0 {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_stayed: Option<String>,
}

impl From<GuestV1_0_0> for Guest {
    fn from(dto: GuestV1_0_0) -> Self {
        Guest {
            name: dto.name,
            username: dto.username,
            avatar_url: dto.avatar_url,
            location: dto.location,
            language: dto.language,
            customer_type: dto.customer_type.unwrap_or_default(),
            email: dto.email,
            phone: dto.phone,
            last_stayed: dto.last_stayed,
        }
    }
}

// ============================================================================
// Thread DTOs
// ============================================================================

/// Thread DTO V1.0.0, shared by the 1.0.0 and 1.1.0 snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadV1_0_0 {
    pub id: String,
    pub platform: Platform,
    #[serde(alias = "title")]
    pub thread_title: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<Assignment>,
    pub status: ThreadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestV1_0_0>,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub ai: AiMeta,
    pub property: PropertyInfo,
}

/// Thread DTO V2.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadV2_0_0 {
    pub id: String,
    pub platform: Platform,
    #[serde(alias = "threadTitle")]
    pub title: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<Assignment>,
    pub status: ThreadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub ai: AiMeta,
    pub property: PropertyInfo,
}

impl From<ThreadV2_0_0> for Thread {
    fn from(dto: ThreadV2_0_0) -> Self {
        normalize_thread(Thread {
            id: dto.id,
            platform: dto.platform,
            title: dto.title,
            last_updated: dto.last_updated,
            assignment: dto.assignment,
            status: dto.status,
            guest: dto.guest,
            messages: dto.messages,
            ai: dto.ai,
            property: dto.property,
        })
    }
}

impl From<&Thread> for ThreadV2_0_0 {
    fn from(thread: &Thread) -> Self {
        ThreadV2_0_0 {
            id: thread.id.clone(),
            platform: thread.platform,
            title: thread.title.clone(),
            last_updated: thread.last_updated,
            assignment: thread.assignment.clone(),
            status: thread.status,
            guest: thread.guest.clone(),
            messages: thread.messages.clone(),
            ai: thread.ai.clone(),
            property: thread.property.clone(),
        }
    }
}

// ============================================================================
// Snapshot DTOs
// ============================================================================

/// Inbox snapshot V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct InboxSnapshotV1_0_0 {
    #[serde(default)]
    pub threads: Vec<ThreadV1_0_0>,
}

/// Inbox snapshot V1.1.0 (legacy guest rename applied)
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct InboxSnapshotV1_1_0 {
    #[serde(default)]
    pub threads: Vec<ThreadV1_0_0>,
}

/// Inbox snapshot V2.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "2.0.0")]
pub struct InboxSnapshotV2_0_0 {
    #[serde(default)]
    pub threads: Vec<ThreadV2_0_0>,
}

/// Type alias for the latest snapshot version.
pub type InboxSnapshotDTO = InboxSnapshotV2_0_0;

// ============================================================================
// Migration implementations
// ============================================================================

const LEGACY_GUEST_NAME: &str = "Rahul";
const RENAMED_GUEST_NAME: &str = "Liza";
const RENAMED_GUEST_USERNAME: &str = "liza-travel";
const RENAMED_GUEST_AVATAR: &str = "/avatars/liza.svg";

fn rename_legacy_guest(mut thread: ThreadV1_0_0) -> ThreadV1_0_0 {
    if let Some(guest) = thread.guest.as_mut().filter(|g| g.name == LEGACY_GUEST_NAME) {
        guest.name = RENAMED_GUEST_NAME.to_string();
        guest.username = Some(RENAMED_GUEST_USERNAME.to_string());
        guest.avatar_url = Some(RENAMED_GUEST_AVATAR.to_string());
    }
    for message in thread
        .messages
        .iter_mut()
        .filter(|m| m.sender_name == LEGACY_GUEST_NAME)
    {
        message.sender_name = RENAMED_GUEST_NAME.to_string();
    }
    thread
}

/// Migration from V1.0.0 to V1.1.0: renames the legacy guest.
impl MigratesTo<InboxSnapshotV1_1_0> for InboxSnapshotV1_0_0 {
    fn migrate(self) -> InboxSnapshotV1_1_0 {
        InboxSnapshotV1_1_0 {
            threads: self.threads.into_iter().map(rename_legacy_guest).collect(),
        }
    }
}

/// Migration from V1.1.0 to V2.0.0: `threadTitle` becomes `title` and the
/// customer type is filled in.
impl MigratesTo<InboxSnapshotV2_0_0> for InboxSnapshotV1_1_0 {
    fn migrate(self) -> InboxSnapshotV2_0_0 {
        InboxSnapshotV2_0_0 {
            threads: self
                .threads
                .into_iter()
                .map(|t| ThreadV2_0_0 {
                    id: t.id,
                    platform: t.platform,
                    title: t.thread_title,
                    last_updated: t.last_updated,
                    assignment: t.assignment,
                    status: t.status,
                    guest: t.guest.map(Guest::from),
                    messages: t.messages,
                    ai: t.ai,
                    property: t.property,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert InboxSnapshotV2_0_0 DTO to domain model (normalizing every thread)
impl IntoDomain<InboxSnapshot> for InboxSnapshotV2_0_0 {
    fn into_domain(self) -> InboxSnapshot {
        InboxSnapshot::new(self.threads.into_iter().map(Thread::from).collect())
    }
}

/// Convert domain model to InboxSnapshotV2_0_0 DTO (for version-migrate save support)
impl FromDomain<InboxSnapshot> for InboxSnapshotV2_0_0 {
    fn from_domain(snapshot: InboxSnapshot) -> Self {
        InboxSnapshotV2_0_0 {
            threads: snapshot.threads.iter().map(ThreadV2_0_0::from).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for inbox snapshots.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Legacy guest rename
/// - V1.1.0 → V2.0.0: Canonical thread layout
/// - V2.0.0 → InboxSnapshot: Normalization into the domain model
pub fn create_inbox_snapshot_migrator() -> soho_core::Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let path = version_migrate::Migrator::define(INBOX_SNAPSHOT_ENTITY)
        .from::<InboxSnapshotV1_0_0>()
        .step::<InboxSnapshotV1_1_0>()
        .step::<InboxSnapshotV2_0_0>()
        .into_with_save::<InboxSnapshot>();

    migrator.register(path)?;

    Ok(migrator)
}

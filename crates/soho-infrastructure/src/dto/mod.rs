//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of the persisted inbox. They are
//! private to the infrastructure layer and handle the evolution of the
//! storage format over time.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field renames, type changes)
//! - **MINOR (1.X.0)**: Data fixes and backward-compatible additions

mod inbox_snapshot;

pub use inbox_snapshot::{
    GuestV1_0_0, INBOX_SNAPSHOT_ENTITY, InboxSnapshotDTO, InboxSnapshotV1_0_0,
    InboxSnapshotV1_1_0, InboxSnapshotV2_0_0, ThreadV1_0_0, ThreadV2_0_0,
    create_inbox_snapshot_migrator,
};

//! Versioned migration of raw inbox snapshots.
//!
//! Storage backends hand whatever they read to [`migrate`], which upgrades it
//! to the current schema. The step is pure: it never touches the backend and
//! produces the same output for the same input.

use serde_json::{Map, Value};
use tracing::debug;

use soho_core::error::{Result, SohoError};
use soho_core::thread::InboxSnapshot;

use crate::dto::{INBOX_SNAPSHOT_ENTITY, create_inbox_snapshot_migrator};

/// Schema version written by this build.
pub const CURRENT_VERSION: &str = "2.0.0";

/// Version assumed for data that carries no version marker.
pub const LEGACY_VERSION: &str = "1.0.0";

const VERSION_KEY: &str = "version";

/// Returns the schema version `raw` declares, or [`LEGACY_VERSION`] for a bare
/// array or an unversioned object.
pub fn detect_version(raw: &Value) -> String {
    raw.get(VERSION_KEY)
        .and_then(Value::as_str)
        .unwrap_or(LEGACY_VERSION)
        .to_string()
}

/// Upgrades `raw`, stored under `from_version`, to the current schema.
///
/// `raw` is either a bare array of threads (the 1.0.0 layout) or an
/// object with a `threads` field. Returns the canonical snapshot together
/// with [`CURRENT_VERSION`].
pub fn migrate(raw: Value, from_version: &str) -> Result<(InboxSnapshot, &'static str)> {
    let mut object = match raw {
        Value::Array(threads) => {
            let mut object = Map::new();
            object.insert("threads".to_string(), Value::Array(threads));
            object
        }
        Value::Object(object) => object,
        other => {
            return Err(SohoError::migration(format!(
                "Unsupported snapshot shape: expected array or object, got {}",
                type_name(&other)
            )));
        }
    };
    object.insert(
        VERSION_KEY.to_string(),
        Value::String(from_version.to_string()),
    );

    let migrator = create_inbox_snapshot_migrator()?;
    let snapshot: InboxSnapshot = migrator
        .load_flat_from(INBOX_SNAPSHOT_ENTITY, Value::Object(object))
        .map_err(|e| {
            SohoError::migration(format!(
                "Failed to migrate inbox snapshot from {}: {}",
                from_version, e
            ))
        })?;

    debug!(
        target: "migration",
        from = from_version,
        to = CURRENT_VERSION,
        threads = snapshot.threads.len(),
        "Migrated inbox snapshot"
    );
    Ok((snapshot, CURRENT_VERSION))
}

/// Serializes `snapshot` in the current schema, including the version key.
pub fn to_current(snapshot: &InboxSnapshot) -> Result<String> {
    let migrator = create_inbox_snapshot_migrator()?;
    migrator
        .save_domain_flat(INBOX_SNAPSHOT_ENTITY, snapshot.clone())
        .map_err(|e| SohoError::persistence(format!("Failed to serialize inbox snapshot: {}", e)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

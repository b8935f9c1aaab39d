//! Thread persistence contract.

use async_trait::async_trait;

use super::model::Thread;
use crate::error::Result;

/// An abstract backend for persisting the inbox.
///
/// This trait decouples the engine from the storage mechanism (memory,
/// JSON file, remote API). The engine behaves identically regardless of the
/// backend.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Schema versioning and migration of stored data
/// - Reporting "no data yet" as `Ok(None)` rather than an error
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Loads every stored thread.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(threads))`: Stored data found (possibly empty)
    /// - `Ok(None)`: Nothing stored yet; the caller seeds a default dataset
    /// - `Err(_)`: The backend failed
    async fn load(&self) -> Result<Option<Vec<Thread>>>;

    /// Replaces the stored sequence with `threads`.
    async fn save(&self, threads: &[Thread]) -> Result<()>;

    /// Persists a mutation that touched `changed`; `all` is the full
    /// sequence after the mutation.
    ///
    /// Defaults to a full [`save`](Self::save). Backends that can write a
    /// single record override it.
    async fn save_changed(&self, changed: &[Thread], all: &[Thread]) -> Result<()> {
        let _ = changed;
        self.save(all).await
    }
}

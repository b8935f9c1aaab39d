//! Thread Store: the single source of truth for the inbox.
//!
//! Every mutation is a read-modify-write applied under the write lock against
//! the latest committed state, and replaces the affected thread as a whole.
//! Persistence runs after the lock is released and is best-effort: the
//! in-memory sequence stays authoritative when the backend fails.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use soho_core::clock::Clock;
use soho_core::thread::{Message, Thread, ThreadRepository, normalize_thread};
use soho_infrastructure::seed::seed_threads;

pub struct ThreadStore {
    threads: Arc<RwLock<Vec<Thread>>>,
    repository: Arc<dyn ThreadRepository>,
    clock: Arc<dyn Clock>,
    /// Serializes backend writes; never held together with `threads`.
    saving: Mutex<()>,
}

impl ThreadStore {
    /// Creates an empty, uninitialized store.
    pub fn new(repository: Arc<dyn ThreadRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            threads: Arc::new(RwLock::new(Vec::new())),
            repository,
            clock,
            saving: Mutex::new(()),
        }
    }

    /// Creates a store and loads it from the backend.
    pub async fn open(repository: Arc<dyn ThreadRepository>, clock: Arc<dyn Clock>) -> Self {
        let store = Self::new(repository, clock);
        store.initialize().await;
        store
    }

    /// Loads the backend into memory.
    ///
    /// Stored threads are normalized. When the backend holds no threads the
    /// default dataset is seeded and saved; when it fails the last known
    /// in-memory state is kept, or seeded if there is none.
    pub async fn initialize(&self) -> Vec<Thread> {
        let loaded = self.repository.load().await;

        let mut guard = self.threads.write().await;
        let seeded = match loaded {
            Ok(Some(stored)) if !stored.is_empty() => {
                *guard = stored.into_iter().map(normalize_thread).collect();
                info!(target: "thread_store", threads = guard.len(), "Loaded inbox");
                false
            }
            Ok(_) => {
                *guard = seed_threads(self.clock.now());
                info!(target: "thread_store", threads = guard.len(), "Seeded default inbox");
                true
            }
            Err(e) => {
                warn!(target: "persistence", error = %e, "Failed to load inbox");
                if guard.is_empty() {
                    *guard = seed_threads(self.clock.now());
                    info!(target: "thread_store", threads = guard.len(), "Seeded default inbox");
                }
                false
            }
        };
        let snapshot = guard.clone();
        drop(guard);

        if seeded {
            let _saving = self.saving.lock().await;
            if let Err(e) = self.repository.save(&snapshot).await {
                warn!(target: "persistence", error = %e, "Failed to save seeded inbox");
            }
        }
        snapshot
    }

    /// Current full sequence; empty when uninitialized.
    pub async fn get_all(&self) -> Vec<Thread> {
        self.threads.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Thread> {
        self.threads
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Applies `patch` to the thread with `id`.
    ///
    /// Unknown ids leave the store unchanged.
    pub async fn patch_by_id<F>(&self, id: &str, patch: F) -> Vec<Thread>
    where
        F: FnOnce(Thread) -> Thread + Send,
    {
        self.patch_if(id, |thread| Some(patch(thread))).await;
        self.get_all().await
    }

    /// Applies `patch` to the latest version of the thread with `id` and
    /// commits the result only when `patch` returns `Some`.
    ///
    /// Returns the committed thread, or `None` when the id is unknown or the
    /// patch declined.
    pub async fn patch_if<F>(&self, id: &str, patch: F) -> Option<Thread>
    where
        F: FnOnce(Thread) -> Option<Thread> + Send,
    {
        let updated = {
            let mut guard = self.threads.write().await;
            let Some(pos) = guard.iter().position(|t| t.id == id) else {
                debug!(target: "thread_store", thread_id = id, "Patch skipped: thread not found");
                return None;
            };
            let updated = patch(guard[pos].clone())?;
            guard[pos] = updated.clone();
            updated
        };

        self.persist(std::slice::from_ref(&updated.id)).await;
        Some(updated)
    }

    /// Applies `patch` to every thread whose id is in `ids`.
    pub async fn patch_many<F>(&self, ids: &[String], patch: F) -> Vec<Thread>
    where
        F: Fn(Thread) -> Thread + Send,
    {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let (changed, snapshot) = {
            let mut guard = self.threads.write().await;
            let mut changed = Vec::new();
            for slot in guard.iter_mut().filter(|t| wanted.contains(t.id.as_str())) {
                *slot = patch(slot.clone());
                changed.push(slot.id.clone());
            }
            (changed, guard.clone())
        };

        if changed.is_empty() {
            debug!(target: "thread_store", "Bulk patch matched no threads");
        } else {
            self.persist(&changed).await;
        }
        snapshot
    }

    /// Appends `message` and refreshes `last_updated`.
    pub async fn append_message(&self, thread_id: &str, message: Message) -> Vec<Thread> {
        let now = self.clock.now();
        self.patch_by_id(thread_id, move |t| t.with_message(message, now))
            .await
    }

    /// Removes the message with `message_id`; no-op when absent.
    pub async fn remove_message(&self, thread_id: &str, message_id: &str) -> Vec<Thread> {
        self.patch_by_id(thread_id, |t| t.without_message(message_id))
            .await
    }

    /// Writes the threads in `ids` as they are now.
    ///
    /// Saves are serialized and always read the latest committed state, so a
    /// slower earlier save can never overwrite a newer commit.
    async fn persist(&self, ids: &[String]) {
        let _saving = self.saving.lock().await;
        let all = self.get_all().await;
        let changed: Vec<Thread> = all
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect();

        if let Err(e) = self.repository.save_changed(&changed, &all).await {
            warn!(
                target: "persistence",
                error = %e,
                changed = changed.len(),
                "Failed to persist inbox; keeping in-memory state"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRepository, clock, inbound, thread};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use soho_core::error::Result;
    use soho_core::thread::{ThreadStatus, Guest};
    use soho_infrastructure::InMemoryThreadRepository;

    /// Backend whose saves block until the test releases them.
    struct GatedRepository {
        threads: Vec<Thread>,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ThreadRepository for GatedRepository {
        async fn load(&self) -> Result<Option<Vec<Thread>>> {
            Ok(Some(self.threads.clone()))
        }

        async fn save(&self, _threads: &[Thread]) -> Result<()> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    async fn store_with(threads: Vec<Thread>) -> (ThreadStore, Arc<InMemoryThreadRepository>) {
        let repo = Arc::new(InMemoryThreadRepository::with_threads(threads));
        let store = ThreadStore::open(repo.clone(), clock()).await;
        (store, repo)
    }

    #[tokio::test]
    async fn test_uninitialized_store_is_empty() {
        let store = ThreadStore::new(Arc::new(InMemoryThreadRepository::new()), clock());
        assert!(store.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_backend_is_seeded_and_saved() {
        let repo = Arc::new(InMemoryThreadRepository::new());
        let store = ThreadStore::open(repo.clone(), clock()).await;

        let threads = store.get_all().await;
        assert_eq!(threads.len(), 8);
        assert_eq!(repo.load().await.unwrap().unwrap(), threads);
    }

    #[tokio::test]
    async fn test_empty_stored_list_is_seeded() {
        let repo = Arc::new(InMemoryThreadRepository::with_threads(Vec::new()));
        let store = ThreadStore::open(repo, clock()).await;
        assert_eq!(store.get_all().await.len(), 8);
    }

    #[tokio::test]
    async fn test_failing_backend_falls_back_to_seed() {
        let store = ThreadStore::open(Arc::new(FailingRepository), clock()).await;
        assert_eq!(store.get_all().await.len(), 8);

        // writes still land in memory
        let updated = store
            .patch_by_id("t1", |t| t.with_status(ThreadStatus::Resolved))
            .await;
        assert!(updated.iter().any(|t| t.id == "t1" && t.is_resolved()));
    }

    #[tokio::test]
    async fn test_loaded_threads_are_normalized() {
        let mut raw = thread("t1");
        raw.guest = None;
        raw.ai.tags = vec!["vip".into(), "vip".into()];
        let (store, _) = store_with(vec![raw]).await;

        let loaded = store.get("t1").await.unwrap();
        assert!(loaded.guest.is_some());
        assert_eq!(loaded.ai.tags, vec!["vip"]);
    }

    #[tokio::test]
    async fn test_patch_unknown_id_is_noop() {
        let (store, _) = store_with(vec![thread("t1")]).await;
        let before = store.get_all().await;
        let after = store
            .patch_by_id("missing", |t| t.with_status(ThreadStatus::Resolved))
            .await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_patch_does_not_affect_held_references() {
        let (store, _) = store_with(vec![thread("t1")]).await;
        let held = store.get_all().await;
        store
            .patch_by_id("t1", |t| t.with_status(ThreadStatus::Resolved))
            .await;
        assert_eq!(held[0].status, ThreadStatus::Open);
        assert!(store.get("t1").await.unwrap().is_resolved());
    }

    #[tokio::test]
    async fn test_patch_many_applies_to_listed_ids_and_persists() {
        let (store, repo) = store_with(vec![thread("t1"), thread("t2"), thread("t3")]).await;
        let ids = vec!["t1".to_string(), "t3".to_string(), "nope".to_string()];
        let threads = store
            .patch_many(&ids, |t| t.with_status(ThreadStatus::Pending))
            .await;

        let statuses: Vec<_> = threads.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![ThreadStatus::Pending, ThreadStatus::Open, ThreadStatus::Pending]
        );
        assert_eq!(repo.load().await.unwrap().unwrap(), threads);
    }

    #[tokio::test]
    async fn test_append_then_remove_round_trip() {
        let (store, _) = store_with(vec![thread("t1")]).await;
        let before = store.get("t1").await.unwrap().messages;

        let msg = inbound("t1", "new-msg", "hello", clock().now());
        store.append_message("t1", msg).await;
        let appended = store.get("t1").await.unwrap();
        assert_eq!(appended.messages.len(), before.len() + 1);
        assert_eq!(appended.last_updated, clock().now());

        store.remove_message("t1", "new-msg").await;
        assert_eq!(store.get("t1").await.unwrap().messages, before);
    }

    #[tokio::test]
    async fn test_patch_if_declined_leaves_state() {
        let (store, _) = store_with(vec![thread("t1")]).await;
        let result = store.patch_if("t1", |_| None).await;
        assert!(result.is_none());

        let committed = store
            .patch_if("t1", |mut t| {
                t.guest = Some(Guest::new("Marco"));
                Some(t)
            })
            .await
            .unwrap();
        assert_eq!(committed.guest_name(), Some("Marco"));
    }

    #[tokio::test]
    async fn test_reads_do_not_wait_for_pending_save() {
        let repo = Arc::new(GatedRepository {
            threads: vec![thread("t1"), thread("t2")],
            entered: Notify::new(),
            release: Notify::new(),
        });
        let store = Arc::new(ThreadStore::open(repo.clone(), clock()).await);

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .patch_by_id("t1", |t| t.with_status(ThreadStatus::Resolved))
                    .await
            })
        };
        repo.entered.notified().await;

        let threads = tokio::time::timeout(Duration::from_secs(1), store.get_all())
            .await
            .expect("read blocked behind save");
        assert!(threads.iter().any(|t| t.id == "t1" && t.is_resolved()));

        repo.release.notify_one();
        let after = writer.await.unwrap();
        assert!(after.iter().any(|t| t.id == "t1" && t.is_resolved()));
    }
}

//! Wiring of the inbox engine from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use soho_core::booking::BookingDirectory;
use soho_core::clock::Clock;
use soho_core::config::{InboxConfig, StorageBackend, StorageConfig};
use soho_core::error::{Result, SohoError};
use soho_core::notification::Notifier;
use soho_core::reply::{RuleBasedTone, ToneService, Translator};
use soho_core::thread::ThreadRepository;
use soho_infrastructure::{
    InMemoryBookingDirectory, InMemoryThreadRepository, JsonFileThreadRepository,
    PassthroughTranslator, RemoteThreadRepository,
};

use crate::auto_reply::{AutoReplyEngine, AutoReplyScheduler, AutoReplySettings, ReplyMode};
use crate::inbox_usecase::InboxUseCase;
use crate::store::ThreadStore;

/// Creates the persistence collaborator selected by `storage`.
///
/// `env_api_base` overrides the configured remote base URL.
pub fn build_repository(
    storage: &StorageConfig,
    env_api_base: Option<String>,
) -> Result<Arc<dyn ThreadRepository>> {
    let repository: Arc<dyn ThreadRepository> = match storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryThreadRepository::new()),
        StorageBackend::File => {
            let repo = JsonFileThreadRepository::new(storage.path.as_deref())?;
            info!(target: "persistence", path = %repo.path().display(), "Using JSON file storage");
            Arc::new(repo)
        }
        StorageBackend::Remote => {
            let base = storage.resolved_api_base(env_api_base).ok_or_else(|| {
                SohoError::config("storage.backend = \"remote\" requires storage.api_base")
            })?;
            info!(target: "persistence", api_base = %base, "Using remote storage");
            Arc::new(RemoteThreadRepository::new(base)?)
        }
    };
    Ok(repository)
}

/// Collaborators that can be swapped out when assembling an [`InboxApp`].
pub struct Collaborators {
    pub repository: Arc<dyn ThreadRepository>,
    pub clock: Arc<dyn Clock>,
    pub notifier: Arc<dyn Notifier>,
    pub tone: Arc<dyn ToneService>,
    pub translator: Arc<dyn Translator>,
    pub bookings: Arc<dyn BookingDirectory>,
}

impl Collaborators {
    /// Default in-process collaborators around `repository`.
    pub fn new(
        repository: Arc<dyn ThreadRepository>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            clock,
            notifier,
            tone: Arc::new(RuleBasedTone),
            translator: Arc::new(PassthroughTranslator::new()),
            bookings: Arc::new(InMemoryBookingDirectory::with_samples()),
        }
    }
}

/// A fully wired inbox: store, operator surface and auto-reply scheduler.
pub struct InboxApp {
    pub store: Arc<ThreadStore>,
    pub inbox: InboxUseCase,
    pub scheduler: AutoReplyScheduler,
}

impl InboxApp {
    /// Loads the store and wires every component.
    ///
    /// The scheduler starts in `Auto` mode when `auto_reply.start_enabled`.
    pub async fn build(config: &InboxConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            repository,
            clock,
            notifier,
            tone,
            translator,
            bookings,
        } = collaborators;

        let store = Arc::new(ThreadStore::open(repository, clock.clone()).await);
        let inbox = InboxUseCase::new(store.clone(), bookings, clock.clone(), config);
        let engine = AutoReplyEngine::new(
            store.clone(),
            tone,
            translator,
            notifier,
            clock,
            AutoReplySettings::from_config(&config.auto_reply, &config.agent_name),
        );
        let scheduler = AutoReplyScheduler::new(
            Arc::new(engine),
            Duration::from_secs(config.auto_reply.interval_secs),
        );

        if config.auto_reply.start_enabled {
            scheduler.set_mode(ReplyMode::Auto).await;
        }

        Self {
            store,
            inbox,
            scheduler,
        }
    }

    pub async fn shutdown(&self) {
        self.scheduler.stop().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingNotifier, clock, inbound, thread, at};
    use soho_core::thread::Thread;
    use tempfile::TempDir;

    fn storage(backend: StorageBackend) -> StorageConfig {
        StorageConfig {
            backend,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_remote_backend_requires_base_url() {
        let err = build_repository(&storage(StorageBackend::Remote), None)
            .err()
            .unwrap();
        assert!(err.is_config());

        let ok = build_repository(
            &storage(StorageBackend::Remote),
            Some("http://localhost:8080/api".into()),
        );
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn test_file_backend_persists_across_restarts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inbox.json");
        let mut config = InboxConfig::default();
        config.storage.path = Some(path.to_string_lossy().into_owned());

        let first = InboxApp::build(
            &config,
            Collaborators::new(
                build_repository(&config.storage, None).unwrap(),
                clock(),
                Arc::new(RecordingNotifier::default()),
            ),
        )
        .await;
        first.inbox.add_tag("t1", "follow-up").await;
        assert!(path.exists());

        let second = InboxApp::build(
            &config,
            Collaborators::new(
                build_repository(&config.storage, None).unwrap(),
                clock(),
                Arc::new(RecordingNotifier::default()),
            ),
        )
        .await;
        let t1 = second.store.get("t1").await.unwrap();
        assert!(t1.ai.has_tag("follow-up"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_enabled_runs_scheduler() {
        let mut t: Thread = thread("t1");
        t.messages = vec![inbound("t1", "m1", "Hello?", at(2025, 4, 1))];
        let mut config = InboxConfig::default();
        config.auto_reply.start_enabled = true;

        let app = InboxApp::build(
            &config,
            Collaborators::new(
                Arc::new(InMemoryThreadRepository::with_threads(vec![t])),
                clock(),
                Arc::new(RecordingNotifier::default()),
            ),
        )
        .await;
        assert_eq!(app.scheduler.mode().await, ReplyMode::Auto);

        tokio::time::sleep(Duration::from_secs(config.auto_reply.interval_secs + 1)).await;
        assert_eq!(app.store.get("t1").await.unwrap().messages.len(), 2);

        app.shutdown().await;
        assert_eq!(app.scheduler.mode().await, ReplyMode::Manual);
    }
}

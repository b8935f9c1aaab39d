//! Periodic auto-reply job.
//!
//! `Manual` mode has no timer. Switching to `Auto` spawns a task that runs
//! one engine tick per interval; switching back (or dropping the scheduler)
//! cancels it. A tick that is already running completes, but no new tick
//! starts after cancellation.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::engine::AutoReplyEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    Auto,
    #[default]
    Manual,
}

struct RunningJob {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct AutoReplyScheduler {
    engine: Arc<AutoReplyEngine>,
    interval: Duration,
    job: Mutex<Option<RunningJob>>,
}

impl AutoReplyScheduler {
    pub fn new(engine: Arc<AutoReplyEngine>, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            job: Mutex::new(None),
        }
    }

    pub fn engine(&self) -> &Arc<AutoReplyEngine> {
        &self.engine
    }

    pub async fn mode(&self) -> ReplyMode {
        match self.job.lock().await.as_ref() {
            Some(job) if !job.handle.is_finished() => ReplyMode::Auto,
            _ => ReplyMode::Manual,
        }
    }

    pub async fn set_mode(&self, mode: ReplyMode) {
        match mode {
            ReplyMode::Auto => self.start().await,
            ReplyMode::Manual => self.stop().await,
        }
    }

    /// Starts the periodic job; no-op when it is already running.
    pub async fn start(&self) {
        let mut job = self.job.lock().await;
        if job.as_ref().is_some_and(|j| !j.handle.is_finished()) {
            warn!(target: "auto_reply", "Scheduler already running, skipping");
            return;
        }

        let token = CancellationToken::new();
        let engine = Arc::clone(&self.engine);
        let period = self.interval.max(Duration::from_millis(1));
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(target: "auto_reply", "Scheduler started ({:?} interval)", period);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                if cancelled.is_cancelled() {
                    break;
                }
                debug!(target: "auto_reply", "Tick");
                engine.tick().await;
            }

            info!(target: "auto_reply", "Scheduler stopped");
        });

        *job = Some(RunningJob { token, handle });
    }

    /// Cancels the job and waits for an in-flight tick to finish.
    pub async fn stop(&self) {
        let Some(job) = self.job.lock().await.take() else {
            return;
        };
        job.token.cancel();
        if let Err(e) = job.handle.await {
            warn!(target: "auto_reply", "Scheduler task ended abnormally: {}", e);
        }
    }
}

impl Drop for AutoReplyScheduler {
    fn drop(&mut self) {
        if let Some(job) = self.job.get_mut().take() {
            job.token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auto_reply::AutoReplySettings;
    use crate::store::ThreadStore;
    use crate::test_support::{RecordingNotifier, at, inbound, thread};
    use soho_core::clock::FixedClock;
    use soho_core::reply::{RuleBasedTone, Tone};
    use soho_infrastructure::{InMemoryThreadRepository, PassthroughTranslator};

    async fn scheduler() -> (AutoReplyScheduler, Arc<ThreadStore>, Arc<RecordingNotifier>) {
        let mut t = thread("t1");
        t.messages = vec![inbound("t1", "m1", "Hello?", at(2025, 4, 1))];
        let clock = Arc::new(FixedClock::new(at(2025, 4, 1)));
        let store = Arc::new(
            ThreadStore::open(
                Arc::new(InMemoryThreadRepository::with_threads(vec![t])),
                clock.clone(),
            )
            .await,
        );
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = AutoReplyEngine::new(
            store.clone(),
            Arc::new(RuleBasedTone),
            Arc::new(PassthroughTranslator::new()),
            notifier.clone(),
            clock,
            AutoReplySettings {
                tone: Tone::Neutral,
                fallback_reply: "Thanks!".into(),
                agent_name: "Agent".into(),
            },
        );
        (
            AutoReplyScheduler::new(Arc::new(engine), Duration::from_secs(5)),
            store,
            notifier,
        )
    }

    async fn message_count(store: &ThreadStore) -> usize {
        store.get("t1").await.unwrap().messages.len()
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_mode_never_ticks() {
        let (scheduler, store, _) = scheduler().await;
        assert_eq!(scheduler.mode().await, ReplyMode::Manual);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(message_count(&store).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_interval() {
        let (scheduler, store, notifier) = scheduler().await;
        scheduler.set_mode(ReplyMode::Auto).await;
        assert_eq!(scheduler.mode().await, ReplyMode::Auto);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(message_count(&store).await, 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(message_count(&store).await, 2);
        assert_eq!(notifier.messages(), vec!["Auto-replied to 1 thread"]);

        // further ticks find nothing new
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(message_count(&store).await, 2);
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_further_ticks() {
        let (scheduler, store, _) = scheduler().await;
        scheduler.start().await;
        scheduler.stop().await;
        assert_eq!(scheduler.mode().await, ReplyMode::Manual);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(message_count(&store).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_manual() {
        let (scheduler, store, _) = scheduler().await;
        scheduler.set_mode(ReplyMode::Auto).await;
        scheduler.set_mode(ReplyMode::Manual).await;
        scheduler.set_mode(ReplyMode::Auto).await;

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(message_count(&store).await, 2);
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_keeps_single_job() {
        let (scheduler, store, notifier) = scheduler().await;
        scheduler.start().await;
        scheduler.start().await;

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(message_count(&store).await, 2);
        assert_eq!(notifier.messages().len(), 1);
        scheduler.stop().await;
    }
}

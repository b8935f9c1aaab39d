//! One auto-reply pass over the inbox.

use std::sync::Arc;

use tracing::{debug, info, warn};

use soho_core::clock::Clock;
use soho_core::config::AutoReplyConfig;
use soho_core::notification::Notifier;
use soho_core::reply::{Tone, ToneService, Translator};
use soho_core::thread::{Message, Thread};

use super::candidate::compute_candidate;
use super::processed::ProcessedMessages;
use crate::store::ThreadStore;

/// Settings that shape automatic replies.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoReplySettings {
    pub tone: Tone,
    pub fallback_reply: String,
    /// Sender name on automatic replies
    pub agent_name: String,
}

impl AutoReplySettings {
    pub fn from_config(config: &AutoReplyConfig, agent_name: &str) -> Self {
        Self {
            tone: config.tone,
            fallback_reply: config.fallback_reply.clone(),
            agent_name: agent_name.to_string(),
        }
    }
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Threads that received at least one automatic reply
    pub replied_threads: usize,
    pub follow_ups: usize,
    pub skipped_resolved: usize,
    pub skipped_answered: usize,
    pub skipped_processed: usize,
    /// Threads that changed between the tick snapshot and the commit
    pub superseded: usize,
}

/// What happened to one reply attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyOutcome {
    Sent { follow_up: bool },
    /// The thread was resolved or answered while the reply was being shaped.
    Superseded,
}

pub struct AutoReplyEngine {
    store: Arc<ThreadStore>,
    tone: Arc<dyn ToneService>,
    translator: Arc<dyn Translator>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    processed: ProcessedMessages,
    settings: AutoReplySettings,
}

impl AutoReplyEngine {
    pub fn new(
        store: Arc<ThreadStore>,
        tone: Arc<dyn ToneService>,
        translator: Arc<dyn Translator>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        settings: AutoReplySettings,
    ) -> Self {
        Self {
            store,
            tone,
            translator,
            notifier,
            clock,
            processed: ProcessedMessages::new(),
            settings,
        }
    }

    /// Replaces the processed-id set, e.g. to share it across engines or to
    /// start from a known state in tests.
    pub fn with_processed(mut self, processed: ProcessedMessages) -> Self {
        self.processed = processed;
        self
    }

    pub fn processed(&self) -> &ProcessedMessages {
        &self.processed
    }

    /// Runs one pass over every thread in store order.
    ///
    /// A thread that changes while its reply is being shaped is left alone;
    /// its inbound message stays unprocessed.
    pub async fn tick(&self) -> TickReport {
        let threads = self.store.get_all().await;
        let mut report = TickReport::default();

        for thread in &threads {
            if thread.is_resolved() {
                report.skipped_resolved += 1;
                continue;
            }
            let Some(inbound) = thread.awaiting_reply() else {
                report.skipped_answered += 1;
                continue;
            };
            if self.processed.contains(&inbound.id) {
                report.skipped_processed += 1;
                continue;
            }

            match self.reply_to(thread, inbound).await {
                ReplyOutcome::Sent { follow_up } => {
                    report.replied_threads += 1;
                    if follow_up {
                        report.follow_ups += 1;
                    }
                }
                ReplyOutcome::Superseded => {
                    report.superseded += 1;
                    debug!(target: "auto_reply", thread_id = %thread.id, message_id = %inbound.id, "Thread changed before reply, skipping");
                }
            }
        }

        debug!(
            target: "auto_reply",
            replied = report.replied_threads,
            follow_ups = report.follow_ups,
            skipped_resolved = report.skipped_resolved,
            skipped_answered = report.skipped_answered,
            skipped_processed = report.skipped_processed,
            superseded = report.superseded,
            "Tick complete"
        );

        if report.replied_threads > 0 {
            let noun = if report.replied_threads == 1 { "thread" } else { "threads" };
            let message = format!("Auto-replied to {} {}", report.replied_threads, noun);
            info!(target: "auto_reply", "{}", message);
            self.notifier.notify(&message);
        }

        report
    }

    /// Sends the reply to `inbound`, then the follow-up when there is one.
    ///
    /// Each message is committed against the latest thread state and only
    /// while the thread is unresolved and still ends with the message it
    /// answers.
    async fn reply_to(&self, thread: &Thread, inbound: &Message) -> ReplyOutcome {
        let now = self.clock.now();
        let candidate = compute_candidate(thread, inbound, now, &self.settings.fallback_reply);
        let text = self.shape(thread, &candidate.text).await;

        let reply = Message::outbound(
            &thread.id,
            thread.platform,
            &self.settings.agent_name,
            text,
            now,
        );
        let reply_id = reply.id.clone();
        let inbound_id = inbound.id.clone();
        let committed = self
            .store
            .patch_if(&thread.id, move |latest| {
                let unanswered = !latest.is_resolved()
                    && latest
                        .last_message()
                        .is_some_and(|m| m.id == inbound_id && m.inbound);
                unanswered.then(|| latest.with_message(reply, now))
            })
            .await;
        if committed.is_none() {
            return ReplyOutcome::Superseded;
        }
        self.processed.mark(&inbound.id);

        let Some(follow_up) = candidate.follow_up else {
            return ReplyOutcome::Sent { follow_up: false };
        };
        let text = self.shape(thread, &follow_up).await;
        let sent_at = self.clock.now();
        let message = Message::outbound(
            &thread.id,
            thread.platform,
            &self.settings.agent_name,
            text,
            sent_at,
        );
        let follow_up = self
            .store
            .patch_if(&thread.id, move |latest| {
                let current = !latest.is_resolved()
                    && latest.last_message().is_some_and(|m| m.id == reply_id);
                current.then(|| latest.with_message(message, sent_at))
            })
            .await;
        if follow_up.is_none() {
            debug!(target: "auto_reply", thread_id = %thread.id, "Thread changed before follow-up, skipping");
        }
        ReplyOutcome::Sent {
            follow_up: follow_up.is_some(),
        }
    }

    /// Applies tone, then translation. Each stage falls back to its input
    /// when the collaborator fails.
    async fn shape(&self, thread: &Thread, text: &str) -> String {
        let toned = match self
            .tone
            .apply(text, self.settings.tone, thread.guest_name())
            .await
        {
            Ok(t) => t,
            Err(e) => {
                warn!(target: "auto_reply", thread_id = %thread.id, error = %e, "Tone failed, sending untransformed text");
                text.to_string()
            }
        };

        match self
            .translator
            .translate(&toned, thread.guest_language())
            .await
        {
            Ok(t) => t,
            Err(e) => {
                warn!(target: "auto_reply", thread_id = %thread.id, error = %e, "Translation failed, sending untranslated text");
                toned
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FailingTone, FailingTranslator, RecordingNotifier, at, inbound, thread, with_promotions,
    };
    use async_trait::async_trait;
    use chrono::Duration;
    use soho_core::clock::FixedClock;
    use soho_core::error::Result;
    use soho_core::reply::RuleBasedTone;
    use soho_core::thread::ThreadStatus;
    use soho_infrastructure::{InMemoryThreadRepository, PassthroughTranslator};

    struct Harness {
        store: Arc<ThreadStore>,
        clock: Arc<FixedClock>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Harness {
        async fn new(threads: Vec<Thread>) -> Self {
            let clock = Arc::new(FixedClock::new(at(2025, 4, 1)));
            let repo = Arc::new(InMemoryThreadRepository::with_threads(threads));
            let store = Arc::new(ThreadStore::open(repo, clock.clone()).await);
            Self {
                store,
                clock,
                notifier: Arc::new(RecordingNotifier::default()),
            }
        }

        fn engine(&self, tone: Tone) -> AutoReplyEngine {
            self.engine_with(Arc::new(RuleBasedTone), Arc::new(PassthroughTranslator::new()), tone)
        }

        fn engine_with(
            &self,
            tone_service: Arc<dyn ToneService>,
            translator: Arc<dyn Translator>,
            tone: Tone,
        ) -> AutoReplyEngine {
            AutoReplyEngine::new(
                self.store.clone(),
                tone_service,
                translator,
                self.notifier.clone(),
                self.clock.clone(),
                AutoReplySettings {
                    tone,
                    fallback_reply: "Thanks, we'll be in touch.".into(),
                    agent_name: "Agent".into(),
                },
            )
        }

        async fn outbound_count(&self, id: &str) -> usize {
            let t = self.store.get(id).await.unwrap();
            t.messages.iter().filter(|m| !m.inbound).count()
        }
    }

    /// Translator that resolves the thread when asked to translate text
    /// containing `trigger`, as an operator acting mid-reply would.
    struct ResolvingTranslator {
        store: Arc<ThreadStore>,
        thread_id: &'static str,
        trigger: &'static str,
    }

    #[async_trait]
    impl Translator for ResolvingTranslator {
        async fn translate(&self, text: &str, _language: Option<&str>) -> Result<String> {
            if text.contains(self.trigger) {
                self.store
                    .patch_by_id(self.thread_id, |t| t.with_status(ThreadStatus::Resolved))
                    .await;
            }
            Ok(text.to_string())
        }
    }

    fn awaiting(id: &str) -> Thread {
        let mut t = thread(id);
        t.messages = vec![inbound(id, &format!("{id}-in"), "Is breakfast included?", at(2025, 4, 1))];
        t.ai.suggested_replies = vec!["Yes, breakfast is included.".into()];
        t
    }

    #[tokio::test]
    async fn test_second_tick_sends_nothing() {
        let h = Harness::new(vec![awaiting("t1"), awaiting("t2")]).await;
        let engine = h.engine(Tone::Neutral);

        let first = engine.tick().await;
        assert_eq!(first.replied_threads, 2);
        let second = engine.tick().await;
        assert_eq!(second.replied_threads, 0);

        assert_eq!(h.outbound_count("t1").await, 1);
        assert_eq!(h.outbound_count("t2").await, 1);
        assert_eq!(h.notifier.messages(), vec!["Auto-replied to 2 threads"]);
    }

    #[tokio::test]
    async fn test_processed_set_blocks_even_if_operator_deletes_reply() {
        let h = Harness::new(vec![awaiting("t1")]).await;
        let engine = h.engine(Tone::Neutral);
        engine.tick().await;

        let reply_id = h.store.get("t1").await.unwrap().messages[1].id.clone();
        h.store.remove_message("t1", &reply_id).await;

        assert_eq!(engine.tick().await.skipped_processed, 1);
        assert_eq!(h.outbound_count("t1").await, 0);

        engine.processed().reset();
        assert_eq!(engine.tick().await.replied_threads, 1);
    }

    #[tokio::test]
    async fn test_skips_resolved_and_answered_threads() {
        let resolved = awaiting("t1").with_status(ThreadStatus::Resolved);
        let mut answered = awaiting("t2");
        answered.messages.push(Message::outbound("t2", answered.platform, "Agent", "Hi", at(2025, 4, 1)));
        let mut empty = thread("t3");
        empty.messages.clear();

        let h = Harness::new(vec![resolved, answered, empty]).await;
        let report = h.engine(Tone::Neutral).tick().await;

        assert_eq!(report.replied_threads, 0);
        assert_eq!(report.skipped_resolved, 1);
        assert_eq!(report.skipped_answered, 2);
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_reply_uses_tone_and_suggestion() {
        let h = Harness::new(vec![awaiting("t1")]).await;
        h.engine(Tone::Formal).tick().await;

        let t = h.store.get("t1").await.unwrap();
        let reply = t.last_message().unwrap();
        assert!(!reply.inbound);
        assert_eq!(reply.sender_name, "Agent");
        assert_eq!(
            reply.text,
            format!("Dear {},\n\nYes, breakfast is included.\n\nKind regards", t.guest_name().unwrap())
        );
    }

    #[tokio::test]
    async fn test_expired_promotion_sends_reply_and_follow_up() {
        let mut t = with_promotions(thread("t8"));
        t.messages = vec![inbound("t8", "m9", "I used SPRING20 but got charged full price.", at(2025, 6, 15))];
        let h = Harness::new(vec![t]).await;
        h.clock.set(at(2025, 6, 15));
        let engine = h.engine(Tone::Neutral);

        let report = engine.tick().await;
        assert_eq!(report.replied_threads, 1);
        assert_eq!(report.follow_ups, 1);

        let t = h.store.get("t8").await.unwrap();
        assert_eq!(t.messages.len(), 3);
        assert!(t.messages[1].text.contains("expired on May 31, 2025"));
        assert!(t.messages[2].text.contains("WEEKEND10"));

        // the thread now ends with an outbound message
        h.clock.advance(Duration::seconds(5));
        assert_eq!(engine.tick().await.replied_threads, 0);
        assert_eq!(h.store.get("t8").await.unwrap().messages.len(), 3);
    }

    #[tokio::test]
    async fn test_collaborator_failures_fall_back_to_plain_text() {
        let h = Harness::new(vec![awaiting("t1")]).await;
        let engine = h.engine_with(Arc::new(FailingTone), Arc::new(FailingTranslator), Tone::Casual);

        let report = engine.tick().await;
        assert_eq!(report.replied_threads, 1);
        let t = h.store.get("t1").await.unwrap();
        assert_eq!(t.last_message().unwrap().text, "Yes, breakfast is included.");
    }

    #[tokio::test]
    async fn test_fallback_reply_without_suggestions() {
        let mut t = awaiting("t1");
        t.ai.suggested_replies.clear();
        let h = Harness::new(vec![t]).await;
        h.engine(Tone::Neutral).tick().await;

        let t = h.store.get("t1").await.unwrap();
        assert_eq!(t.last_message().unwrap().text, "Thanks, we'll be in touch.");
    }

    #[tokio::test]
    async fn test_thread_resolved_while_shaping_gets_no_reply() {
        let h = Harness::new(vec![awaiting("t1")]).await;
        let translator = Arc::new(ResolvingTranslator {
            store: h.store.clone(),
            thread_id: "t1",
            trigger: "",
        });
        let engine = h.engine_with(Arc::new(RuleBasedTone), translator, Tone::Neutral);

        let report = engine.tick().await;
        assert_eq!(report.replied_threads, 0);
        assert_eq!(report.superseded, 1);
        assert!(!engine.processed().contains("t1-in"));
        assert!(h.notifier.messages().is_empty());

        let t = h.store.get("t1").await.unwrap();
        assert!(t.is_resolved());
        assert_eq!(t.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_follow_up_skipped_when_thread_resolved_after_reply() {
        let mut t = with_promotions(thread("t8"));
        t.messages = vec![inbound("t8", "m9", "I used SPRING20 but got charged full price.", at(2025, 6, 15))];
        let h = Harness::new(vec![t]).await;
        h.clock.set(at(2025, 6, 15));
        let translator = Arc::new(ResolvingTranslator {
            store: h.store.clone(),
            thread_id: "t8",
            trigger: "WEEKEND10",
        });
        let engine = h.engine_with(Arc::new(RuleBasedTone), translator, Tone::Neutral);

        let report = engine.tick().await;
        assert_eq!(report.replied_threads, 1);
        assert_eq!(report.follow_ups, 0);
        assert!(engine.processed().contains("m9"));

        let t = h.store.get("t8").await.unwrap();
        assert!(t.is_resolved());
        assert_eq!(t.messages.len(), 2);
        assert!(t.messages[1].text.contains("expired on May 31, 2025"));
    }
}

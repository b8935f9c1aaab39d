//! Inbox use case: the query and mutation surface offered to a UI.
//!
//! Every mutation returns the refreshed full thread sequence. Unknown thread
//! or message ids are silent no-ops, and persistence failures never surface
//! here; the store keeps serving its in-memory state.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use soho_core::booking::{BookingDirectory, BookingLookup};
use soho_core::clock::Clock;
use soho_core::config::InboxConfig;
use soho_core::filter::{FilterCriteria, matches_with};
use soho_core::property::PromotionStatus;
use soho_core::sla::SlaPolicy;
use soho_core::thread::{Assignment, Attachment, Message, Thread, ThreadStatus};

use crate::auto_reply::compute_candidate;
use crate::store::ThreadStore;

/// Use case for operator actions on the inbox.
///
/// `InboxUseCase` composes the [`ThreadStore`] primitives with the filter and
/// SLA evaluators and the booking directory. It holds no state of its own
/// besides configuration.
pub struct InboxUseCase {
    store: Arc<ThreadStore>,
    bookings: Arc<dyn BookingDirectory>,
    clock: Arc<dyn Clock>,
    sla: SlaPolicy,
    /// Sender name on operator messages
    agent_name: String,
    fallback_reply: String,
}

impl InboxUseCase {
    pub fn new(
        store: Arc<ThreadStore>,
        bookings: Arc<dyn BookingDirectory>,
        clock: Arc<dyn Clock>,
        config: &InboxConfig,
    ) -> Self {
        Self {
            store,
            bookings,
            clock,
            sla: config.sla,
            agent_name: config.agent_name.clone(),
            fallback_reply: config.auto_reply.fallback_reply.clone(),
        }
    }

    pub fn store(&self) -> &Arc<ThreadStore> {
        &self.store
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// Threads matching `criteria`, in store order.
    pub async fn list_threads(&self, criteria: &FilterCriteria) -> Vec<Thread> {
        let now = self.clock.now();
        self.store
            .get_all()
            .await
            .into_iter()
            .filter(|t| matches_with(t, criteria, now, &self.sla))
            .collect()
    }

    pub async fn get_thread(&self, id: &str) -> Option<Thread> {
        self.store.get(id).await
    }

    /// Whether the thread with `id` is past its response target right now.
    pub async fn is_delayed(&self, id: &str) -> bool {
        let now = self.clock.now();
        self.store
            .get(id)
            .await
            .is_some_and(|t| self.sla.is_delayed(&t, now))
    }

    /// Sorted distinct guest locations.
    pub async fn location_options(&self) -> Vec<String> {
        let threads = self.store.get_all().await;
        threads
            .iter()
            .filter_map(|t| t.guest.as_ref()?.location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct property names.
    pub async fn hotel_options(&self) -> Vec<String> {
        let threads = self.store.get_all().await;
        threads
            .iter()
            .map(|t| t.property.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Reply options for the composer: the computed candidate for the
    /// latest guest message first, then the AI suggestions.
    pub async fn suggested_replies(&self, thread_id: &str) -> Vec<String> {
        let Some(thread) = self.store.get(thread_id).await else {
            return Vec::new();
        };

        let mut replies: Vec<String> = Vec::new();
        if let Some(inbound) = thread.last_inbound() {
            let candidate =
                compute_candidate(&thread, inbound, self.clock.now(), &self.fallback_reply);
            replies.push(candidate.text);
            replies.extend(candidate.follow_up);
        }
        for suggestion in &thread.ai.suggested_replies {
            if !suggestion.trim().is_empty() && !replies.contains(suggestion) {
                replies.push(suggestion.clone());
            }
        }
        replies
    }

    /// Bookings of the thread's guest.
    ///
    /// A failing directory yields an empty lookup.
    pub async fn find_bookings(&self, thread_id: &str) -> BookingLookup {
        let Some(name) = self
            .store
            .get(thread_id)
            .await
            .and_then(|t| t.guest_name().map(str::to_string))
        else {
            return BookingLookup::default();
        };

        match self.bookings.search_by_guest(&name).await {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!(thread_id, error = %e, "Booking lookup failed");
                BookingLookup::default()
            }
        }
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Sets (`Some`) or clears (`None`) the assignment of every listed thread.
    pub async fn assign(&self, ids: &[String], assignment: Option<Assignment>) -> Vec<Thread> {
        self.store
            .patch_many(ids, |t| t.with_assignment(assignment.clone()))
            .await
    }

    pub async fn set_status(&self, ids: &[String], status: ThreadStatus) -> Vec<Thread> {
        self.store
            .patch_many(ids, |t| t.with_status(status))
            .await
    }

    pub async fn resolve(&self, ids: &[String]) -> Vec<Thread> {
        self.set_status(ids, ThreadStatus::Resolved).await
    }

    pub async fn add_tag(&self, thread_id: &str, tag: &str) -> Vec<Thread> {
        let tag = tag.trim();
        if tag.is_empty() {
            return self.store.get_all().await;
        }
        let tag = tag.to_string();
        self.store
            .patch_by_id(thread_id, move |t| t.with_tag(&tag))
            .await
    }

    /// Removes `tag` ignoring case.
    pub async fn remove_tag(&self, thread_id: &str, tag: &str) -> Vec<Thread> {
        let tag = tag.to_string();
        self.store
            .patch_by_id(thread_id, move |t| t.without_tag(&tag))
            .await
    }

    /// Sends an operator message.
    ///
    /// `text` is trimmed. Blank text is accepted only together with at least
    /// one attachment.
    pub async fn send_message(
        &self,
        thread_id: &str,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> Vec<Thread> {
        let text = text.trim().to_string();
        if text.is_empty() && attachments.is_empty() {
            debug!(thread_id, "Empty message ignored");
            return self.store.get_all().await;
        }

        let now = self.clock.now();
        let sender = self.agent_name.clone();
        self.store
            .patch_by_id(thread_id, move |t| {
                let message = Message::outbound(t.id.clone(), t.platform, sender, text, now)
                    .with_attachments(attachments);
                t.with_message(message, now)
            })
            .await
    }

    pub async fn delete_message(&self, thread_id: &str, message_id: &str) -> Vec<Thread> {
        self.store.remove_message(thread_id, message_id).await
    }

    /// Sends the sharing text of the property's promotion `code`.
    ///
    /// Unknown codes and expired promotions are refused.
    pub async fn share_promotion(&self, thread_id: &str, code: &str) -> Vec<Thread> {
        let Some(thread) = self.store.get(thread_id).await else {
            return self.store.get_all().await;
        };
        let Some(promotion) = thread
            .property
            .promotions
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code.trim()))
        else {
            debug!(thread_id, code, "Unknown promotion code");
            return self.store.get_all().await;
        };
        if promotion.status_at(self.clock.now()) == PromotionStatus::Expired {
            debug!(thread_id, code, "Refusing to share expired promotion");
            return self.store.get_all().await;
        }

        self.send_message(thread_id, &promotion.share_text(), Vec::new())
            .await
    }
}

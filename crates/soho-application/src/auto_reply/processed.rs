use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Inbound message ids that already received an automatic reply.
///
/// Owned by the auto-reply engine for the lifetime of a session; grows
/// monotonically. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct ProcessedMessages {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl ProcessedMessages {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.lock().contains(message_id)
    }

    /// Records `message_id`; returns false if it was already recorded.
    pub fn mark(&self, message_id: &str) -> bool {
        self.lock().insert(message_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every recorded id.
    pub fn reset(&self) {
        self.lock().clear();
    }
}

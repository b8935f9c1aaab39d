//! Auto-Reply: automatic answers to unanswered guest messages.
//!
//! - `candidate`: chooses the reply text (promotion, suggestion, fallback)
//! - `engine`: one pass over the inbox with per-message de-duplication
//! - `scheduler`: the cancellable periodic job driving the engine

mod candidate;
mod engine;
mod processed;
mod scheduler;

pub use candidate::{ReplyCandidate, compute_candidate};
pub use engine::{AutoReplyEngine, AutoReplySettings, TickReport};
pub use processed::ProcessedMessages;
pub use scheduler::{AutoReplyScheduler, ReplyMode};

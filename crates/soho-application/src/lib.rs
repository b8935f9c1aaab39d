//! Application layer for the SOHO inbox.
//!
//! This crate composes the domain and infrastructure layers into the running
//! engine: the authoritative thread store, the operator-facing inbox use case
//! and the automatic reply engine with its periodic scheduler.

pub mod auto_reply;
pub mod bootstrap;
pub mod inbox_usecase;
pub mod store;

pub use auto_reply::{AutoReplyEngine, AutoReplyScheduler, AutoReplySettings, ReplyMode, TickReport};
pub use bootstrap::{Collaborators, InboxApp, build_repository};
pub use inbox_usecase::InboxUseCase;
pub use store::ThreadStore;

//! Thread domain module.
//!
//! This module contains the conversation model (threads, messages, guests,
//! AI metadata), the persistence contract and the normalization step applied
//! when a thread enters the store.
//!
//! # Module Structure
//!
//! - `model`: Core thread entity (`Thread`) and its enumerations
//! - `message`: Inbound/outbound utterances (`Message`, `Attachment`)
//! - `guest`: Guest profile (`Guest`, `CustomerType`)
//! - `ai`: Assistive metadata (`AiMeta`, `Sentiment`)
//! - `repository`: Persistence collaborator trait
//! - `normalize`: Canonicalization of incoming threads

mod ai;
mod guest;
mod message;
mod model;
mod normalize;
mod repository;

pub use ai::{AiMeta, Sentiment};
pub use guest::{CustomerType, Guest};
pub use message::{Attachment, AttachmentKind, Message};
pub use model::{Assignment, InboxSnapshot, Platform, Priority, Thread, ThreadStatus};
pub use normalize::{infer_guest, normalize_thread, slugify};
pub use repository::ThreadRepository;

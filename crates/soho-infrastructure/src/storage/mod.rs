//! Persistence backends for the inbox.
//!
//! Every backend implements [`ThreadRepository`](soho_core::thread::ThreadRepository);
//! the engine behaves identically regardless of which one is wired in.

mod json_file;
mod memory;
mod remote;

pub use json_file::JsonFileThreadRepository;
pub use memory::InMemoryThreadRepository;
pub use remote::RemoteThreadRepository;

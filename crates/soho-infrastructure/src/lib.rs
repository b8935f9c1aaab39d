pub mod booking_directory;
pub mod config_loader;
pub mod dto;
pub mod migration;
pub mod notification;
pub mod paths;
pub mod seed;
pub mod storage;
pub mod translation;

pub use crate::booking_directory::InMemoryBookingDirectory;
pub use crate::notification::{ChannelNotifier, TracingNotifier};
pub use crate::paths::SohoPaths;
pub use crate::storage::{InMemoryThreadRepository, JsonFileThreadRepository, RemoteThreadRepository};
pub use crate::translation::PassthroughTranslator;

use async_trait::async_trait;
use tokio::sync::RwLock;

use soho_core::error::Result;
use soho_core::thread::{Thread, ThreadRepository};

/// Volatile repository; data lives as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryThreadRepository {
    threads: RwLock<Option<Vec<Thread>>>,
}

impl InMemoryThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `threads`.
    pub fn with_threads(threads: Vec<Thread>) -> Self {
        Self {
            threads: RwLock::new(Some(threads)),
        }
    }
}

#[async_trait]
impl ThreadRepository for InMemoryThreadRepository {
    async fn load(&self) -> Result<Option<Vec<Thread>>> {
        Ok(self.threads.read().await.clone())
    }

    async fn save(&self, threads: &[Thread]) -> Result<()> {
        *self.threads.write().await = Some(threads.to_vec());
        Ok(())
    }
}

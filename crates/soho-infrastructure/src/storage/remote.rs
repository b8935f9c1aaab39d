//! Remote HTTP repository.
//!
//! A thin transport over an inbox API:
//! - `GET  {api_base}/threads` returns every thread
//! - `PUT  {api_base}/threads/{id}` replaces one thread

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use soho_core::error::{Result, SohoError};
use soho_core::thread::{Thread, ThreadRepository};

use crate::dto::ThreadV2_0_0;
use crate::migration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RemoteThreadRepository {
    client: Client,
    api_base: String,
}

impl RemoteThreadRepository {
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport_error)?;
        Ok(Self::with_client(client, api_base))
    }

    pub fn with_client(client: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }

    fn threads_url(&self) -> String {
        format!("{}/threads", self.api_base)
    }

    fn thread_url(&self, id: &str) -> String {
        format!("{}/threads/{}", self.api_base, id)
    }

    async fn put_thread(&self, thread: &Thread) -> Result<()> {
        let body = ThreadV2_0_0::from(thread);
        self.client
            .put(self.thread_url(&thread.id))
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport_error)?;
        debug!(target: "persistence", thread_id = %thread.id, "PUT thread");
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> SohoError {
    SohoError::persistence(format!("Remote inbox request failed: {}", err))
}

#[async_trait]
impl ThreadRepository for RemoteThreadRepository {
    async fn load(&self) -> Result<Option<Vec<Thread>>> {
        let raw: serde_json::Value = self
            .client
            .get(self.threads_url())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        let from_version = migration::detect_version(&raw);
        let (snapshot, _) = migration::migrate(raw, &from_version)?;
        debug!(target: "persistence", threads = snapshot.threads.len(), "GET threads");
        Ok(Some(snapshot.threads))
    }

    async fn save(&self, threads: &[Thread]) -> Result<()> {
        for thread in threads {
            self.put_thread(thread).await?;
        }
        Ok(())
    }

    async fn save_changed(&self, changed: &[Thread], _all: &[Thread]) -> Result<()> {
        self.save(changed).await
    }
}

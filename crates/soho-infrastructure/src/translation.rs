//! Placeholder translation collaborator.

use async_trait::async_trait;
use std::time::Duration;

use soho_core::error::Result;
use soho_core::reply::{Translator, needs_translation};

/// Returns text unchanged, optionally simulating API latency for
/// non-English targets.
#[derive(Debug, Clone, Default)]
pub struct PassthroughTranslator {
    latency: Option<Duration>,
}

impl PassthroughTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }
}

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, language: Option<&str>) -> Result<String> {
        if needs_translation(language) {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
        }
        Ok(text.to_string())
    }
}

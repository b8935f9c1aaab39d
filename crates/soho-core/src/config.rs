use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::reply::Tone;
use crate::sla::SlaPolicy;

/// Environment variable that overrides `storage.api_base`.
pub const API_BASE_ENV: &str = "SOHO_API_BASE";

pub const DEFAULT_FALLBACK_REPLY: &str =
    "Thanks for your message! A member of our team will get back to you shortly.";

/// Root of the inbox configuration file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InboxConfig {
    pub auto_reply: AutoReplyConfig,
    pub sla: SlaPolicy,
    pub storage: StorageConfig,
    /// Sender name on outbound messages
    pub agent_name: String,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            auto_reply: AutoReplyConfig::default(),
            sla: SlaPolicy::default(),
            storage: StorageConfig::default(),
            agent_name: "Agent".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AutoReplyConfig {
    pub interval_secs: u64,
    pub tone: Tone,
    /// Used when a thread has no suggested replies
    pub fallback_reply: String,
    pub start_enabled: bool,
}

impl Default for AutoReplyConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            tone: Tone::Neutral,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            start_enabled: false,
        }
    }
}

#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Remote,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Snapshot file; resolved under the data directory when absent
    pub path: Option<String>,
    pub api_base: Option<String>,
}

impl StorageConfig {
    /// `api_base` with the environment override applied.
    ///
    /// Blank values count as unset.
    pub fn resolved_api_base(&self, env_override: Option<String>) -> Option<String> {
        env_override
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base.clone().filter(|v| !v.trim().is_empty()))
            .map(|v| v.trim().trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: InboxConfig = toml::from_str("").unwrap();
        assert_eq!(config, InboxConfig::default());
        assert_eq!(config.auto_reply.interval_secs, 5);
        assert_eq!(config.sla.negative_minutes, 15);
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn test_partial_toml() {
        let config: InboxConfig = toml::from_str(
            r#"
            agent_name = "Front Desk"

            [auto_reply]
            tone = "formal"
            start_enabled = true

            [sla]
            negative_minutes = 10

            [storage]
            backend = "remote"
            api_base = "https://api.example.com/"
            "#,
        )
        .unwrap();

        assert_eq!(config.agent_name, "Front Desk");
        assert_eq!(config.auto_reply.tone, Tone::Formal);
        assert_eq!(config.auto_reply.interval_secs, 5);
        assert_eq!(config.sla.negative_minutes, 10);
        assert_eq!(config.sla.default_minutes, 30);
        assert_eq!(
            config.storage.resolved_api_base(None).as_deref(),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn test_env_override_wins() {
        let storage = StorageConfig {
            api_base: Some("https://a".into()),
            ..Default::default()
        };
        assert_eq!(
            storage.resolved_api_base(Some("https://b".into())).as_deref(),
            Some("https://b")
        );
        assert_eq!(
            storage.resolved_api_base(Some(" ".into())).as_deref(),
            Some("https://a")
        );
    }
}

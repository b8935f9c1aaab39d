//! Assistive metadata attached to a thread.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Sentiment classification of a conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Derived metadata: summary, sentiment, tags and suggested replies.
///
/// Tags have set semantics with insertion order preserved. Insertion compares
/// case-sensitively; removal compares case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMeta {
    #[serde(default)]
    pub summary: String,
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub suggested_replies: Vec<String>,
}

impl AiMeta {
    pub fn new(sentiment: Sentiment) -> Self {
        Self {
            summary: String::new(),
            sentiment,
            emotion: None,
            tags: Vec::new(),
            suggested_replies: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
        self
    }

    pub fn without_tag(mut self, tag: &str) -> Self {
        let needle = tag.to_lowercase();
        self.tags.retain(|t| t.to_lowercase() != needle);
        self
    }

    /// Collapses duplicate tags, keeping the first occurrence.
    pub fn dedup_tags(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.tags.retain(|t| seen.insert(t.clone()));
        self
    }

    pub fn first_suggestion(&self) -> Option<&str> {
        self.suggested_replies.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_tag_twice_keeps_one() {
        let ai = AiMeta::new(Sentiment::Neutral).with_tag("VIP").with_tag("VIP");
        assert_eq!(ai.tags, vec!["VIP".to_string()]);
    }

    #[test]
    fn test_tag_insertion_is_case_sensitive() {
        let ai = AiMeta::new(Sentiment::Neutral).with_tag("VIP").with_tag("vip");
        assert_eq!(ai.tags.len(), 2);
    }

    #[test]
    fn test_remove_tag_ignores_case() {
        let ai = AiMeta::new(Sentiment::Neutral)
            .with_tag("VIP")
            .with_tag("refund")
            .without_tag("vip");
        assert_eq!(ai.tags, vec!["refund".to_string()]);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let mut ai = AiMeta::new(Sentiment::Positive);
        ai.tags = vec!["b".into(), "a".into(), "b".into(), "c".into(), "a".into()];
        assert_eq!(ai.dedup_tags().tags, vec!["b", "a", "c"]);
    }
}

use async_trait::async_trait;

use crate::error::Result;

/// Translation collaborator.
///
/// Implementations must return `text` unchanged for an English-family tag or
/// no tag at all; observable behavior is otherwise limited to latency.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, language: Option<&str>) -> Result<String>;
}

/// Returns true for `en` and any `en-*` tag, ignoring case.
pub fn is_english_tag(tag: &str) -> bool {
    let tag = tag.trim();
    tag.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("en"))
        && matches!(tag.as_bytes().get(2), None | Some(b'-'))
}

/// Returns true when `language` requires a translation call.
pub fn needs_translation(language: Option<&str>) -> bool {
    language.is_some_and(|tag| !tag.trim().is_empty() && !is_english_tag(tag))
}

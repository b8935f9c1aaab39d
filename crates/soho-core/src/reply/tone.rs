//! Reply tone transforms.
//!
//! Each tone is a deterministic text rewrite:
//! - `neutral` returns the text unchanged
//! - `casual` contracts common phrases and wraps the text in a friendly
//!   greeting and sign-off
//! - `formal` opens with a salutation to the guest and ends with a polite
//!   closing

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Neutral,
    Casual,
    Formal,
}

/// Tone collaborator.
#[async_trait]
pub trait ToneService: Send + Sync {
    async fn apply(&self, text: &str, tone: Tone, guest_name: Option<&str>) -> Result<String>;
}

/// [`ToneService`] backed by [`apply_tone`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedTone;

#[async_trait]
impl ToneService for RuleBasedTone {
    async fn apply(&self, text: &str, tone: Tone, guest_name: Option<&str>) -> Result<String> {
        Ok(apply_tone(text, tone, guest_name))
    }
}

const CONTRACTIONS: &[(&str, &str)] = &[
    ("I am", "I'm"),
    ("we are", "we're"),
    ("you are", "you're"),
    ("it is", "it's"),
    ("we will", "we'll"),
    ("I will", "I'll"),
    ("do not", "don't"),
    ("does not", "doesn't"),
    ("cannot", "can't"),
    ("will not", "won't"),
    ("thank you", "thanks"),
];

static CONTRACTION_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    CONTRACTIONS
        .iter()
        .filter_map(|(from, to)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(from).replace(' ', r"\s+"));
            Regex::new(&pattern).ok().map(|re| (re, *to))
        })
        .collect()
});

/// Rewrites `text` in the given tone.
pub fn apply_tone(text: &str, tone: Tone, guest_name: Option<&str>) -> String {
    let text = text.trim();
    let name = guest_name.map(str::trim).filter(|n| !n.is_empty());
    match tone {
        Tone::Neutral => text.to_string(),
        Tone::Casual => {
            let greeting = match name {
                Some(n) => format!("Hey {n}!"),
                None => "Hey there!".to_string(),
            };
            format!("{greeting} {} Cheers!", contract(text))
        }
        Tone::Formal => {
            let salutation = format!("Dear {},", name.unwrap_or("Guest"));
            format!("{salutation}\n\n{text}\n\nKind regards")
        }
    }
}

fn contract(text: &str) -> String {
    CONTRACTION_RULES
        .iter()
        .fold(text.to_string(), |acc, (re, to)| {
            re.replace_all(&acc, |caps: &Captures| match_case(&caps[0], to))
                .into_owned()
        })
}

/// Capitalizes `replacement` when `original` starts with an uppercase letter.
fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if starts_upper => first.to_uppercase().chain(chars).collect(),
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_identity() {
        let text = "We are looking into it.";
        assert_eq!(apply_tone(text, Tone::Neutral, Some("Ana")), text);
    }

    #[test]
    fn test_casual_contracts_and_greets() {
        let out = apply_tone(
            "Thank you for the note. We are sorry and we will fix it.",
            Tone::Casual,
            Some("Ana"),
        );
        assert_eq!(out, "Hey Ana! Thanks for the note. We're sorry and we'll fix it. Cheers!");
    }

    #[test]
    fn test_casual_without_name() {
        assert!(apply_tone("Hi", Tone::Casual, None).starts_with("Hey there!"));
        assert!(apply_tone("Hi", Tone::Casual, Some("  ")).starts_with("Hey there!"));
    }

    #[test]
    fn test_formal_salutation_and_closing() {
        let out = apply_tone("Your room is ready.", Tone::Formal, Some("Mr. Rao"));
        assert_eq!(out, "Dear Mr. Rao,\n\nYour room is ready.\n\nKind regards");
        assert!(apply_tone("x", Tone::Formal, None).starts_with("Dear Guest,"));
    }

    #[test]
    fn test_tone_parse() {
        assert_eq!("Formal".parse::<Tone>().unwrap(), Tone::Formal);
        assert_eq!(Tone::default(), Tone::Neutral);
    }

    #[tokio::test]
    async fn test_rule_based_service() {
        let out = RuleBasedTone
            .apply("I am here", Tone::Casual, Some("Lee"))
            .await
            .unwrap();
        assert_eq!(out, "Hey Lee! I'm here Cheers!");
    }
}

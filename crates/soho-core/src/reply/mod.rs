//! Reply shaping collaborators: tone and translation.

pub mod tone;
pub mod translation;

pub use tone::{RuleBasedTone, Tone, ToneService, apply_tone};
pub use translation::{Translator, is_english_tag, needs_translation};

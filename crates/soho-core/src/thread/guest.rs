//! Guest profile.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Loyalty classification of a guest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CustomerType {
    #[default]
    Regular,
    Member,
    Vip,
}

/// The human participant on the guest side of a thread.
///
/// Owned by exactly one thread; two threads with the "same" guest carry
/// independent copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub name: String,
    /// Handle on the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// City, country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Language tag, e.g. `en-IN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub customer_type: CustomerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// ISO date of the last stay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_stayed: Option<String>,
}

impl Guest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: None,
            avatar_url: None,
            location: None,
            language: None,
            customer_type: CustomerType::default(),
            email: None,
            phone: None,
            last_stayed: None,
        }
    }
}

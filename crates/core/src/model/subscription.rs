use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown subscription tier: {raw}")]
pub struct ParseTierError {
    raw: String,
}

/// Subscription level persisted as the app's single preference flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
        }
    }

    #[must_use]
    pub fn is_premium(self) -> bool {
        matches!(self, SubscriptionTier::Premium)
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" => Ok(SubscriptionTier::Free),
            "premium" => Ok(SubscriptionTier::Premium),
            other => Err(ParseTierError {
                raw: other.to_string(),
            }),
        }
    }
}

//! Membership tier definitions.
//!
//! A tier is either granted locally (every customer starts on `Free`) or
//! declared by a Stripe product through its `membership` metadata key.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Product metadata key that declares which tier a product grants.
pub const MEMBERSHIP_METADATA_KEY: &str = "membership";

/// Membership subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    /// Default tier for every customer without an active paid subscription.
    #[default]
    Free,

    /// Paid tier.
    Pro,
}

impl MembershipTier {
    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, MembershipTier::Free)
    }

    /// Returns the wire name for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Free => "free",
            MembershipTier::Pro => "pro",
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Case-sensitive: product metadata must be exactly `free` or `pro`.
impl FromStr for MembershipTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(MembershipTier::Free),
            "pro" => Ok(MembershipTier::Pro),
            other => Err(ValidationError::invalid_format(
                MEMBERSHIP_METADATA_KEY,
                format!("expected 'free' or 'pro', got '{}'", other),
            )),
        }
    }
}

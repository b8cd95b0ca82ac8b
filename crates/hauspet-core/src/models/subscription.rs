//! Subscription plans and their pet limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Basic,
    Premium,
    Family,
}

impl SubscriptionPlan {
    /// Maximum number of pets the plan allows.
    pub const fn max_pets(self) -> usize {
        match self {
            Self::Basic => 1,
            Self::Premium => 3,
            Self::Family => 10,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Family => "family",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            "family" => Ok(Self::Family),
            other => Err(format!(
                "unknown plan '{other}' (expected basic, premium or family)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_limits() {
        assert_eq!(SubscriptionPlan::Basic.max_pets(), 1);
        assert_eq!(SubscriptionPlan::Premium.max_pets(), 3);
        assert_eq!(SubscriptionPlan::Family.max_pets(), 10);
    }

    #[test]
    fn plan_parses_case_insensitively() {
        assert_eq!(
            " Premium ".parse::<SubscriptionPlan>(),
            Ok(SubscriptionPlan::Premium)
        );
        assert!("gold".parse::<SubscriptionPlan>().is_err());
    }
}

//! Duplicate-match strictness policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which fields participate in duplicate equality, and at what granularity.
///
/// | Policy   | Title                  | Date granularity        | Location               |
/// |----------|------------------------|-------------------------|------------------------|
/// | Loose    | case-insensitive exact | calendar day only       | ignored                |
/// | Moderate | case-insensitive exact | date+time, ±60s         | ignored                |
/// | Strict   | case-insensitive exact | date+time, ±60s         | case-insensitive exact |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    Loose,
    #[default]
    Moderate,
    Strict,
}

impl MatchPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Loose => "loose",
            MatchPolicy::Moderate => "moderate",
            MatchPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" => Ok(MatchPolicy::Loose),
            "moderate" => Ok(MatchPolicy::Moderate),
            "strict" => Ok(MatchPolicy::Strict),
            other => Err(format!(
                "Unknown match policy '{}'. Expected loose, moderate or strict",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_names() {
        assert_eq!("loose".parse::<MatchPolicy>().unwrap(), MatchPolicy::Loose);
        assert_eq!("STRICT".parse::<MatchPolicy>().unwrap(), MatchPolicy::Strict);
        assert_eq!(
            " Moderate ".parse::<MatchPolicy>().unwrap(),
            MatchPolicy::Moderate
        );
        assert!("fuzzy".parse::<MatchPolicy>().is_err());
    }

    #[test]
    fn test_default_is_moderate() {
        assert_eq!(MatchPolicy::default(), MatchPolicy::Moderate);
    }
}

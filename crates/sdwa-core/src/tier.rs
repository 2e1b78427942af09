//! # Notification Tiers and Severity Levels
//!
//! [`Tier`] is the public-notification urgency class a violation falls
//! under: Tier 1 (acute, 24 hours), Tier 2 (30 days), Tier 3 (annual).
//! [`SeverityLevel`] is the qualitative label used to prioritize the
//! response to a violated parameter.
//!
//! Both enums are ordered so that "worse" compares greater:
//!
//! ```text
//! Tier3 < Tier2 < Tier1
//! Moderate < High < Critical
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Public-notification tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Acute risk; notice required within 24 hours.
    #[serde(rename = "Tier 1", alias = "tier1", alias = "tier_1", alias = "Tier1")]
    Tier1,
    /// Non-acute risk; notice required within 30 days.
    #[serde(rename = "Tier 2", alias = "tier2", alias = "tier_2", alias = "Tier2")]
    Tier2,
    /// Monitoring/reporting lapses; notice within one year.
    #[serde(rename = "Tier 3", alias = "tier3", alias = "tier_3", alias = "Tier3")]
    Tier3,
}

impl Tier {
    /// All tiers, most urgent first.
    pub fn all() -> &'static [Tier] {
        &[Self::Tier1, Self::Tier2, Self::Tier3]
    }

    /// Human-readable label, e.g. `Tier 1`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
        }
    }

    /// The tier number (1, 2 or 3).
    pub fn number(&self) -> u8 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
        }
    }

    /// Urgency rank; higher is more urgent.
    fn urgency(self) -> u8 {
        4 - self.number()
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.urgency().cmp(&other.urgency())
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ValidationError;

    /// Accepts `Tier 1`, `tier1`, `tier_1`, `Tier1`, or a bare `1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect();
        match compact.trim_start_matches("tier") {
            "1" => Ok(Self::Tier1),
            "2" => Ok(Self::Tier2),
            "3" => Ok(Self::Tier3),
            _ => Err(ValidationError::InvalidTier(s.to_string())),
        }
    }
}

/// Qualitative severity of a violated parameter.
///
/// Absence from a severity map means "compliant"; there is deliberately no
/// `Low` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityLevel {
    /// Exceeds the limit but below the parameter's high threshold.
    Moderate,
    /// Exceeds the parameter's high threshold.
    High,
    /// Zero-tolerance contaminant detected; immediate public health risk.
    Critical,
}

impl SeverityLevel {
    /// Uppercase label, e.g. `CRITICAL`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MODERATE" => Ok(Self::Moderate),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ValidationError::InvalidSeverity(s.to_string())),
        }
    }
}

//! # System Identity Header
//!
//! The identity of the public water system an analysis is about. It is
//! rendered at the top of every notice and copied into the federal report.
//! Detection never looks at it.

use serde::{Deserialize, Serialize};

/// Where a [`SystemHeader`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Live regulatory system lookup.
    Api,
    /// A previously saved system record.
    Cached,
    /// Caller-supplied placeholder after a failed or skipped lookup.
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Cached => "cached",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a public water system.
///
/// `identifier` is deliberately a plain string rather than a validated
/// PWSID: a lookup may echo back whatever the regulator stores, and the
/// header must still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemHeader {
    pub system_name: String,
    pub identifier: String,
    #[serde(default)]
    pub population_served: Option<u64>,
    #[serde(default = "unknown")]
    pub system_type: String,
    #[serde(default = "unknown")]
    pub location: String,
    #[serde(default = "fallback_source")]
    pub data_source: DataSource,
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn fallback_source() -> DataSource {
    DataSource::Fallback
}

impl SystemHeader {
    /// Placeholder used when no system record is available.
    pub fn placeholder(identifier: impl Into<String>) -> Self {
        Self {
            system_name: "Unknown Water System".to_string(),
            identifier: identifier.into(),
            population_served: None,
            system_type: unknown(),
            location: unknown(),
            data_source: DataSource::Fallback,
        }
    }

    /// `Name (PWSID: ID)`, the first line of every notice.
    pub fn header_line(&self) -> String {
        format!("{} (PWSID: {})", self.system_name, self.identifier)
    }

    /// Population rendered with thousands separators, or `Unknown`.
    pub fn population_display(&self) -> String {
        match self.population_served {
            Some(n) => group_thousands(n),
            None => unknown(),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_line() {
        let mut h = SystemHeader::placeholder("OH7700001");
        h.system_name = "Springfield Municipal Water District".to_string();
        assert_eq!(
            h.header_line(),
            "Springfield Municipal Water District (PWSID: OH7700001)"
        );
    }

    #[test]
    fn test_placeholder_is_fallback() {
        let h = SystemHeader::placeholder("OH7700001");
        assert_eq!(h.data_source, DataSource::Fallback);
        assert_eq!(h.population_served, None);
        assert_eq!(h.population_display(), "Unknown");
    }

    #[test]
    fn test_population_grouping() {
        let mut h = SystemHeader::placeholder("X");
        for (n, s) in [(0, "0"), (250, "250"), (1000, "1,000"), (1234567, "1,234,567")] {
            h.population_served = Some(n);
            assert_eq!(h.population_display(), s);
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let h: SystemHeader = serde_yaml::from_str(
            "system_name: Clinton Machine PWS\nidentifier: OH7700001\npopulation_served: 250\n",
        )
        .unwrap();
        assert_eq!(h.population_served, Some(250));
        assert_eq!(h.system_type, "Unknown");
        assert_eq!(h.data_source, DataSource::Fallback);
    }

    #[test]
    fn test_data_source_serde() {
        assert_eq!(serde_json::to_string(&DataSource::Cached).unwrap(), "\"cached\"");
    }
}

//! # Identity Newtypes
//!
//! Public Water System Identification Number ([`Pwsid`]): a two-letter
//! primacy-agency code followed by seven digits, e.g. `OH7700001`.
//!
//! ## Validation
//!
//! The constructor trims surrounding whitespace and uppercases the
//! agency code before validating, so `" oh7700001 "` is accepted and stored
//! as `OH7700001`. Anything else is rejected with
//! [`ValidationError::InvalidPwsid`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated Public Water System Identification Number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pwsid(String);

impl<'de> Deserialize<'de> for Pwsid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Pwsid {
    /// Create a PWSID, validating the `^[A-Z]{2}[0-9]{7}$` format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPwsid`] if the normalized value
    /// is not exactly two ASCII letters followed by seven ASCII digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();
        if Self::is_well_formed(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::InvalidPwsid(raw))
        }
    }

    /// Check the format without constructing. Case-sensitive: the agency
    /// code must already be uppercase.
    pub fn is_well_formed(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 9
            && bytes[..2].iter().all(u8::is_ascii_uppercase)
            && bytes[2..].iter().all(u8::is_ascii_digit)
    }

    /// Access the PWSID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-letter primacy agency (usually the state) code.
    pub fn agency_code(&self) -> &str {
        &self.0[..2]
    }
}

impl std::fmt::Display for Pwsid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Pwsid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

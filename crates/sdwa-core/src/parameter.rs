//! # Parameters — Canonical Contaminant Names
//!
//! Laboratory exports, SDWIS extracts, and hand-typed spreadsheets all spell
//! the same contaminant differently (`E.coli`, `E. coli`, `ECOLI`, `3014`).
//! [`Parameter`] normalizes every known spelling, including SDWIS
//! contaminant codes, to one canonical name at construction time. Names
//! that match no alias are kept verbatim (trimmed); whether they are
//! regulated is decided later by the limit table, not here.
//!
//! | Canonical | Accepted aliases (case-insensitive) |
//! |-----------|-------------------------------------|
//! | `E.coli` | `e. coli`, `ecoli`, `escherichia coli`, `3014` |
//! | `Total Coliform` | `coliform`, `total coliforms`, `tcr`, `3100` |
//! | `Lead` | `pb`, `pb90` |
//! | `Copper` | `cu`, `cu90` |
//! | `PFOA` | `perfluorooctanoic acid` |
//! | `PFOS` | `perfluorooctane sulfonic acid` |
//! | `Nitrate` | `no3`, `nitrate-n`, `1040` |
//! | `Arsenic` | `as`, `1005` |
//! | `TTHM` | `total trihalomethanes`, `2950` |

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Canonical parameter names.
pub mod names {
    pub const E_COLI: &str = "E.coli";
    pub const TOTAL_COLIFORM: &str = "Total Coliform";
    pub const LEAD: &str = "Lead";
    pub const COPPER: &str = "Copper";
    pub const PFOA: &str = "PFOA";
    pub const PFOS: &str = "PFOS";
    pub const NITRATE: &str = "Nitrate";
    pub const ARSENIC: &str = "Arsenic";
    pub const TTHM: &str = "TTHM";
}

/// Lowercased alias → canonical name.
const ALIASES: &[(&str, &str)] = &[
    ("e.coli", names::E_COLI),
    ("e. coli", names::E_COLI),
    ("ecoli", names::E_COLI),
    ("e coli", names::E_COLI),
    ("escherichia coli", names::E_COLI),
    ("3014", names::E_COLI),
    ("total coliform", names::TOTAL_COLIFORM),
    ("total coliforms", names::TOTAL_COLIFORM),
    ("coliform", names::TOTAL_COLIFORM),
    ("tcr", names::TOTAL_COLIFORM),
    ("3100", names::TOTAL_COLIFORM),
    ("lead", names::LEAD),
    ("pb", names::LEAD),
    ("pb90", names::LEAD),
    ("copper", names::COPPER),
    ("cu", names::COPPER),
    ("cu90", names::COPPER),
    ("pfoa", names::PFOA),
    ("perfluorooctanoic acid", names::PFOA),
    ("pfos", names::PFOS),
    ("perfluorooctane sulfonic acid", names::PFOS),
    ("nitrate", names::NITRATE),
    ("nitrate-n", names::NITRATE),
    ("no3", names::NITRATE),
    ("1040", names::NITRATE),
    ("arsenic", names::ARSENIC),
    ("as", names::ARSENIC),
    ("1005", names::ARSENIC),
    ("tthm", names::TTHM),
    ("total trihalomethanes", names::TTHM),
    ("2950", names::TTHM),
];

/// A contaminant parameter name, normalized to its canonical spelling.
///
/// Ordering is lexicographic on the canonical name, so maps keyed by
/// `Parameter` iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Parameter(String);

impl<'de> Deserialize<'de> for Parameter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Parameter {
    /// Normalize a raw parameter name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyParameter`] if the name is blank.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyParameter);
        }
        Ok(Self(
            canonical_name(trimmed)
                .map(str::to_string)
                .unwrap_or_else(|| trimmed.to_string()),
        ))
    }

    /// Construct from a name known to be canonical (e.g. [`names::LEAD`]).
    pub fn from_static(name: &'static str) -> Self {
        Self(name.to_string())
    }

    /// Access the canonical name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name resolved to one of the built-in canonical names.
    pub fn is_well_known(&self) -> bool {
        ALIASES.iter().any(|(_, canonical)| *canonical == self.0)
    }
}

/// Resolve a trimmed name to its canonical spelling, if it is a known alias.
fn canonical_name(trimmed: &str) -> Option<&'static str> {
    let lower = trimmed.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, canonical)| *canonical)
}

impl Borrow<str> for Parameter {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Parameter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

//! # Regulatory Pack Loading
//!
//! A [`RegulatoryPack`] bundles the limit table and the requirement table.
//! It starts from [`RegulatoryPack::epa_default`] or from an empty pack,
//! then a YAML [`PackFile`] layers entries on top:
//!
//! ```yaml
//! base: epa            # or `empty`
//! limits:
//!   - parameter: Chlorite
//!     limit_value: 1.0
//!     kind: mcl
//!     tier: Tier 2
//!     unit: mg/L
//! requirements:
//!   - tier: Tier 2
//!     deadline: 30 days
//!     media_channels: [Public Notice, Newspaper, Website]
//! thresholds:
//!   Copper: 1.75
//! ```
//!
//! Order of application: base, then `limits` (insert or replace by
//! parameter), then `requirements` (by tier), then `thresholds` (which
//! must name a parameter that has a limit by then). The result is
//! validated; any error rejects the whole pack.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sdwa_core::{content_digest, ContentDigest, Parameter, SdwaError};

use crate::epa;
use crate::error::{PackError, PackResult};
use crate::limits::{LimitTable, RegulatoryLimit};
use crate::requirements::{NotificationRequirement, RequirementTable};
use crate::validation::validate_pack;

/// Starting point for a pack file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackBase {
    /// Start from the built-in EPA tables.
    #[default]
    Epa,
    /// Start from nothing.
    Empty,
}

/// On-disk pack file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackFile {
    #[serde(default)]
    pub base: PackBase,
    #[serde(default)]
    pub limits: Vec<RegulatoryLimit>,
    #[serde(default)]
    pub requirements: Vec<NotificationRequirement>,
    /// Parameter name → high threshold.
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
}

/// The regulatory configuration an analysis runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryPack {
    pub limits: LimitTable,
    pub requirements: RequirementTable,
}

impl Default for RegulatoryPack {
    fn default() -> Self {
        Self::epa_default()
    }
}

impl RegulatoryPack {
    /// The built-in EPA pack.
    pub fn epa_default() -> Self {
        Self {
            limits: epa::epa_limits(),
            requirements: epa::epa_requirements(),
        }
    }

    /// A pack with no entries.
    pub fn empty() -> Self {
        Self {
            limits: LimitTable::new(),
            requirements: RequirementTable::new(),
        }
    }

    /// Build a pack from a parsed pack file and validate it.
    ///
    /// # Errors
    ///
    /// [`PackError::UnknownParameter`] for a threshold naming an
    /// unregulated parameter, [`PackError::Invalid`] if the assembled pack
    /// fails validation.
    pub fn from_file(file: PackFile) -> PackResult<Self> {
        let mut pack = match file.base {
            PackBase::Epa => Self::epa_default(),
            PackBase::Empty => Self::empty(),
        };

        for limit in file.limits {
            if let Some(previous) = pack.limits.insert(limit) {
                tracing::debug!(parameter = %previous.parameter, "pack overrides limit");
            }
        }
        for requirement in file.requirements {
            if let Some(previous) = pack.requirements.insert(requirement) {
                tracing::debug!(tier = %previous.tier, "pack overrides requirement");
            }
        }
        for (name, threshold) in file.thresholds {
            let parameter = Parameter::new(&name)?;
            let limit = pack
                .limits
                .get_mut(parameter.as_str())
                .ok_or_else(|| PackError::UnknownParameter(name.clone()))?;
            tracing::debug!(%parameter, threshold, "pack overrides high threshold");
            limit.high_threshold = Some(threshold);
        }

        pack.validated()
    }

    /// Parse and build a pack from YAML text.
    pub fn from_yaml_str(yaml: &str) -> PackResult<Self> {
        let file: PackFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    /// Load a pack from a YAML file.
    pub fn load(path: &Path) -> PackResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pack = Self::from_yaml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            limits = pack.limits.len(),
            requirements = pack.requirements.len(),
            "loaded regulatory pack"
        );
        Ok(pack)
    }

    /// Validate, logging warnings and rejecting on any error.
    pub fn validated(self) -> PackResult<Self> {
        let result = validate_pack(&self);
        for warning in &result.warnings {
            tracing::warn!(warning = %warning, "regulatory pack warning");
        }
        if result.is_valid {
            Ok(self)
        } else {
            Err(PackError::Invalid(result.errors))
        }
    }

    /// Content digest of the pack, for recording which configuration an
    /// analysis ran against.
    pub fn digest(&self) -> Result<ContentDigest, SdwaError> {
        content_digest(self)
    }
}

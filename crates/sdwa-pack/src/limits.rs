//! # Regulatory Limits
//!
//! One [`RegulatoryLimit`] per regulated parameter. The [`LimitTable`] is
//! keyed by canonical [`Parameter`] and iterates in name order.
//!
//! A limit of zero means "zero tolerance": the parameter is evaluated by
//! presence/absence, never by ratio. [`RegulatoryLimit::is_zero_tolerance`]
//! treats a zero limit as zero tolerance even if `kind` says otherwise, so
//! the detector can never divide by zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sdwa_core::{Parameter, SeverityLevel, Tier};

/// Severity threshold used when a limit declares none: a worst-case
/// exceedance factor strictly above this is `HIGH`.
pub const DEFAULT_HIGH_THRESHOLD: f64 = 2.0;

/// What kind of regulatory limit an entry encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Maximum Contaminant Level.
    Mcl,
    /// Action level (Lead and Copper Rule).
    ActionLevel,
    /// Any detection is a violation.
    ZeroTolerance,
}

impl LimitKind {
    /// Short label used in reports, e.g. `MCL`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mcl => "MCL",
            Self::ActionLevel => "Action Level",
            Self::ZeroTolerance => "Zero Tolerance",
        }
    }
}

/// Qualifiers appended to the severity label, e.g. the `Corrosion control
/// failure` in `HIGH - Corrosion control failure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityRationale {
    #[serde(default = "default_critical")]
    pub critical: String,
    #[serde(default = "default_high")]
    pub high: String,
    #[serde(default = "default_moderate")]
    pub moderate: String,
}

fn default_critical() -> String {
    "Immediate public health risk".to_string()
}

fn default_high() -> String {
    "Significant health risk".to_string()
}

fn default_moderate() -> String {
    "Health concern".to_string()
}

impl Default for SeverityRationale {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            high: default_high(),
            moderate: default_moderate(),
        }
    }
}

impl SeverityRationale {
    pub fn new(high: &str, moderate: &str) -> Self {
        Self {
            high: high.to_string(),
            moderate: moderate.to_string(),
            ..Self::default()
        }
    }

    /// Rationale text for a level.
    pub fn for_level(&self, level: SeverityLevel) -> &str {
        match level {
            SeverityLevel::Critical => &self.critical,
            SeverityLevel::High => &self.high,
            SeverityLevel::Moderate => &self.moderate,
        }
    }
}

/// A regulatory limit for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryLimit {
    pub parameter: Parameter,
    /// MCL or action level; `0` means zero tolerance.
    pub limit_value: f64,
    pub kind: LimitKind,
    pub tier: Tier,
    #[serde(default)]
    pub unit: String,
    /// Exceedance factor above which a violation is `HIGH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<f64>,
    #[serde(default)]
    pub rationale: SeverityRationale,
    /// Health-effects statement for notices that have no dedicated
    /// template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_effects: Option<String>,
}

impl RegulatoryLimit {
    /// A numeric limit (MCL or action level) with default threshold and
    /// rationale.
    pub fn numeric(parameter: Parameter, limit_value: f64, kind: LimitKind, tier: Tier, unit: &str) -> Self {
        Self {
            parameter,
            limit_value,
            kind,
            tier,
            unit: unit.to_string(),
            high_threshold: None,
            rationale: SeverityRationale::default(),
            health_effects: None,
        }
    }

    /// A presence/absence limit.
    pub fn zero_tolerance(parameter: Parameter, tier: Tier) -> Self {
        Self {
            parameter,
            limit_value: 0.0,
            kind: LimitKind::ZeroTolerance,
            tier,
            unit: String::new(),
            high_threshold: None,
            rationale: SeverityRationale::default(),
            health_effects: None,
        }
    }

    pub fn with_high_threshold(mut self, threshold: f64) -> Self {
        self.high_threshold = Some(threshold);
        self
    }

    pub fn with_rationale(mut self, rationale: SeverityRationale) -> Self {
        self.rationale = rationale;
        self
    }

    pub fn with_health_effects(mut self, text: &str) -> Self {
        self.health_effects = Some(text.to_string());
        self
    }

    /// Whether the parameter is evaluated by presence rather than ratio.
    pub fn is_zero_tolerance(&self) -> bool {
        self.kind == LimitKind::ZeroTolerance || self.limit_value == 0.0
    }

    /// The declared threshold, or [`DEFAULT_HIGH_THRESHOLD`].
    pub fn effective_high_threshold(&self) -> f64 {
        self.high_threshold.unwrap_or(DEFAULT_HIGH_THRESHOLD)
    }
}

/// Limits keyed by canonical parameter. Serialized as a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RegulatoryLimit>", into = "Vec<RegulatoryLimit>")]
pub struct LimitTable {
    entries: BTreeMap<Parameter, RegulatoryLimit>,
}

impl LimitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a limit by canonical parameter name.
    pub fn get(&self, parameter: &str) -> Option<&RegulatoryLimit> {
        self.entries.get(parameter)
    }

    pub fn get_mut(&mut self, parameter: &str) -> Option<&mut RegulatoryLimit> {
        self.entries.get_mut(parameter)
    }

    /// Insert or replace the limit for its parameter. Returns the
    /// replaced entry, if any.
    pub fn insert(&mut self, limit: RegulatoryLimit) -> Option<RegulatoryLimit> {
        self.entries.insert(limit.parameter.clone(), limit)
    }

    pub fn contains(&self, parameter: &str) -> bool {
        self.entries.contains_key(parameter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegulatoryLimit> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RegulatoryLimit> for LimitTable {
    fn from_iter<I: IntoIterator<Item = RegulatoryLimit>>(iter: I) -> Self {
        let mut table = Self::new();
        for limit in iter {
            table.insert(limit);
        }
        table
    }
}

impl From<Vec<RegulatoryLimit>> for LimitTable {
    fn from(limits: Vec<RegulatoryLimit>) -> Self {
        limits.into_iter().collect()
    }
}

impl From<LimitTable> for Vec<RegulatoryLimit> {
    fn from(table: LimitTable) -> Self {
        table.entries.into_values().collect()
    }
}

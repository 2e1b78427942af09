//! # Severity Classifier
//!
//! One [`SeverityAssessment`] per parameter with findings:
//!
//! - zero-tolerance parameter → `CRITICAL`, unconditionally;
//! - otherwise `max(exceedance factor) > high threshold` → `HIGH`,
//!   else `MODERATE`.
//!
//! The high threshold is the limit's declared multiplier, or
//! [`DEFAULT_HIGH_THRESHOLD`]. The comparison is strict, so a worst factor
//! exactly at the threshold is `MODERATE`.

use std::collections::BTreeMap;

use serde::Serialize;

use sdwa_core::{Exceedance, Findings, Parameter, SeverityLevel};
use sdwa_pack::{LimitTable, SeverityRationale, DEFAULT_HIGH_THRESHOLD};

/// Severity per violated parameter.
pub type SeverityMap = BTreeMap<Parameter, SeverityAssessment>;

/// Severity of one violated parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityAssessment {
    pub level: SeverityLevel,
    /// Worst exceedance among the parameter's findings.
    pub max_exceedance: Exceedance,
    /// Threshold the worst factor was compared against; `None` for
    /// zero-tolerance parameters.
    pub threshold: Option<f64>,
    pub rationale: String,
}

impl SeverityAssessment {
    /// `HIGH - Corrosion control failure`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.level, self.rationale)
    }
}

/// Classify every parameter that has findings.
pub fn assess(findings: &Findings, limits: &LimitTable) -> SeverityMap {
    let mut map = SeverityMap::new();
    for (parameter, list) in findings {
        if list.is_empty() {
            continue;
        }
        let limit = limits.get(parameter.as_str());
        let fallback = SeverityRationale::default();
        let rationale = limit.map(|l| &l.rationale).unwrap_or(&fallback);

        let zero_tolerance = limit.map(|l| l.is_zero_tolerance()).unwrap_or(false)
            || list.iter().any(|f| f.exceedance.is_acute());

        let assessment = if zero_tolerance {
            SeverityAssessment {
                level: SeverityLevel::Critical,
                max_exceedance: Exceedance::Acute,
                threshold: None,
                rationale: rationale.for_level(SeverityLevel::Critical).to_string(),
            }
        } else {
            let max = list
                .iter()
                .filter_map(|f| f.exceedance.factor())
                .fold(f64::NEG_INFINITY, f64::max);
            let threshold = limit
                .map(|l| l.effective_high_threshold())
                .unwrap_or(DEFAULT_HIGH_THRESHOLD);
            let level = if max > threshold {
                SeverityLevel::High
            } else {
                SeverityLevel::Moderate
            };
            SeverityAssessment {
                level,
                max_exceedance: Exceedance::Factor(max),
                threshold: Some(threshold),
                rationale: rationale.for_level(level).to_string(),
            }
        };

        tracing::debug!(
            %parameter,
            level = %assessment.level,
            max_exceedance = %assessment.max_exceedance,
            "severity assessed"
        );
        map.insert(parameter.clone(), assessment);
    }
    map
}

//! # Pack Validation Rules
//!
//! Checks a regulatory pack for internal consistency before it is used.
//!
//! ## Rules
//!
//! | Rule | Severity |
//! |------|----------|
//! | Limit value is finite and non-negative | error |
//! | `zero_tolerance` kind ⇔ limit value of zero | error |
//! | High threshold, when declared, is finite and greater than 1.0 | error |
//! | Every tier referenced by a limit has a notification requirement | error |
//! | Every requirement names at least one media channel | error |
//! | Requirement deadline is at most ten years | error |
//! | Numeric limit has a unit | warning |
//! | Zero-tolerance limit declares a high threshold (ignored) | warning |
//! | Parameter is not one of the built-in canonical names | warning |

use chrono::Duration;
use serde::Serialize;

use crate::pack::RegulatoryPack;

/// Longest notification deadline a pack may declare, in days.
pub const MAX_DEADLINE_DAYS: i64 = 3650;

// ---------------------------------------------------------------------------
// Validation Results
// ---------------------------------------------------------------------------

/// Result of validating a regulatory pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackValidationResult {
    /// Whether the pack is usable.
    pub is_valid: bool,
    /// Validation errors, if any.
    pub errors: Vec<String>,
    /// Validation warnings (non-fatal).
    pub warnings: Vec<String>,
}

impl PackValidationResult {
    /// Create a successful validation result.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error. Marks result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning (does not affect validity).
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: PackValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

// ---------------------------------------------------------------------------
// Pack Validation
// ---------------------------------------------------------------------------

/// Validate a regulatory pack.
pub fn validate_pack(pack: &RegulatoryPack) -> PackValidationResult {
    let mut result = validate_limits(pack);
    result.merge(validate_requirements(pack));
    result
}

fn validate_limits(pack: &RegulatoryPack) -> PackValidationResult {
    let mut result = PackValidationResult::ok();

    for limit in pack.limits.iter() {
        let name = limit.parameter.as_str();

        if !limit.limit_value.is_finite() || limit.limit_value < 0.0 {
            result.add_error(format!(
                "{name}: limit value must be a finite non-negative number, got {}",
                limit.limit_value
            ));
        }

        let zero_kind = limit.kind == crate::LimitKind::ZeroTolerance;
        let zero_value = limit.limit_value == 0.0;
        if zero_kind && !zero_value {
            result.add_error(format!(
                "{name}: zero_tolerance limit must have limit value 0, got {}",
                limit.limit_value
            ));
        } else if zero_value && !zero_kind {
            result.add_error(format!(
                "{name}: limit value 0 requires kind zero_tolerance, got {}",
                limit.kind.label()
            ));
        }

        if let Some(threshold) = limit.high_threshold {
            if !threshold.is_finite() || threshold <= 1.0 {
                result.add_error(format!(
                    "{name}: high threshold must be greater than 1.0, got {threshold}"
                ));
            }
            if limit.is_zero_tolerance() {
                result.add_warning(format!(
                    "{name}: high threshold is ignored for zero-tolerance parameters"
                ));
            }
        }

        if pack.requirements.get(limit.tier).is_none() {
            result.add_error(format!(
                "{name}: no notification requirement for {}",
                limit.tier
            ));
        }

        if !limit.is_zero_tolerance() && limit.unit.trim().is_empty() {
            result.add_warning(format!("{name}: numeric limit has no unit"));
        }

        if !limit.parameter.is_well_known() {
            result.add_warning(format!(
                "{name}: not a built-in parameter; notices will use the generic template"
            ));
        }
    }

    result
}

fn validate_requirements(pack: &RegulatoryPack) -> PackValidationResult {
    let mut result = PackValidationResult::ok();
    for req in pack.requirements.iter() {
        if req.media_channels.iter().all(|c| c.trim().is_empty()) {
            result.add_error(format!("{}: at least one media channel is required", req.tier));
        }
        let within_bound = req
            .deadline
            .duration()
            .is_some_and(|d| d <= Duration::days(MAX_DEADLINE_DAYS));
        if !within_bound {
            result.add_error(format!(
                "{}: deadline {} exceeds {MAX_DEADLINE_DAYS} days",
                req.tier, req.deadline
            ));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{LimitKind, RegulatoryLimit};
    use crate::requirements::{Deadline, NotificationRequirement};
    use sdwa_core::{Parameter, Tier};

    #[test]
    fn test_epa_default_is_valid() {
        let result = validate_pack(&RegulatoryPack::epa_default());
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_negative_limit_rejected() {
        let mut pack = RegulatoryPack::epa_default();
        if let Some(l) = pack.limits.get_mut("Lead") {
            l.limit_value = -1.0;
        }
        let result = validate_pack(&pack);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.starts_with("Lead:")));
    }

    #[test]
    fn test_zero_tolerance_mismatch_rejected() {
        let mut pack = RegulatoryPack::epa_default();
        if let Some(l) = pack.limits.get_mut("E.coli") {
            l.limit_value = 1.0;
        }
        if let Some(l) = pack.limits.get_mut("Copper") {
            l.limit_value = 0.0;
        }
        let result = validate_pack(&pack);
        assert_eq!(result.errors.len(), 2, "{:?}", result.errors);
    }

    #[test]
    fn test_threshold_must_exceed_one() {
        let mut pack = RegulatoryPack::epa_default();
        if let Some(l) = pack.limits.get_mut("Copper") {
            l.high_threshold = Some(0.9);
        }
        assert!(!validate_pack(&pack).is_valid);
    }

    #[test]
    fn test_missing_tier_requirement_rejected() {
        let mut pack = RegulatoryPack::epa_default();
        pack.requirements = vec![NotificationRequirement::new(
            Tier::Tier2,
            Deadline::days(30),
            &["Public Notice"],
        )]
        .into();
        let result = validate_pack(&pack);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Tier 1")));
    }

    #[test]
    fn test_empty_channels_rejected() {
        let mut pack = RegulatoryPack::epa_default();
        pack.requirements
            .insert(NotificationRequirement::new(Tier::Tier3, Deadline::years(1), &[]));
        assert!(!validate_pack(&pack).is_valid);
    }

    #[test]
    fn test_unbounded_deadline_rejected() {
        let mut pack = RegulatoryPack::epa_default();
        pack.requirements.insert(NotificationRequirement::new(
            Tier::Tier2,
            Deadline::years(300_000),
            &["Public Notice"],
        ));
        let result = validate_pack(&pack);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.starts_with("Tier 2: deadline 300000 years")));

        pack.requirements.insert(NotificationRequirement::new(
            Tier::Tier2,
            Deadline::years(10),
            &["Public Notice"],
        ));
        assert!(validate_pack(&pack).is_valid);
    }

    #[test]
    fn test_unknown_parameter_warns() {
        let mut pack = RegulatoryPack::epa_default();
        pack.limits.insert(RegulatoryLimit::numeric(
            Parameter::new("Chlorite").unwrap(),
            1.0,
            LimitKind::Mcl,
            Tier::Tier2,
            "",
        ));
        let result = validate_pack(&pack);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2, "{:?}", result.warnings);
    }

    #[test]
    fn test_merge_propagates_invalid() {
        let mut a = PackValidationResult::ok();
        let mut b = PackValidationResult::ok();
        b.add_error("bad".to_string());
        b.add_warning("meh".to_string());
        a.merge(b);
        assert!(!a.is_valid);
        assert_eq!(a.errors, vec!["bad".to_string()]);
        assert_eq!(a.warnings, vec!["meh".to_string()]);
    }
}

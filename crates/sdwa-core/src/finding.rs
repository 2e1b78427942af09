//! # Violation Findings
//!
//! A [`ViolationFinding`] is the record of one sample that breached its
//! regulatory limit. Findings are grouped per parameter into [`Findings`],
//! a `BTreeMap` so every downstream rendering iterates in the same order.
//!
//! ## Rounding
//!
//! Exceedance factors are rounded half away from zero to two decimals
//! ([`round_to_hundredths`]). Notices that show one decimal round again
//! from the two-decimal value ([`format_tenths`]), so a factor of `2.05`
//! renders as `2.1`, never `2.0`.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::parameter::Parameter;
use crate::tier::Tier;

/// Findings grouped by parameter, in input order within each group.
/// A parameter with no findings is absent.
pub type Findings = BTreeMap<Parameter, Vec<ViolationFinding>>;

/// Round to two decimal places, half away from zero.
pub fn round_to_hundredths(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Render a two-decimal factor with one decimal, rounding half up from
/// the hundredths digit. Factors too large for that rounding to matter are
/// rendered as-is.
pub fn format_tenths(v: f64) -> String {
    let tenths = ((v * 100.0).round() / 10.0).round();
    if !tenths.is_finite() {
        return format!("{v:.1}");
    }
    // `+ 0.0` folds a rounded `-0.0` into `0.0`.
    format!("{:.1}", tenths / 10.0 + 0.0)
}

// ---------------------------------------------------------------------------
// Observed value and exceedance
// ---------------------------------------------------------------------------

/// The offending value of a finding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observed {
    /// Zero-tolerance contaminant detected.
    Present,
    /// Measured concentration above the limit.
    Value(f64),
}

impl Observed {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Present => None,
        }
    }
}

impl std::fmt::Display for Observed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => f.write_str("Present"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Observed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Present => serializer.serialize_str("Present"),
            Self::Value(v) => serializer.serialize_f64(*v),
        }
    }
}

/// How far a finding exceeds its limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exceedance {
    /// Zero-tolerance contaminant present; no ratio is meaningful.
    Acute,
    /// `observed / limit`, rounded to two decimals.
    Factor(f64),
}

impl Exceedance {
    /// Compute the factor for a numeric observation against a positive limit.
    pub fn ratio(observed: f64, limit: f64) -> Self {
        Self::Factor(round_to_hundredths(observed / limit))
    }

    pub fn factor(&self) -> Option<f64> {
        match self {
            Self::Factor(f) => Some(*f),
            Self::Acute => None,
        }
    }

    pub fn is_acute(&self) -> bool {
        matches!(self, Self::Acute)
    }
}

impl std::fmt::Display for Exceedance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Acute => f.write_str("ACUTE"),
            Self::Factor(v) => write!(f, "{v:.2}"),
        }
    }
}

impl Serialize for Exceedance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Acute => serializer.serialize_str("ACUTE"),
            Self::Factor(v) => serializer.serialize_f64(*v),
        }
    }
}

// ---------------------------------------------------------------------------
// ViolationFinding
// ---------------------------------------------------------------------------

/// One sample that breached its regulatory limit.
///
/// Only the detector constructs these; a finding exists only when the
/// observed value is strictly greater than the limit, or when a
/// zero-tolerance contaminant was present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationFinding {
    pub parameter: Parameter,
    pub sample_location: String,
    pub observed: Observed,
    pub limit_value: f64,
    pub unit: String,
    pub exceedance: Exceedance,
    pub tier: Tier,
    pub collection_time: Option<NaiveDateTime>,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rounding is monotonic: a larger observation never yields a
        /// smaller factor against the same limit.
        #[test]
        fn ratio_is_monotonic(a in 0.0f64..1.0e6, b in 0.0f64..1.0e6, limit in 0.001f64..1.0e4) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let f_lo = Exceedance::ratio(lo, limit).factor().unwrap();
            let f_hi = Exceedance::ratio(hi, limit).factor().unwrap();
            prop_assert!(f_lo <= f_hi, "{lo} -> {f_lo}, {hi} -> {f_hi}");
        }

        /// Rounding to hundredths is idempotent.
        #[test]
        fn hundredths_idempotent(v in 0.0f64..1.0e6) {
            let once = round_to_hundredths(v);
            prop_assert_eq!(round_to_hundredths(once), once);
        }

        /// One-decimal rendering is within half a tenth of the factor.
        #[test]
        fn tenths_close_to_value(v in 0.0f64..1.0e4) {
            let rendered: f64 = format_tenths(round_to_hundredths(v)).parse().unwrap();
            prop_assert!((rendered - v).abs() <= 0.06, "{v} rendered as {rendered}");
        }
    }
}

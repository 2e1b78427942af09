//! # Violation Detector
//!
//! Compares every sample with the limit for its parameter.
//!
//! | Limit | Result | Outcome |
//! |-------|--------|---------|
//! | none | any | ignored (unregulated) |
//! | zero tolerance | `Present` | finding, exceedance `ACUTE` |
//! | zero tolerance | anything else | no finding |
//! | numeric | `Numeric(v)`, `v > limit` | finding, factor `round(v / limit, 2)` |
//! | numeric | `Numeric(v)`, `v <= limit` | no finding |
//! | numeric | not a number | skipped with a warning |
//!
//! Equality never produces a finding. A skipped sample never affects its
//! siblings.

use serde::Serialize;

use sdwa_core::{Exceedance, Findings, Observed, SampleRecord, SampleValue, ViolationFinding};
use sdwa_pack::{LimitTable, RegulatoryLimit};

/// Counters describing one detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectionStats {
    /// Samples with a regulated parameter that were evaluated.
    pub evaluated: usize,
    /// Samples whose parameter has no limit entry.
    pub unregulated: usize,
    /// Samples skipped because the result could not be evaluated.
    pub unreadable: usize,
    /// Findings emitted.
    pub findings: usize,
}

/// Detect violations. See the module docs for the decision table.
pub fn detect(samples: &[SampleRecord], limits: &LimitTable) -> Findings {
    detect_with_stats(samples, limits).0
}

/// [`detect`], also returning pass counters.
pub fn detect_with_stats(samples: &[SampleRecord], limits: &LimitTable) -> (Findings, DetectionStats) {
    let mut findings = Findings::new();
    let mut stats = DetectionStats::default();

    for (index, sample) in samples.iter().enumerate() {
        let Some(limit) = limits.get(sample.parameter.as_str()) else {
            tracing::debug!(index, parameter = %sample.parameter, "unregulated parameter ignored");
            stats.unregulated += 1;
            continue;
        };

        let evaluation = if limit.is_zero_tolerance() {
            evaluate_presence(sample, limit)
        } else {
            evaluate_numeric(sample, limit)
        };

        match evaluation {
            Evaluation::Violation(finding) => {
                stats.evaluated += 1;
                stats.findings += 1;
                findings
                    .entry(finding.parameter.clone())
                    .or_default()
                    .push(finding);
            }
            Evaluation::Compliant => stats.evaluated += 1,
            Evaluation::Unreadable => {
                tracing::warn!(
                    index,
                    parameter = %sample.parameter,
                    result = %sample.result,
                    location = %sample.sample_location,
                    "sample result cannot be evaluated; skipped"
                );
                stats.unreadable += 1;
            }
        }
    }

    tracing::debug!(
        evaluated = stats.evaluated,
        unregulated = stats.unregulated,
        unreadable = stats.unreadable,
        findings = stats.findings,
        "detection complete"
    );
    (findings, stats)
}

enum Evaluation {
    Violation(ViolationFinding),
    Compliant,
    Unreadable,
}

fn evaluate_presence(sample: &SampleRecord, limit: &RegulatoryLimit) -> Evaluation {
    match &sample.result {
        SampleValue::Present => Evaluation::Violation(finding(sample, limit, Observed::Present, Exceedance::Acute)),
        SampleValue::Absent => Evaluation::Compliant,
        // A count or concentration for a presence/absence parameter is not
        // a presence result.
        SampleValue::Numeric(_) | SampleValue::Unreadable(_) => Evaluation::Unreadable,
    }
}

fn evaluate_numeric(sample: &SampleRecord, limit: &RegulatoryLimit) -> Evaluation {
    match sample.result.as_number() {
        Some(value) if value > limit.limit_value => Evaluation::Violation(finding(
            sample,
            limit,
            Observed::Value(value),
            Exceedance::ratio(value, limit.limit_value),
        )),
        Some(_) => Evaluation::Compliant,
        None => Evaluation::Unreadable,
    }
}

fn finding(
    sample: &SampleRecord,
    limit: &RegulatoryLimit,
    observed: Observed,
    exceedance: Exceedance,
) -> ViolationFinding {
    ViolationFinding {
        parameter: limit.parameter.clone(),
        sample_location: sample.sample_location.clone(),
        observed,
        limit_value: limit.limit_value,
        unit: if sample.unit.is_empty() {
            limit.unit.clone()
        } else {
            sample.unit.clone()
        },
        exceedance,
        tier: limit.tier,
        collection_time: sample.collection_time,
    }
}

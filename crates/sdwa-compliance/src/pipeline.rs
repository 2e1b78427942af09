//! # Analysis Pipeline
//!
//! Threads one sampling round through every stage and keeps each stage's
//! output. Nothing here is stateful: two calls with the same inputs
//! return equal outcomes and serialize to the same bytes.

use chrono::NaiveDate;
use serde::Serialize;

use sdwa_core::{ContentDigest, Findings, SampleRecord, SdwaError, SystemHeader};
use sdwa_pack::RegulatoryPack;

use crate::detector::{detect_with_stats, DetectionStats};
use crate::narrative::{enrich_or_skip, NarrativeEnricher, NarrativeRequest, NoNarrative};
use crate::notice::{generate, Notices};
use crate::report::{assemble, FederalReport};
use crate::severity::{assess, SeverityMap};

/// Every stage's output for one sampling round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub system: SystemHeader,
    pub stats: DetectionStats,
    pub findings: Findings,
    pub severity: SeverityMap,
    pub notices: Notices,
    pub report: FederalReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl AnalysisOutcome {
    /// True when no sample violated its limit.
    pub fn is_compliant(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn report_digest(&self) -> Result<ContentDigest, SdwaError> {
        self.report.digest()
    }
}

/// Run every stage without narrative enrichment.
pub fn run_analysis(
    samples: &[SampleRecord],
    pack: &RegulatoryPack,
    system: &SystemHeader,
    report_date: NaiveDate,
) -> AnalysisOutcome {
    run_analysis_with(samples, pack, system, report_date, &NoNarrative)
}

/// Run every stage, then offer the result to `enricher`.
pub fn run_analysis_with(
    samples: &[SampleRecord],
    pack: &RegulatoryPack,
    system: &SystemHeader,
    report_date: NaiveDate,
    enricher: &dyn NarrativeEnricher,
) -> AnalysisOutcome {
    let (findings, stats) = detect_with_stats(samples, &pack.limits);
    let severity = assess(&findings, &pack.limits);
    let notices = generate(&findings, &severity, system, &pack.requirements, &pack.limits);
    let report = assemble(system, &findings, &severity, &pack.limits, report_date);

    let narrative = enrich_or_skip(
        enricher,
        &NarrativeRequest {
            system,
            findings: &findings,
            severity: &severity,
            report: &report,
        },
    );

    tracing::info!(
        pwsid = %system.identifier,
        samples = samples.len(),
        violations = report.total_violations,
        parameters = findings.len(),
        notices = notices.len(),
        "analysis complete"
    );

    AnalysisOutcome {
        system: system.clone(),
        stats,
        findings,
        severity,
        notices,
        report,
        narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::SummaryNarrative;
    use sdwa_core::{Parameter, SampleValue, SeverityLevel};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    fn mixed_round() -> Vec<SampleRecord> {
        vec![
            SampleRecord::new(Parameter::from_static("E.coli"), SampleValue::Present),
            SampleRecord::new(Parameter::from_static("Lead"), SampleValue::Numeric(22.1)),
            SampleRecord::new(Parameter::from_static("Lead"), SampleValue::parse("N/A")),
            SampleRecord::new(Parameter::from_static("Copper"), SampleValue::Numeric(900.0)),
        ]
    }

    #[test]
    fn test_stages_agree() {
        let pack = RegulatoryPack::epa_default();
        let out = run_analysis(&mixed_round(), &pack, &SystemHeader::placeholder("OH7700001"), date());
        assert!(!out.is_compliant());
        assert_eq!(out.findings.len(), 2);
        assert_eq!(out.severity.len(), 2);
        assert_eq!(out.notices.len(), 2);
        assert_eq!(out.report.total_violations, 2);
        assert_eq!(out.severity["E.coli"].level, SeverityLevel::Critical);
        assert_eq!(out.stats.unreadable, 1);
        assert_eq!(out.narrative, None);
    }

    #[test]
    fn test_empty_round_is_compliant() {
        let pack = RegulatoryPack::epa_default();
        let out = run_analysis(&[], &pack, &SystemHeader::placeholder("OH7700001"), date());
        assert!(out.is_compliant());
        assert!(out.notices.is_empty());
        assert_eq!(out.report.summary, "No violations detected");
    }

    #[test]
    fn test_outcome_serializes_identically() {
        let pack = RegulatoryPack::epa_default();
        let system = SystemHeader::placeholder("OH7700001");
        let a = serde_json::to_vec(&run_analysis(&mixed_round(), &pack, &system, date())).unwrap();
        let b = serde_json::to_vec(&run_analysis(&mixed_round(), &pack, &system, date())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_enricher_output_attached() {
        let pack = RegulatoryPack::epa_default();
        let out = run_analysis_with(
            &mixed_round(),
            &pack,
            &SystemHeader::placeholder("OH7700001"),
            date(),
            &SummaryNarrative,
        );
        assert!(out.narrative.unwrap().contains("2 violation(s)"));
    }
}

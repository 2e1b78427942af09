//! # Narrative Enrichment
//!
//! An optional hook that turns an analysis into prose: an executive
//! summary for a board packet or a plain-language note for customers.
//! The engine never depends on it. Determinations (findings, severity,
//! tiers, deadlines) are settled before the enricher is called, and its
//! output is attached alongside them, never in place of them.
//!
//! [`NoNarrative`] is the default. [`SummaryNarrative`] is a
//! deterministic template-based implementation; a hosted language model
//! can be plugged in by implementing [`NarrativeEnricher`].

use thiserror::Error;

use sdwa_core::{Findings, SystemHeader};

use crate::report::FederalReport;
use crate::severity::SeverityMap;

/// Everything an enricher may read.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeRequest<'a> {
    pub system: &'a SystemHeader,
    pub findings: &'a Findings,
    pub severity: &'a SeverityMap,
    pub report: &'a FederalReport,
}

#[derive(Error, Debug)]
pub enum NarrativeError {
    /// The backing service could not be reached.
    #[error("narrative service unavailable: {0}")]
    Unavailable(String),

    /// The backing service refused or returned unusable output.
    #[error("narrative rejected: {0}")]
    Rejected(String),
}

/// Produces optional prose for an analysis.
pub trait NarrativeEnricher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// `Ok(None)` means "nothing to add".
    fn enrich(&self, request: &NarrativeRequest<'_>) -> Result<Option<String>, NarrativeError>;
}

/// Adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNarrative;

impl NarrativeEnricher for NoNarrative {
    fn name(&self) -> &str {
        "none"
    }

    fn enrich(&self, _request: &NarrativeRequest<'_>) -> Result<Option<String>, NarrativeError> {
        Ok(None)
    }
}

/// Deterministic executive summary built from the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryNarrative;

impl NarrativeEnricher for SummaryNarrative {
    fn name(&self) -> &str {
        "summary"
    }

    fn enrich(&self, request: &NarrativeRequest<'_>) -> Result<Option<String>, NarrativeError> {
        let system = request.system;
        let report = request.report;
        if !report.has_violations() {
            return Ok(Some(format!(
                "{} met every regulated limit in this sampling round. No public notice is required.",
                system.system_name
            )));
        }

        let mut text = format!(
            "{} (serving {} people) recorded {} violation(s) in this sampling round.",
            system.system_name,
            system.population_display(),
            report.total_violations
        );
        for (parameter, assessment) in request.severity {
            let count = request.findings.get(parameter).map(Vec::len).unwrap_or(0);
            text.push_str(&format!(
                " {parameter}: {count} sample(s), severity {}.",
                assessment.label()
            ));
        }
        if let Some(first) = report.immediate_actions_required.first() {
            text.push_str(&format!(" First required action: {first}."));
        }
        Ok(Some(text))
    }
}

/// Run an enricher, logging and dropping any failure.
pub(crate) fn enrich_or_skip(
    enricher: &dyn NarrativeEnricher,
    request: &NarrativeRequest<'_>,
) -> Option<String> {
    match enricher.enrich(request) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(enricher = enricher.name(), error = %e, "narrative enrichment failed; continuing without it");
            None
        }
    }
}

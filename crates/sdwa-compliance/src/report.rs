//! # Federal Violation Report
//!
//! Assembles the flat record submitted to the primacy agency. The report
//! carries the system identity, one row per finding, and two action lists:
//!
//! - **Immediate actions**, driven by which parameters were violated.
//!   Zero-tolerance parameters contribute the boil-water sequence first;
//!   action-level parameters contribute corrosion-control actions; MCL
//!   parameters contribute treatment actions. Every violated parameter
//!   adds its tier's public notification. Duplicates are removed keeping
//!   first occurrence.
//! - **Long-term actions**, a fixed list included whenever the report
//!   contains at least one violation.
//!
//! The report date is supplied by the caller so assembly stays
//! reproducible.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use sdwa_core::{
    content_digest, ContentDigest, DataSource, Exceedance, Findings, Observed, Parameter,
    SdwaError, SeverityLevel, SystemHeader, Tier,
};
use sdwa_pack::{LimitKind, LimitTable};

use crate::severity::SeverityMap;

pub const REPORT_TYPE: &str = "Drinking Water Violation Report";

const LONG_TERM_ACTIONS: &[&str] = &[
    "Submit corrective action plan within 30 days",
    "Implement enhanced monitoring program",
    "Conduct system-wide evaluation",
    "Submit quarterly compliance reports",
    "Maintain public notification requirements",
];

/// One finding as it appears in the federal report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedViolation {
    pub parameter: Parameter,
    /// `MCL Exceedance`, `Action Level Exceedance` or `Zero Tolerance Detection`.
    pub violation_type: String,
    pub tier: Tier,
    pub sample_location: String,
    pub result: Observed,
    pub unit: String,
    pub mcl_al: f64,
    pub exceedance_factor: Exceedance,
    pub severity: Option<SeverityLevel>,
    pub severity_label: Option<String>,
    pub collection_time: Option<NaiveDateTime>,
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FederalReport {
    pub report_type: String,
    pub pwsid: String,
    pub water_system_name: String,
    pub population_served: Option<u64>,
    pub system_type: String,
    pub location: String,
    pub system_data_source: DataSource,
    pub report_date: NaiveDate,
    /// Earliest known collection date among the findings.
    pub violation_date: Option<NaiveDate>,
    pub total_violations: usize,
    pub summary: String,
    pub violations: Vec<ReportedViolation>,
    pub immediate_actions_required: Vec<String>,
    pub long_term_actions: Vec<String>,
}

impl FederalReport {
    /// Content digest over the canonical JSON form.
    pub fn digest(&self) -> Result<ContentDigest, SdwaError> {
        content_digest(self)
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Assemble the report. Violations are listed parameter by parameter, in
/// finding order within each parameter.
pub fn assemble(
    system: &SystemHeader,
    findings: &Findings,
    severity: &SeverityMap,
    limits: &LimitTable,
    report_date: NaiveDate,
) -> FederalReport {
    let mut violations = Vec::new();
    let mut zero_tolerance_actions = Vec::new();
    let mut parameter_actions = Vec::new();

    for (parameter, list) in findings {
        let Some(first) = list.first() else {
            continue;
        };
        let limit = limits.get(parameter.as_str());
        let zero_tolerance = limit.map(|l| l.is_zero_tolerance()).unwrap_or(false)
            || first.exceedance.is_acute();
        let kind = match limit {
            Some(l) if !zero_tolerance => l.kind,
            Some(_) => LimitKind::ZeroTolerance,
            None if zero_tolerance => LimitKind::ZeroTolerance,
            None => LimitKind::Mcl,
        };
        let assessment = severity.get(parameter);

        for f in list {
            violations.push(ReportedViolation {
                parameter: parameter.clone(),
                violation_type: violation_type(kind).to_string(),
                tier: f.tier,
                sample_location: f.sample_location.clone(),
                result: f.observed,
                unit: f.unit.clone(),
                mcl_al: f.limit_value,
                exceedance_factor: f.exceedance,
                severity: assessment.map(|a| a.level),
                severity_label: assessment.map(|a| a.label()),
                collection_time: f.collection_time,
            });
        }

        let notification = format!(
            "Issue Tier {} public notification for {parameter}",
            first.tier.number()
        );
        match kind {
            LimitKind::ZeroTolerance => {
                zero_tolerance_actions.extend(
                    [
                        "Issue boil water advisory within 24 hours",
                        "Collect repeat samples within 24 hours",
                        "Notify state regulatory agency immediately",
                        "Implement emergency disinfection protocols",
                    ]
                    .map(String::from),
                );
                zero_tolerance_actions.push(notification);
            }
            LimitKind::ActionLevel => {
                parameter_actions.push("Optimize corrosion control treatment".to_string());
                parameter_actions.push("Conduct follow-up monitoring".to_string());
                parameter_actions.push(notification);
            }
            LimitKind::Mcl => {
                parameter_actions.push(format!("Evaluate treatment options for {parameter}"));
                parameter_actions.push("Investigate contamination sources".to_string());
                parameter_actions.push(notification);
            }
        }
    }

    let mut immediate = Vec::new();
    for action in zero_tolerance_actions.into_iter().chain(parameter_actions) {
        if !immediate.contains(&action) {
            immediate.push(action);
        }
    }

    let violation_date = findings
        .values()
        .flatten()
        .filter_map(|f| f.collection_time)
        .min()
        .map(|t| t.date());

    let summary = summarize(findings, severity);
    let long_term_actions = if violations.is_empty() {
        Vec::new()
    } else {
        LONG_TERM_ACTIONS.iter().map(|s| s.to_string()).collect()
    };

    tracing::debug!(
        pwsid = %system.identifier,
        violations = violations.len(),
        immediate_actions = immediate.len(),
        "federal report assembled"
    );

    FederalReport {
        report_type: REPORT_TYPE.to_string(),
        pwsid: system.identifier.clone(),
        water_system_name: system.system_name.clone(),
        population_served: system.population_served,
        system_type: system.system_type.clone(),
        location: system.location.clone(),
        system_data_source: system.data_source,
        report_date,
        violation_date,
        total_violations: violations.len(),
        summary,
        violations,
        immediate_actions_required: immediate,
        long_term_actions,
    }
}

fn violation_type(kind: LimitKind) -> &'static str {
    match kind {
        LimitKind::Mcl => "MCL Exceedance",
        LimitKind::ActionLevel => "Action Level Exceedance",
        LimitKind::ZeroTolerance => "Zero Tolerance Detection",
    }
}

/// `3 violation(s) across 2 parameter(s): Copper (HIGH), Lead (MODERATE)`.
fn summarize(findings: &Findings, severity: &SeverityMap) -> String {
    let total: usize = findings.values().map(Vec::len).sum();
    if total == 0 {
        return "No violations detected".to_string();
    }
    let parts: Vec<String> = findings
        .iter()
        .filter(|(_, list)| !list.is_empty())
        .map(|(p, _)| match severity.get(p) {
            Some(a) => format!("{p} ({})", a.level),
            None => p.to_string(),
        })
        .collect();
    format!(
        "{total} violation(s) across {} parameter(s): {}",
        parts.len(),
        parts.join(", ")
    )
}

//! # Public Notice Generator
//!
//! Renders one [`Notice`] per violated parameter. The body is built from a
//! parameter template (E.coli boil-water notice, Lead, Copper, PFOA) or
//! the generic template for any other regulated parameter. Every body
//! carries, in this order:
//!
//! 1. tier headline and system identity header;
//! 2. violation details: worst observed value, the limit, the number of
//!    exceedances and, for numeric parameters, the worst exceedance factor
//!    to one decimal;
//! 3. the health-effects statement;
//! 4. consumer instructions (Tier 1 only) and corrective actions;
//! 5. the notification requirement (`24 hours via Public Notice, ...`),
//!    the severity label and the violation date when known.
//!
//! Generation reads only its arguments; the same inputs always produce
//! the same text.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use sdwa_core::parameter::names;
use sdwa_core::{
    format_tenths, Exceedance, Findings, Observed, Parameter, SeverityLevel, SystemHeader, Tier,
    ViolationFinding,
};
use sdwa_pack::{Deadline, LimitKind, LimitTable, RegulatoryLimit, RequirementTable};

use crate::severity::SeverityMap;

/// Notices keyed by parameter.
pub type Notices = BTreeMap<Parameter, Notice>;

/// A rendered public notice for one violated parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub parameter: Parameter,
    pub tier: Tier,
    pub severity: Option<SeverityLevel>,
    pub exceedance_count: usize,
    pub worst_observed: Observed,
    pub worst_exceedance: Exceedance,
    pub limit_value: f64,
    pub unit: String,
    pub deadline: Option<Deadline>,
    pub media_channels: Vec<String>,
    /// Earliest collection date among the findings.
    pub violation_date: Option<NaiveDate>,
    /// Earliest collection time plus the tier deadline; `None` without a
    /// collection time or when the sum is not a representable date.
    pub notify_by: Option<NaiveDateTime>,
    pub body: String,
}

/// Generate one notice per parameter present in `findings`.
///
/// The tier comes from the parameter's first finding.
pub fn generate(
    findings: &Findings,
    severity: &SeverityMap,
    system: &SystemHeader,
    requirements: &RequirementTable,
    limits: &LimitTable,
) -> Notices {
    let mut notices = Notices::new();
    for (parameter, list) in findings {
        let Some(first) = list.first() else {
            continue;
        };
        let tier = first.tier;
        let requirement = requirements.get(tier);
        if requirement.is_none() {
            tracing::warn!(%parameter, %tier, "no notification requirement for tier");
        }
        let limit = limits.get(parameter.as_str());
        let assessment = severity.get(parameter);

        let worst = worst_finding(list).unwrap_or(first);
        let earliest = list.iter().filter_map(|f| f.collection_time).min();
        let deadline = requirement.map(|r| r.deadline);

        let facts = NoticeFacts {
            parameter,
            tier,
            count: list.len(),
            worst,
            unit: &worst.unit,
            limit_value: worst.limit_value,
            requirement_line: requirement
                .map(|r| r.summary())
                .unwrap_or_else(|| "contact your primacy agency".to_string()),
            severity_label: assessment.map(|a| a.label()),
            violation_date: earliest.map(|t| t.date()),
        };
        let template = template_for(parameter, limit, tier);
        let body = render(&template, &facts, system);

        notices.insert(
            parameter.clone(),
            Notice {
                parameter: parameter.clone(),
                tier,
                severity: assessment.map(|a| a.level),
                exceedance_count: list.len(),
                worst_observed: worst.observed,
                worst_exceedance: worst.exceedance,
                limit_value: worst.limit_value,
                unit: worst.unit.clone(),
                deadline,
                media_channels: requirement
                    .map(|r| r.media_channels.clone())
                    .unwrap_or_default(),
                violation_date: facts.violation_date,
                notify_by: earliest.zip(deadline).and_then(|(t, d)| d.due_from(t)),
                body,
            },
        );
    }
    tracing::debug!(notices = notices.len(), "notices generated");
    notices
}

/// The finding with the highest observed value; the first one on ties and
/// for presence findings.
fn worst_finding(list: &[ViolationFinding]) -> Option<&ViolationFinding> {
    list.iter().fold(None, |best: Option<&ViolationFinding>, f| match best {
        None => Some(f),
        Some(b) => match (b.observed.as_number(), f.observed.as_number()) {
            (Some(bv), Some(fv)) if fv > bv => Some(f),
            _ => Some(b),
        },
    })
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

struct NoticeFacts<'a> {
    parameter: &'a Parameter,
    tier: Tier,
    count: usize,
    worst: &'a ViolationFinding,
    unit: &'a str,
    limit_value: f64,
    requirement_line: String,
    severity_label: Option<String>,
    violation_date: Option<NaiveDate>,
}

struct Template {
    banner: Option<String>,
    headline: String,
    level_label: String,
    limit_label: String,
    health_effects: String,
    consumer_actions: Vec<String>,
    corrective_actions: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn template_for(parameter: &Parameter, limit: Option<&RegulatoryLimit>, tier: Tier) -> Template {
    match parameter.as_str() {
        names::E_COLI => Template {
            banner: Some("URGENT: DO NOT DRINK THE WATER WITHOUT BOILING IT FIRST".to_string()),
            headline: "E.coli bacteria have been found in your drinking water. This is an acute \
                       violation requiring immediate action."
                .to_string(),
            level_label: "Result".to_string(),
            limit_label: "EPA MCL".to_string(),
            health_effects: "E. coli are bacteria whose presence indicates that the water may be \
                             contaminated with human or animal wastes. Microbes in these wastes can \
                             cause short-term effects, such as diarrhea, cramps, nausea, headaches, \
                             or other symptoms. They may pose a special health risk for infants, \
                             young children, some of the elderly, and people with severely \
                             compromised immune systems."
                .to_string(),
            consumer_actions: strings(&[
                "Boil all water for drinking, cooking, and brushing teeth for at least 1 minute",
                "Use bottled water if available",
                "Seek medical attention if you experience illness",
            ]),
            corrective_actions: strings(&[
                "Collecting repeat samples at the affected locations",
                "Implementing emergency disinfection",
                "Investigating the source of contamination",
                "Notifying you when the water is safe to drink",
            ]),
        },
        names::LEAD => Template {
            banner: None,
            headline: "Lead levels in your drinking water exceed the EPA action level.".to_string(),
            level_label: "Maximum Lead Level".to_string(),
            limit_label: "EPA Action Level".to_string(),
            health_effects: "Lead can cause serious health problems, especially for pregnant women \
                             and young children. Lead in drinking water is primarily from materials \
                             and components associated with service lines and home plumbing."
                .to_string(),
            consumer_actions: Vec::new(),
            corrective_actions: strings(&[
                "Corrosion control treatment optimization",
                "Additional monitoring and testing",
                "Public education campaign",
            ]),
        },
        names::COPPER => Template {
            banner: None,
            headline: "Copper levels in your drinking water exceed the EPA action level.".to_string(),
            level_label: "Maximum Copper Level".to_string(),
            limit_label: "EPA Action Level".to_string(),
            health_effects: "Copper is an essential nutrient, but some people who drink water \
                             containing copper in excess of the action level over a relatively \
                             short period could experience gastrointestinal distress."
                .to_string(),
            consumer_actions: Vec::new(),
            corrective_actions: strings(&[
                "Corrosion control treatment adjustment",
                "pH optimization",
                "Additional monitoring",
            ]),
        },
        names::PFOA => Template {
            banner: None,
            headline: "PFOA levels in your drinking water exceed the EPA maximum contaminant level."
                .to_string(),
            level_label: "PFOA Level".to_string(),
            limit_label: "EPA MCL".to_string(),
            health_effects: "PFOA is a synthetic chemical that has been used in industry and \
                             consumer products. Some people who drink water containing PFOA in \
                             excess of the MCL over many years may experience certain health \
                             effects."
                .to_string(),
            consumer_actions: Vec::new(),
            corrective_actions: strings(&[
                "Enhanced treatment system implementation",
                "Source water investigation",
                "Alternative water supply evaluation",
            ]),
        },
        _ => generic_template(parameter, limit, tier),
    }
}

fn generic_template(parameter: &Parameter, limit: Option<&RegulatoryLimit>, tier: Tier) -> Template {
    let kind = limit.map(|l| l.kind).unwrap_or(LimitKind::Mcl);
    let zero_tolerance = limit.map(|l| l.is_zero_tolerance()).unwrap_or(false);
    let (standard, limit_label) = match kind {
        LimitKind::ActionLevel => ("action level", "EPA Action Level"),
        LimitKind::Mcl | LimitKind::ZeroTolerance => ("maximum contaminant level", "EPA MCL"),
    };

    let headline = if zero_tolerance {
        format!("{parameter} has been detected in your drinking water. Any detection of {parameter} is a violation.")
    } else {
        format!("{parameter} levels in your drinking water exceed the EPA {standard}.")
    };
    let health_effects = limit
        .and_then(|l| l.health_effects.clone())
        .unwrap_or_else(|| {
            format!(
                "Some people who drink water containing {parameter} in excess of the EPA {standard} \
                 may experience health effects. Consult your doctor if you have specific health \
                 concerns."
            )
        });
    let (banner, consumer_actions) = if tier == Tier::Tier1 {
        (
            Some("URGENT: DRINKING WATER WARNING".to_string()),
            strings(&[
                "Use bottled water for drinking and cooking until further notice",
                "Follow further instructions from your water system",
                "Seek medical attention if you experience illness",
            ]),
        )
    } else {
        (None, Vec::new())
    };

    Template {
        banner,
        headline,
        level_label: if zero_tolerance {
            "Result".to_string()
        } else {
            format!("Maximum {parameter} Level")
        },
        limit_label: limit_label.to_string(),
        health_effects,
        consumer_actions,
        corrective_actions: vec![
            format!("Investigating the source of {parameter}"),
            "Evaluating treatment options".to_string(),
            "Conducting additional monitoring".to_string(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn with_unit(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value}")
    } else {
        format!("{value} {unit}")
    }
}

fn render(template: &Template, facts: &NoticeFacts<'_>, system: &SystemHeader) -> String {
    let mut lines: Vec<String> = Vec::new();

    let prefix = if facts.tier == Tier::Tier1 {
        "IMMEDIATE PUBLIC NOTICE"
    } else {
        "PUBLIC NOTICE"
    };
    lines.push(format!("{prefix} - {} VIOLATION", facts.tier.as_str().to_uppercase()));
    lines.push(system.header_line());
    lines.push(String::new());

    if let Some(banner) = &template.banner {
        lines.push(banner.clone());
        lines.push(String::new());
    }
    lines.push(template.headline.clone());
    lines.push(String::new());

    lines.push("VIOLATION DETAILS:".to_string());
    match (facts.worst.observed, facts.worst.exceedance) {
        (Observed::Value(v), Exceedance::Factor(f)) => {
            lines.push(format!("- {}: {}", template.level_label, with_unit(v, facts.unit)));
            lines.push(format!(
                "- {}: {}",
                template.limit_label,
                with_unit(facts.limit_value, facts.unit)
            ));
            lines.push(format!("- Number of Exceedances: {}", facts.count));
            lines.push(format!("- Exceedance Factor: {}x", format_tenths(f)));
        }
        _ => {
            lines.push(format!("- {}: Present", template.level_label));
            lines.push(format!(
                "- {}: Zero tolerance (must not be detected)",
                template.limit_label
            ));
            lines.push(format!("- Number of Positive Samples: {}", facts.count));
        }
    }
    lines.push(String::new());

    lines.push("HEALTH EFFECTS:".to_string());
    lines.push(template.health_effects.clone());
    lines.push(String::new());

    if !template.consumer_actions.is_empty() {
        lines.push("IMMEDIATE ACTIONS REQUIRED:".to_string());
        lines.extend(template.consumer_actions.iter().map(|a| format!("- {a}")));
        lines.push(String::new());
    }

    lines.push("ACTIONS BEING TAKEN:".to_string());
    lines.extend(template.corrective_actions.iter().map(|a| format!("- {a}")));
    lines.push(String::new());

    lines.push(format!("Notification Requirements: {}", facts.requirement_line));
    if let Some(label) = &facts.severity_label {
        lines.push(format!("Severity: {label}"));
    }
    if let Some(date) = facts.violation_date {
        lines.push(format!("Date of Violation: {}", date.format("%Y-%m-%d")));
    }

    tracing::trace!(parameter = %facts.parameter, lines = lines.len(), "notice rendered");
    lines.join("\n")
}

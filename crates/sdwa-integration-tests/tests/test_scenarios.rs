//! End-to-end regulatory scenarios through the full pipeline.
//!
//! Each scenario feeds samples through detection, severity, notice
//! generation and report assembly using the built-in EPA pack, and checks
//! every stage's output.

use sdwa_compliance::{run_analysis, AnalysisOutcome};
use sdwa_core::{Exceedance, Observed, SampleRecord, SeverityLevel, Tier};
use sdwa_integration_tests::{collected, numeric, raw, report_date, springfield};
use sdwa_pack::{Deadline, RegulatoryPack};

fn analyze(samples: &[SampleRecord]) -> AnalysisOutcome {
    run_analysis(samples, &RegulatoryPack::epa_default(), &springfield(), report_date())
}

// ---------------------------------------------------------------------------
// E.coli detected
// ---------------------------------------------------------------------------

#[test]
fn ecoli_present_triggers_tier1_boil_water_notice() {
    let out = analyze(&[raw("E.coli", "Present").collected_at(collected(15, 7))]);

    let findings = &out.findings["E.coli"];
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].exceedance, Exceedance::Acute);
    assert_eq!(findings[0].tier, Tier::Tier1);

    assert_eq!(out.severity["E.coli"].level, SeverityLevel::Critical);

    let notice = &out.notices["E.coli"];
    assert_eq!(notice.deadline, Some(Deadline::hours(24)));
    assert_eq!(
        notice.media_channels,
        vec!["Public Notice", "Direct Contact", "Media Alert"]
    );
    assert!(notice.body.contains("DO NOT DRINK THE WATER WITHOUT BOILING IT FIRST"));
    assert!(notice.body.contains("Springfield Municipal Water District (PWSID: OH7700001)"));
    assert_eq!(notice.notify_by, Some(collected(16, 7)));

    assert_eq!(
        out.report.immediate_actions_required[0],
        "Issue boil water advisory within 24 hours"
    );
}

#[test]
fn ecoli_absent_is_compliant() {
    let out = analyze(&[raw("E.coli", "Absent"), raw("E.coli", "negative")]);
    assert!(out.is_compliant());
    assert!(out.notices.is_empty());
}

// ---------------------------------------------------------------------------
// Lead action level
// ---------------------------------------------------------------------------

#[test]
fn lead_round_is_moderate() {
    let samples: Vec<_> = [18.2, 22.1, 16.8, 25.3]
        .iter()
        .map(|v| numeric("Lead", *v))
        .collect();
    let out = analyze(&samples);

    let findings = &out.findings["Lead"];
    assert_eq!(findings.len(), 4);
    let factors: Vec<f64> = findings.iter().filter_map(|f| f.exceedance.factor()).collect();
    assert_eq!(factors, vec![1.21, 1.47, 1.12, 1.69]);

    let severity = &out.severity["Lead"];
    assert_eq!(severity.max_exceedance, Exceedance::Factor(1.69));
    assert_eq!(severity.level, SeverityLevel::Moderate);

    let notice = &out.notices["Lead"];
    assert_eq!(notice.tier, Tier::Tier2);
    assert!(notice.body.contains("- Maximum Lead Level: 25.3 ppb"));
    assert!(notice.body.contains("- Number of Exceedances: 4"));
    assert!(notice.body.contains("Lead can cause serious health problems"));
}

// ---------------------------------------------------------------------------
// Copper action level
// ---------------------------------------------------------------------------

#[test]
fn copper_round_is_high() {
    let out = analyze(&[numeric("Copper", 1400.0), numeric("Copper", 2100.0)]);

    let factors: Vec<f64> = out.findings["Copper"]
        .iter()
        .filter_map(|f| f.exceedance.factor())
        .collect();
    assert_eq!(factors, vec![1.08, 1.62]);
    assert_eq!(out.severity["Copper"].level, SeverityLevel::High);
    assert_eq!(out.severity["Copper"].label(), "HIGH - Corrosion control failure");
    assert!(out.notices["Copper"].body.contains("gastrointestinal distress"));
}

// ---------------------------------------------------------------------------
// PFOA MCL
// ---------------------------------------------------------------------------

#[test]
fn pfoa_exceedance_factor_rendered_one_decimal() {
    let out = analyze(&[numeric("PFOA", 8.2)]);

    let finding = &out.findings["PFOA"][0];
    assert_eq!(finding.exceedance, Exceedance::Factor(2.05));
    assert_eq!(finding.observed, Observed::Value(8.2));

    let notice = &out.notices["PFOA"];
    assert_eq!(notice.tier, Tier::Tier2);
    assert_eq!(notice.deadline, Some(Deadline::days(30)));
    assert!(notice.body.contains("Exceedance Factor: 2.1x"), "{}", notice.body);
    assert!(notice
        .body
        .contains("Notification Requirements: 30 days via Public Notice, Newspaper"));

    // 2.05 is above PFOA's 2.0 multiplier.
    assert_eq!(out.severity["PFOA"].level, SeverityLevel::High);
}

// ---------------------------------------------------------------------------
// Empty input
// ---------------------------------------------------------------------------

#[test]
fn empty_input_reports_zero_violations() {
    let out = analyze(&[]);
    assert!(out.findings.is_empty());
    assert!(out.severity.is_empty());
    assert!(out.notices.is_empty());
    assert_eq!(out.report.total_violations, 0);
    assert!(out.report.violations.is_empty());
    assert_eq!(out.report.summary, "No violations detected");
    assert!(out.report.immediate_actions_required.is_empty());
    assert!(out.report.long_term_actions.is_empty());
    assert_eq!(out.report.water_system_name, "Springfield Municipal Water District");
}

// ---------------------------------------------------------------------------
// Unreadable result
// ---------------------------------------------------------------------------

#[test]
fn unreadable_lead_result_is_skipped() {
    let out = analyze(&[raw("Lead", "N/A")]);
    assert!(out.findings.is_empty());
    assert_eq!(out.stats.unreadable, 1);
    assert_eq!(out.report.total_violations, 0);
}

// ---------------------------------------------------------------------------
// Mixed round
// ---------------------------------------------------------------------------

#[test]
fn mixed_round_report() {
    let samples = vec![
        raw("E.coli", "Present"),
        numeric("Lead", 18.2),
        numeric("Lead", 25.3),
        raw("Lead", "N/A"),
        numeric("Copper", 2100.0),
        numeric("PFOA", 8.2),
        numeric("Chlorine Residual", 1.1),
    ];
    let out = analyze(&samples);

    let parameters: Vec<&str> = out.report.violations.iter().map(|v| v.parameter.as_str()).collect();
    assert_eq!(parameters, vec!["Copper", "E.coli", "Lead", "Lead", "PFOA"]);
    assert_eq!(out.report.total_violations, 5);
    assert_eq!(out.stats.unregulated, 1);
    assert_eq!(out.stats.unreadable, 1);
    assert_eq!(out.report.population_served, Some(58_000));
    assert_eq!(out.report.long_term_actions.len(), 5);

    let actions = &out.report.immediate_actions_required;
    let boil = actions
        .iter()
        .position(|a| a == "Issue boil water advisory within 24 hours")
        .unwrap();
    let corrosion = actions
        .iter()
        .position(|a| a == "Optimize corrosion control treatment")
        .unwrap();
    assert!(boil < corrosion);
    assert_eq!(
        actions.iter().filter(|a| *a == "Optimize corrosion control treatment").count(),
        1
    );
}

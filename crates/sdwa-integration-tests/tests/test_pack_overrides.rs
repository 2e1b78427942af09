//! Regulatory packs layered on the EPA defaults change the analysis the way
//! their entries say, and nothing else.

use sdwa_compliance::run_analysis;
use sdwa_core::{SeverityLevel, Tier};
use sdwa_integration_tests::{numeric, raw, report_date, springfield};
use sdwa_pack::{Deadline, PackError, RegulatoryPack};

// ---------------------------------------------------------------------------
// Threshold overrides
// ---------------------------------------------------------------------------

#[test]
fn raised_copper_threshold_downgrades_severity() {
    let samples = [numeric("Copper", 1400.0), numeric("Copper", 2100.0)];

    let default = run_analysis(&samples, &RegulatoryPack::epa_default(), &springfield(), report_date());
    assert_eq!(default.severity["Copper"].level, SeverityLevel::High);

    let pack = RegulatoryPack::from_yaml_str("thresholds:\n  Copper: 1.75\n").unwrap();
    let relaxed = run_analysis(&samples, &pack, &springfield(), report_date());
    assert_eq!(relaxed.severity["Copper"].level, SeverityLevel::Moderate);
    assert_eq!(relaxed.severity["Copper"].threshold, Some(1.75));

    // Detection does not depend on the threshold.
    assert_eq!(default.findings, relaxed.findings);
}

#[test]
fn threshold_for_unregulated_parameter_rejected() {
    let err = RegulatoryPack::from_yaml_str("thresholds:\n  Chlorite: 2.0\n").unwrap_err();
    assert!(matches!(err, PackError::UnknownParameter(ref p) if p == "Chlorite"));
}

// ---------------------------------------------------------------------------
// Added and replaced limits
// ---------------------------------------------------------------------------

const CHLORITE_PACK: &str = "\
limits:
  - parameter: Chlorite
    limit_value: 1.0
    kind: mcl
    tier: Tier 2
    unit: mg/L
    health_effects: Some infants and young children who drink water containing chlorite in excess of the MCL could experience nervous system effects.
";

#[test]
fn custom_limit_produces_generic_notice() {
    let pack = RegulatoryPack::from_yaml_str(CHLORITE_PACK).unwrap();
    assert!(pack.limits.contains("Chlorite"));
    assert!(pack.limits.contains("Lead"));

    let out = run_analysis(&[numeric("Chlorite", 1.3)], &pack, &springfield(), report_date());
    let notice = &out.notices["Chlorite"];
    assert_eq!(notice.tier, Tier::Tier2);
    assert_eq!(notice.deadline, Some(Deadline::days(30)));
    assert!(notice.body.contains("- Maximum Chlorite Level: 1.3 mg/L"), "{}", notice.body);
    assert!(notice.body.contains("nervous system effects"));
    assert_eq!(out.severity["Chlorite"].level, SeverityLevel::Moderate);
}

#[test]
fn unregulated_without_pack_entry() {
    let out = run_analysis(
        &[numeric("Chlorite", 1.3)],
        &RegulatoryPack::epa_default(),
        &springfield(),
        report_date(),
    );
    assert!(out.is_compliant());
    assert_eq!(out.stats.unregulated, 1);
}

#[test]
fn replaced_lead_limit_changes_detection() {
    let yaml = "\
limits:
  - parameter: Lead
    limit_value: 10
    kind: action_level
    tier: Tier 2
    unit: ppb
";
    let pack = RegulatoryPack::from_yaml_str(yaml).unwrap();
    let out = run_analysis(&[numeric("Lead", 12.0)], &pack, &springfield(), report_date());
    assert_eq!(out.findings["Lead"].len(), 1);
    assert_eq!(out.findings["Lead"][0].limit_value, 10.0);

    let default = run_analysis(
        &[numeric("Lead", 12.0)],
        &RegulatoryPack::epa_default(),
        &springfield(),
        report_date(),
    );
    assert!(default.is_compliant());
}

// ---------------------------------------------------------------------------
// Requirement overrides
// ---------------------------------------------------------------------------

#[test]
fn requirement_override_changes_notice_channels() {
    let yaml = "\
requirements:
  - tier: Tier 1
    deadline: 12 hours
    media_channels: [Public Notice, Direct Contact, Media Alert, Reverse 911]
";
    let pack = RegulatoryPack::from_yaml_str(yaml).unwrap();
    let out = run_analysis(&[raw("E.coli", "Present")], &pack, &springfield(), report_date());
    let notice = &out.notices["E.coli"];
    assert_eq!(notice.deadline, Some(Deadline::hours(12)));
    assert!(notice.media_channels.iter().any(|c| c == "Reverse 911"));
    assert!(notice.body.contains("12 hours via"));
}

#[test]
fn empty_base_pack_detects_nothing() {
    let pack = RegulatoryPack::from_yaml_str("base: empty\n").unwrap();
    assert!(pack.limits.is_empty());
    let out = run_analysis(&[numeric("Lead", 100.0)], &pack, &springfield(), report_date());
    assert!(out.is_compliant());
    assert_eq!(out.stats.unregulated, 1);
}

#[test]
fn custom_limit_without_requirement_rejected() {
    let yaml = "\
base: empty
limits:
  - parameter: Chlorite
    limit_value: 1.0
    kind: mcl
    tier: Tier 2
    unit: mg/L
";
    let err = RegulatoryPack::from_yaml_str(yaml).unwrap_err();
    match err {
        PackError::Invalid(errors) => {
            assert!(errors.iter().any(|e| e.contains("no notification requirement for Tier 2")));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

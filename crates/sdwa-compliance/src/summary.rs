//! Plain-text rendering of an [`AnalysisOutcome`] for terminals and logs.

use std::fmt::Write as _;

use sdwa_core::temporal::format_collection_time;

use crate::pipeline::AnalysisOutcome;

/// Render a human-readable summary of an analysis.
///
/// ```text
/// Clinton Machine PWS (PWSID: OH7700001)
/// Population served: 1,250 | Type: CWS | Source: cached
/// Samples evaluated: 6 (unregulated: 0, unreadable: 1)
///
/// VIOLATIONS (2 parameters, 3 samples)
///   Copper   Tier 2  HIGH - Corrosion control failure  worst 1.62x
///   Lead     Tier 2  MODERATE - Health concern        worst 1.69x
/// ```
pub fn render_summary(outcome: &AnalysisOutcome) -> String {
    let mut out = String::new();
    let system = &outcome.system;
    let stats = &outcome.stats;

    let _ = writeln!(out, "{}", system.header_line());
    let _ = writeln!(
        out,
        "Population served: {} | Type: {} | Source: {}",
        system.population_display(),
        system.system_type,
        system.data_source
    );
    let _ = writeln!(
        out,
        "Samples evaluated: {} (unregulated: {}, unreadable: {})",
        stats.evaluated, stats.unregulated, stats.unreadable
    );
    let _ = writeln!(out);

    if outcome.is_compliant() {
        let _ = writeln!(out, "NO VIOLATIONS DETECTED");
        return out;
    }

    let width = outcome
        .findings
        .keys()
        .map(|p| p.as_str().len())
        .max()
        .unwrap_or(0);
    let _ = writeln!(
        out,
        "VIOLATIONS ({} parameters, {} samples)",
        outcome.findings.len(),
        outcome.report.total_violations
    );
    for (parameter, list) in &outcome.findings {
        let tier = list.first().map(|f| f.tier.as_str()).unwrap_or("-");
        let label = outcome
            .severity
            .get(parameter)
            .map(|a| a.label())
            .unwrap_or_default();
        let worst = match outcome.severity.get(parameter).map(|a| a.max_exceedance) {
            Some(sdwa_core::Exceedance::Factor(f)) => format!("worst {f:.2}x"),
            Some(sdwa_core::Exceedance::Acute) => "ACUTE".to_string(),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {tier}  {label}  {worst}",
            parameter.as_str()
        );
        for f in list {
            let when = f
                .collection_time
                .as_ref()
                .map(format_collection_time)
                .unwrap_or_else(|| "time unknown".to_string());
            let _ = writeln!(
                out,
                "    - {} at {} ({when})",
                f.observed, f.sample_location
            );
        }
    }

    if let Some(first) = outcome.notices.values().filter_map(|n| n.notify_by).min() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Earliest notification due: {}", format_collection_time(&first));
    }
    if let Some(narrative) = &outcome.narrative {
        let _ = writeln!(out);
        let _ = writeln!(out, "{narrative}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run_analysis;
    use chrono::NaiveDate;
    use sdwa_core::{Parameter, SampleRecord, SampleValue, SystemHeader};
    use sdwa_pack::RegulatoryPack;

    fn outcome(samples: &[SampleRecord]) -> AnalysisOutcome {
        run_analysis(
            samples,
            &RegulatoryPack::epa_default(),
            &SystemHeader::placeholder("OH7700001"),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )
    }

    #[test]
    fn test_compliant_summary() {
        let text = render_summary(&outcome(&[]));
        assert!(text.starts_with("Unknown Water System (PWSID: OH7700001)\n"));
        assert!(text.contains("NO VIOLATIONS DETECTED"));
    }

    #[test]
    fn test_violation_summary() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let samples = vec![
            SampleRecord::new(Parameter::from_static("Copper"), SampleValue::Numeric(2100.0))
                .with_location("School fountain")
                .collected_at(at),
            SampleRecord::new(Parameter::from_static("E.coli"), SampleValue::Present),
        ];
        let text = render_summary(&outcome(&samples));
        assert!(text.contains("VIOLATIONS (2 parameters, 2 samples)"));
        assert!(text.contains("HIGH - Corrosion control failure  worst 1.62x"));
        assert!(text.contains("    - 2100 at School fountain (2025-01-15 08:30)"));
        assert!(text.contains("ACUTE"));
        assert!(text.contains("Earliest notification due: 2025-02-14 08:30"));
    }
}

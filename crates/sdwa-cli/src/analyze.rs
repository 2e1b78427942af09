//! # Analyze Subcommand
//!
//! Runs one sampling round through the full pipeline and writes the
//! outputs.
//!
//! ```bash
//! sdwa analyze results.csv --pwsid OH7700001 --system-record records/ --output-dir out/
//! ```
//!
//! Output directory layout:
//!
//! ```text
//! out/
//!   analysis.json          every stage's output
//!   federal_report.json    the report alone
//!   notices/<parameter>.txt
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use sdwa_compliance::{
    render_summary, run_analysis_with, AnalysisOutcome, NarrativeEnricher, NoNarrative,
    SummaryNarrative,
};
use sdwa_core::{ContentDigest, Pwsid, SystemHeader};
use sdwa_sdwis::{lookup_or_placeholder, CachedRecordLookup};

use crate::config::CliConfig;
use crate::input::read_lab_file;

/// Arguments for the analyze subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Laboratory results file (.csv, .json, .yaml).
    pub samples: PathBuf,

    /// Water system identifier. Defaults to the first PWSID in the file.
    #[arg(long)]
    pub pwsid: Option<String>,

    /// Saved system record file, or a directory of `<PWSID>.json` records.
    #[arg(long)]
    pub system_record: Option<PathBuf>,

    /// Regulatory pack YAML. Defaults to the built-in EPA pack.
    #[arg(long)]
    pub pack: Option<PathBuf>,

    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub report_date: Option<NaiveDate>,

    /// Attach a narrative summary to the outcome.
    #[arg(long)]
    pub narrative: bool,

    /// Print the full outcome as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 when any violation is found.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the analyze subcommand.
pub fn run_analyze(args: &AnalyzeArgs, config: &CliConfig) -> Result<u8> {
    let pack = config.resolve_pack(args.pack.as_deref())?;
    let lab = read_lab_file(&args.samples)?;
    let samples = lab.samples();

    let identifier = args
        .pwsid
        .clone()
        .or_else(|| lab.first_pwsid().map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string());
    let records = args.system_record.as_deref().or(config.system_records.as_deref());
    let system = resolve_system(&identifier, records, config);

    let report_date = args
        .report_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let enricher: &dyn NarrativeEnricher = if args.narrative || config.narrative {
        &SummaryNarrative
    } else {
        &NoNarrative
    };

    let outcome = run_analysis_with(&samples, &pack, &system, report_date, enricher);

    print!("{}", render_stdout(&outcome, args.json)?);

    if let Some(dir) = &config.output_dir {
        write_outputs(dir, &outcome)?;
    }

    Ok(if args.strict && !outcome.is_compliant() { 2 } else { 0 })
}

/// The `--json` document: the outcome with the report digest alongside.
#[derive(Serialize)]
struct JsonOutput<'a> {
    report_digest: ContentDigest,
    #[serde(flatten)]
    outcome: &'a AnalysisOutcome,
}

/// What analyze prints to stdout. With `json` set this is exactly one JSON
/// document.
pub fn render_stdout(outcome: &AnalysisOutcome, json: bool) -> Result<String> {
    let report_digest = outcome.report_digest()?;
    if json {
        let mut text = serde_json::to_string_pretty(&JsonOutput {
            report_digest,
            outcome,
        })?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(format!("{}Report digest: {report_digest}\n", render_summary(outcome)))
    }
}

/// Resolve the system header: cached record if one resolves, else the
/// configured placeholder.
fn resolve_system(identifier: &str, records: Option<&Path>, config: &CliConfig) -> SystemHeader {
    let placeholder = config.placeholder_for(identifier);
    let Some(records) = records else {
        return placeholder;
    };
    match Pwsid::new(identifier) {
        Ok(pwsid) => lookup_or_placeholder(&CachedRecordLookup::new(records), &pwsid, placeholder),
        Err(e) => {
            tracing::warn!(identifier, error = %e, "cannot look up malformed PWSID; using placeholder");
            placeholder
        }
    }
}

/// Write the outcome, the report and one text file per notice.
pub fn write_outputs(dir: &Path, outcome: &AnalysisOutcome) -> Result<()> {
    let notices_dir = dir.join("notices");
    std::fs::create_dir_all(&notices_dir)
        .with_context(|| format!("failed to create output directory: {}", notices_dir.display()))?;

    write_json(&dir.join("analysis.json"), outcome)?;
    write_json(&dir.join("federal_report.json"), &outcome.report)?;
    let stems = notice_stems(outcome.notices.keys().map(|p| p.as_str()));
    for (stem, notice) in stems.iter().zip(outcome.notices.values()) {
        let path = notices_dir.join(format!("{stem}.txt"));
        std::fs::write(&path, format!("{}\n", notice.body))
            .with_context(|| format!("failed to write notice: {}", path.display()))?;
    }
    tracing::info!(dir = %dir.display(), notices = outcome.notices.len(), "outputs written");
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

/// One distinct file stem per parameter name, in the order given. Stems
/// that collide get `_2`, `_3` suffixes; names with no ASCII alphanumerics
/// fall back to `x` plus the hex of their UTF-8 bytes.
fn notice_stems<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut used = BTreeSet::new();
    let mut stems = Vec::new();
    for name in names {
        let mut base = file_stem(name);
        if base.is_empty() {
            base = name.bytes().fold(String::from("x"), |mut acc, b| {
                acc.push_str(&format!("{b:02x}"));
                acc
            });
        }
        let mut stem = base.clone();
        let mut n = 2;
        while !used.insert(stem.clone()) {
            stem = format!("{base}_{n}");
            n += 1;
        }
        stems.push(stem);
    }
    stems
}

/// `Total Coliform` → `total_coliform`, `E.coli` → `e_coli`.
fn file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    stem.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAD_ROUND: &str = "PWSID,Sample_Date,Parameter,Result,Units,MCL,Lab_Cert_Number,Sample_Location,Collection_Time\n\
OH7700001,2025-01-15,Lead,18.2,ppb,15,C1,Tap 1,08:30\n\
OH7700001,2025-01-15,Lead,25.3,ppb,15,C1,Tap 2,08:45\n\
OH7700001,2025-01-15,E.coli,Present,,0,C1,Well,09:00\n";

    fn args(samples: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            samples,
            pwsid: None,
            system_record: None,
            pack: None,
            report_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            narrative: false,
            json: false,
            strict: false,
        }
    }

    #[test]
    fn file_stems() {
        assert_eq!(file_stem("Total Coliform"), "total_coliform");
        assert_eq!(file_stem("E.coli"), "e_coli");
        assert_eq!(file_stem("PFOA"), "pfoa");
    }

    #[test]
    fn notice_stems_are_distinct() {
        let stems = notice_stems(["Radium 226", "Radium-226", "Lead", "Radium_226"]);
        assert_eq!(stems, vec!["radium_226", "radium_226_2", "lead", "radium_226_3"]);

        let stems = notice_stems(["\u{6c5e}", "\u{6c5e}", "-"]);
        assert_eq!(stems, vec!["xe6b19e", "xe6b19e_2", "x2d"]);
    }

    #[test]
    fn json_stdout_is_one_document() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("round.csv");
        std::fs::write(&samples, LEAD_ROUND).unwrap();
        let config = CliConfig::default();
        let lab = read_lab_file(&samples).unwrap();
        let outcome = sdwa_compliance::run_analysis(
            &lab.samples(),
            &sdwa_pack::RegulatoryPack::epa_default(),
            &config.placeholder_for("OH7700001"),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        );
        let digest = outcome.report_digest().unwrap().to_string();

        let text = render_stdout(&outcome, true).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["report_digest"], digest.as_str());
        assert!(digest.starts_with("sha256:"));
        assert_eq!(doc["report"]["total_violations"], 3);
        assert!(doc["findings"]["Lead"].is_array());
        assert!(!text.contains("Report digest:"));

        let summary = render_stdout(&outcome, false).unwrap();
        assert!(summary.ends_with(&format!("Report digest: {digest}\n")));
    }

    #[test]
    fn analyze_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("round.csv");
        std::fs::write(&samples, LEAD_ROUND).unwrap();
        let out = dir.path().join("out");
        let config = CliConfig {
            output_dir: Some(out.clone()),
            ..CliConfig::default()
        };

        let code = run_analyze(&args(samples.clone()), &config).unwrap();
        assert_eq!(code, 0);

        let notice = std::fs::read_to_string(out.join("notices").join("e_coli.txt")).unwrap();
        assert!(notice.starts_with("IMMEDIATE PUBLIC NOTICE - TIER 1 VIOLATION"));
        assert!(out.join("notices").join("lead.txt").exists());

        let report: serde_json::Value =
            serde_json::from_slice(&std::fs::read(out.join("federal_report.json")).unwrap()).unwrap();
        assert_eq!(report["pwsid"], "OH7700001");
        assert_eq!(report["total_violations"], 3);
        assert_eq!(report["report_date"], "2025-02-01");
        assert_eq!(report["system_data_source"], "fallback");

        let mut strict = args(samples);
        strict.strict = true;
        assert_eq!(run_analyze(&strict, &CliConfig::default()).unwrap(), 2);
    }

    #[test]
    fn analyze_uses_cached_record() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("round.csv");
        std::fs::write(&samples, LEAD_ROUND).unwrap();
        let record = dir.path().join("system.json");
        std::fs::write(
            &record,
            r#"{"PWSID": "OH7700001", "PWS_NAME": "Clinton Machine PWS", "POPULATION_SERVED_COUNT": 250}"#,
        )
        .unwrap();

        let system = resolve_system("OH7700001", Some(&record), &CliConfig::default());
        assert_eq!(system.system_name, "Clinton Machine PWS");
        assert_eq!(system.data_source, sdwa_core::DataSource::Cached);

        let missing = resolve_system("OH7700001", Some(&dir.path().join("none.json")), &CliConfig::default());
        assert_eq!(missing.system_name, "Unknown Water System");
        assert_eq!(missing.data_source, sdwa_core::DataSource::Fallback);
    }

    #[test]
    fn analyze_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_analyze(&args(dir.path().join("absent.csv")), &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read laboratory file"));
    }
}

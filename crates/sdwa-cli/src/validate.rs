//! # Validate Subcommand
//!
//! Checks a laboratory export's data quality and a regulatory pack's
//! consistency without running an analysis.
//!
//! ```bash
//! sdwa validate results.csv
//! sdwa validate --pack packs/ohio.yaml
//! sdwa validate results.csv --pack packs/ohio.yaml --json
//! ```
//!
//! Exit status is 1 when either check fails.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use sdwa_compliance::{validate_data_quality, QualityReport};
use sdwa_pack::{validate_pack, PackError, PackValidationResult, RegulatoryPack};

use crate::config::CliConfig;
use crate::input::read_lab_file;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Laboratory results file to score.
    pub samples: Option<PathBuf>,

    /// Regulatory pack YAML to check. Defaults to the configured pack, or
    /// the built-in EPA pack.
    #[arg(long)]
    pub pack: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ValidationOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    data_quality: Option<QualityReport>,
    pack: PackValidationResult,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let data_quality = match &args.samples {
        Some(path) => {
            let lab = read_lab_file(path)?;
            Some(validate_data_quality(&lab.columns, &lab.rows))
        }
        None => None,
    };
    let pack = check_pack(args.pack.as_ref().or(config.pack.as_ref()))?;

    let ok = pack.is_valid && data_quality.as_ref().map(|q| q.valid).unwrap_or(true);
    let output = ValidationOutput { data_quality, pack };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text(&output);
    }
    Ok(if ok { 0 } else { 1 })
}

/// Load and validate a pack, turning validation rejections into a result
/// instead of an error. Unreadable or unparseable packs are still errors.
fn check_pack(path: Option<&PathBuf>) -> Result<PackValidationResult> {
    let Some(path) = path else {
        return Ok(validate_pack(&RegulatoryPack::epa_default()));
    };
    match RegulatoryPack::load(path) {
        Ok(pack) => Ok(validate_pack(&pack)),
        Err(PackError::Invalid(errors)) => {
            let mut result = PackValidationResult::ok();
            for e in errors {
                result.add_error(e);
            }
            Ok(result)
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("failed to load pack: {}", path.display()))),
    }
}

fn print_text(output: &ValidationOutput) {
    if let Some(q) = &output.data_quality {
        println!(
            "Data quality: {}/100 ({}, {} rows)",
            q.quality_score,
            if q.valid { "valid" } else { "INVALID" },
            q.rows
        );
        for issue in &q.issues {
            println!("  ISSUE    {issue}");
        }
        for warning in &q.warnings {
            println!("  WARNING  {warning}");
        }
    }
    let p = &output.pack;
    println!("Regulatory pack: {}", if p.is_valid { "valid" } else { "INVALID" });
    for e in &p.errors {
        println!("  ERROR    {e}");
    }
    for w in &p.warnings {
        println!("  WARNING  {w}");
    }
}

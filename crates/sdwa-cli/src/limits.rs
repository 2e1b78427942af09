//! # Limits Subcommand
//!
//! Prints the limit and notification-requirement tables of the active
//! regulatory pack.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use sdwa_pack::RegulatoryPack;

use crate::config::CliConfig;

/// Arguments for the limits subcommand.
#[derive(Args, Debug)]
pub struct LimitsArgs {
    /// Regulatory pack YAML. Defaults to the built-in EPA pack.
    #[arg(long)]
    pub pack: Option<PathBuf>,

    /// Print the pack as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the limits subcommand.
pub fn run_limits(args: &LimitsArgs, config: &CliConfig) -> Result<u8> {
    let pack = config.resolve_pack(args.pack.as_deref())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&pack)?);
    } else {
        print!("{}", render_tables(&pack));
    }
    Ok(0)
}

fn render_tables(pack: &RegulatoryPack) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>10} {:<6} {:<14} {:<6} {}\n",
        "PARAMETER", "LIMIT", "UNIT", "KIND", "TIER", "HIGH ABOVE"
    ));
    for limit in pack.limits.iter() {
        let value = if limit.is_zero_tolerance() {
            "0 (P/A)".to_string()
        } else {
            limit.limit_value.to_string()
        };
        let threshold = if limit.is_zero_tolerance() {
            "-".to_string()
        } else {
            format!("{}x", limit.effective_high_threshold())
        };
        out.push_str(&format!(
            "{:<16} {:>10} {:<6} {:<14} {:<6} {}\n",
            limit.parameter.as_str(),
            value,
            limit.unit,
            limit.kind.label(),
            limit.tier.as_str(),
            threshold
        ));
    }
    out.push('\n');
    out.push_str("NOTIFICATION REQUIREMENTS\n");
    for requirement in pack.requirements.iter() {
        out.push_str(&format!(
            "  {}: {}\n",
            requirement.tier.as_str(),
            requirement.summary()
        ));
    }
    out
}

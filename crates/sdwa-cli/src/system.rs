//! # System Subcommand
//!
//! Resolves a water system record and prints the header an analysis would
//! use, including the fallback when no record resolves.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sdwa_core::Pwsid;
use sdwa_sdwis::{lookup_or_placeholder, CachedRecordLookup, LookupError, SystemLookup};

use crate::config::CliConfig;

/// Arguments for the system subcommand.
#[derive(Args, Debug)]
pub struct SystemArgs {
    /// Water system identifier.
    pub pwsid: String,

    /// Saved system record file, or a directory of `<PWSID>.json` records.
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Fail instead of falling back to the placeholder header.
    #[arg(long)]
    pub require: bool,

    /// Print the header as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the system subcommand.
pub fn run_system(args: &SystemArgs, config: &CliConfig) -> Result<u8> {
    let pwsid = Pwsid::new(&args.pwsid).with_context(|| format!("invalid PWSID {:?}", args.pwsid))?;
    let records = args.records.as_ref().or(config.system_records.as_ref());

    let header = match records {
        Some(path) => {
            let lookup = CachedRecordLookup::new(path);
            if args.require {
                lookup
                    .lookup(&pwsid)
                    .with_context(|| format!("failed to resolve system {pwsid}"))?
            } else {
                lookup_or_placeholder(&lookup, &pwsid, config.placeholder_for(pwsid.as_str()))
            }
        }
        None if args.require => {
            return Err(LookupError::NotFound(pwsid.to_string()))
                .context("no system record source configured (use --records)");
        }
        None => config.placeholder_for(pwsid.as_str()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&header)?);
    } else {
        println!("{}", header.header_line());
        println!("  Population served: {}", header.population_display());
        println!("  System type:       {}", header.system_type);
        println!("  Location:          {}", header.location);
        println!("  Data source:       {}", header.data_source);
    }
    Ok(0)
}

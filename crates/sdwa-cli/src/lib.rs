//! # sdwa-cli — Command-Line Interface for the SDWA Violation Engine
//!
//! Provides the `sdwa` binary. Argument parsing lives here; every
//! determination is delegated to `sdwa-compliance`, `sdwa-pack` and
//! `sdwa-sdwis`.
//!
//! ## Subcommands
//!
//! - `sdwa analyze`: Detect violations, classify severity, render notices
//!   and the federal report for one laboratory export.
//! - `sdwa validate`: Data-quality score for an export and consistency
//!   check for a regulatory pack.
//! - `sdwa limits`: Print the active limit and requirement tables.
//! - `sdwa system`: Resolve a water system record.
//!
//! ```bash
//! sdwa analyze results.csv --pwsid OH7700001 --output-dir out/
//! sdwa validate results.csv --pack packs/ohio.yaml
//! sdwa limits --json
//! sdwa system OH7700001 --records records/
//! ```
//!
//! ## Crate Policy
//!
//! - `anyhow` for errors, with context on every file operation.
//! - Handlers return the process exit status as `Result<u8>`.
//! - Logs go to stderr so stdout stays machine-readable under `--json`.

pub mod analyze;
pub mod config;
pub mod input;
pub mod limits;
pub mod system;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_modules_are_accessible() {
        let _ = std::any::type_name::<analyze::AnalyzeArgs>();
        let _ = std::any::type_name::<config::CliConfig>();
        let _ = std::any::type_name::<input::LabFile>();
        let _ = std::any::type_name::<limits::LimitsArgs>();
        let _ = std::any::type_name::<system::SystemArgs>();
        let _ = std::any::type_name::<validate::ValidateArgs>();
    }
}

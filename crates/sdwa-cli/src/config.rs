//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every field may also be set
//! by a flag; flags win.
//!
//! ```yaml
//! pack: packs/ohio.yaml
//! output_dir: out/
//! system_records: records/
//! narrative: true
//! placeholder:
//!   system_name: Clinton Machine PWS
//!   identifier: OH7700001
//!   population_served: 250
//!   system_type: NTNCWS
//!   location: OH
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use sdwa_core::SystemHeader;
use sdwa_pack::RegulatoryPack;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Regulatory pack YAML; the built-in EPA pack when absent.
    #[serde(default)]
    pub pack: Option<PathBuf>,

    /// Directory receiving reports and notices.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Saved system record file or directory of `<PWSID>.json` records.
    #[serde(default)]
    pub system_records: Option<PathBuf>,

    /// Header used when no system record resolves.
    #[serde(default)]
    pub placeholder: Option<SystemHeader>,

    /// Attach the built-in narrative summary to analyses.
    #[serde(default)]
    pub narrative: bool,
}

impl CliConfig {
    /// Load from YAML. Relative paths inside the file resolve against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for p in [&mut config.pack, &mut config.output_dir, &mut config.system_records]
            .into_iter()
            .flatten()
        {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
        tracing::debug!(path = %path.display(), "loaded CLI configuration");
        Ok(config)
    }

    /// `flag` if given, else the configured pack, else the built-in pack.
    pub fn resolve_pack(&self, flag: Option<&Path>) -> Result<RegulatoryPack> {
        match flag.or(self.pack.as_deref()) {
            Some(path) => RegulatoryPack::load(path)
                .with_context(|| format!("failed to load regulatory pack: {}", path.display())),
            None => Ok(RegulatoryPack::epa_default()),
        }
    }

    /// Placeholder header for `identifier`.
    pub fn placeholder_for(&self, identifier: &str) -> SystemHeader {
        match &self.placeholder {
            Some(p) => SystemHeader {
                identifier: identifier.to_string(),
                ..p.clone()
            },
            None => SystemHeader::placeholder(identifier),
        }
    }
}

//! # System Lookup
//!
//! [`SystemLookup`] resolves a PWSID to a [`SystemHeader`]. Two
//! implementations ship here:
//!
//! - [`CachedRecordLookup`] reads saved JSON records, either one file or a
//!   directory of `<PWSID>.json` files.
//! - [`InMemoryLookup`] serves headers from a map, for tests and for
//!   callers that already hold the inventory.
//!
//! Analyses go through [`lookup_or_placeholder`], which never fails.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sdwa_core::{DataSource, Pwsid, SystemHeader};

use crate::error::LookupError;
use crate::normalize::normalize_system_record;

/// Resolves a water system's identity.
pub trait SystemLookup: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn lookup(&self, pwsid: &Pwsid) -> Result<SystemHeader, LookupError>;
}

/// Look up `pwsid`, substituting `placeholder` on any failure.
pub fn lookup_or_placeholder(
    lookup: &dyn SystemLookup,
    pwsid: &Pwsid,
    placeholder: SystemHeader,
) -> SystemHeader {
    match lookup.lookup(pwsid) {
        Ok(header) => {
            tracing::info!(
                lookup = lookup.name(),
                %pwsid,
                system = %header.system_name,
                "system record resolved"
            );
            header
        }
        Err(e) => {
            tracing::warn!(
                lookup = lookup.name(),
                %pwsid,
                error = %e,
                "system lookup failed; using placeholder"
            );
            SystemHeader {
                data_source: DataSource::Fallback,
                ..placeholder
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Cached JSON records
// ---------------------------------------------------------------------------

/// Reads saved system records from disk.
///
/// If `path` is a directory, the record for `OH7700001` is
/// `path/OH7700001.json`. Otherwise `path` is a single record file and is
/// returned for any PWSID it does not contradict.
#[derive(Debug, Clone)]
pub struct CachedRecordLookup {
    path: PathBuf,
}

impl CachedRecordLookup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record_path(&self, pwsid: &Pwsid) -> PathBuf {
        if self.path.is_dir() {
            self.path.join(format!("{pwsid}.json"))
        } else {
            self.path.clone()
        }
    }
}

impl SystemLookup for CachedRecordLookup {
    fn name(&self) -> &str {
        "cached"
    }

    fn lookup(&self, pwsid: &Pwsid) -> Result<SystemHeader, LookupError> {
        let path = self.record_path(pwsid);
        let bytes = std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LookupError::NotFound(pwsid.to_string())
            } else {
                LookupError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let raw: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|source| LookupError::Parse {
                path: path.clone(),
                source,
            })?;
        let empty = match &raw {
            serde_json::Value::Array(items) => items.is_empty(),
            serde_json::Value::Object(map) => map.is_empty(),
            _ => true,
        };
        if empty {
            return Err(LookupError::Empty(pwsid.to_string()));
        }

        let header = normalize_system_record(&raw, pwsid.as_str(), DataSource::Cached);
        if !header.identifier.eq_ignore_ascii_case(pwsid.as_str()) {
            return Err(LookupError::NotFound(pwsid.to_string()));
        }
        tracing::debug!(path = %path.display(), %pwsid, "cached system record loaded");
        Ok(header)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Serves headers from a map keyed by PWSID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookup {
    systems: BTreeMap<Pwsid, SystemHeader>,
}

impl InMemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, pwsid: Pwsid, header: SystemHeader) -> Self {
        self.systems.insert(pwsid, header);
        self
    }
}

impl SystemLookup for InMemoryLookup {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn lookup(&self, pwsid: &Pwsid) -> Result<SystemHeader, LookupError> {
        self.systems
            .get(pwsid)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(pwsid.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pwsid() -> Pwsid {
        Pwsid::new("OH7700001").unwrap()
    }

    #[test]
    fn test_cached_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");
        std::fs::write(
            &path,
            r#"[{"PWSID": "OH7700001", "PWS_NAME": "Clinton Machine PWS", "POPULATION_SERVED_COUNT": 250}]"#,
        )
        .unwrap();

        let header = CachedRecordLookup::new(&path).lookup(&pwsid()).unwrap();
        assert_eq!(header.system_name, "Clinton Machine PWS");
        assert_eq!(header.population_served, Some(250));
        assert_eq!(header.data_source, DataSource::Cached);
    }

    #[test]
    fn test_cached_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("OH7700001.json"),
            r#"{"pws_name": "Springfield", "state_code": "OH"}"#,
        )
        .unwrap();

        let lookup = CachedRecordLookup::new(dir.path());
        let header = lookup.lookup(&pwsid()).unwrap();
        assert_eq!(header.identifier, "OH7700001");
        assert_eq!(header.location, "OH");

        let other = Pwsid::new("OH1111111").unwrap();
        assert!(matches!(lookup.lookup(&other), Err(LookupError::NotFound(_))));
    }

    #[test]
    fn test_cached_record_for_other_system_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");
        std::fs::write(&path, r#"{"pwsid": "OH1111111", "pws_name": "Elsewhere"}"#).unwrap();
        let err = CachedRecordLookup::new(&path).lookup(&pwsid()).unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[test]
    fn test_cached_parse_and_empty_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(
            CachedRecordLookup::new(&bad).lookup(&pwsid()),
            Err(LookupError::Parse { .. })
        ));

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "[]").unwrap();
        assert!(matches!(
            CachedRecordLookup::new(&empty).lookup(&pwsid()),
            Err(LookupError::Empty(_))
        ));
    }

    #[test]
    fn test_placeholder_on_failure() {
        let mut placeholder = SystemHeader::placeholder("OH7700001");
        placeholder.system_name = "Clinton Machine PWS".to_string();
        placeholder.population_served = Some(250);

        let header = lookup_or_placeholder(&InMemoryLookup::new(), &pwsid(), placeholder.clone());
        assert_eq!(header, placeholder);
        assert_eq!(header.data_source, DataSource::Fallback);
    }

    #[test]
    fn test_in_memory_hit() {
        let mut known = SystemHeader::placeholder("OH7700001");
        known.system_name = "Known".to_string();
        known.data_source = DataSource::Api;
        let lookup = InMemoryLookup::new().with_system(pwsid(), known.clone());
        let header = lookup_or_placeholder(&lookup, &pwsid(), SystemHeader::placeholder("OH7700001"));
        assert_eq!(header, known);
    }

    #[test]
    fn test_error_messages() {
        let e = LookupError::NotFound("OH7700001".to_string());
        assert_eq!(e.to_string(), "no system record for OH7700001");
    }
}

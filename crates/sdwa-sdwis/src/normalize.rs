//! # System Record Normalization
//!
//! Regulators publish the same inventory record under several spellings:
//! `pws_name` or `PWS_NAME`, a bare object or a one-element array, and
//! sometimes nested under `system_info`. [`normalize_system_record`]
//! accepts all of them and produces a [`SystemHeader`].
//!
//! | Header field | Accepted keys |
//! |--------------|---------------|
//! | `identifier` | `pwsid`, `PWSID` |
//! | `system_name` | `pws_name`, `PWS_NAME`, `system_name` |
//! | `population_served` | `population_served_count`, `POPULATION_SERVED_COUNT`, `population_served` |
//! | `system_type` | `pws_type_code`, `PWS_TYPE_CODE`, `system_type` |
//! | `location` | `city_name`, `county_name`, `state_code` (either case) |
//!
//! Location renders as `City, County County, ST`, skipping missing parts.

use serde_json::Value;

use sdwa_core::{DataSource, SystemHeader};

const UNKNOWN: &str = "Unknown";

/// Normalize a raw system record. Missing fields fall back to the
/// placeholder values; a missing identifier falls back to `fallback_id`.
pub fn normalize_system_record(raw: &Value, fallback_id: &str, source: DataSource) -> SystemHeader {
    let record = unwrap_record(raw);

    let mut header = SystemHeader::placeholder(
        text(record, &["pwsid", "PWSID"]).unwrap_or_else(|| fallback_id.to_string()),
    );
    header.data_source = source;
    if let Some(name) = text(record, &["pws_name", "PWS_NAME", "system_name"]) {
        header.system_name = name;
    }
    header.population_served = field(
        record,
        &["population_served_count", "POPULATION_SERVED_COUNT", "population_served"],
    )
    .and_then(population);
    if let Some(kind) = text(record, &["pws_type_code", "PWS_TYPE_CODE", "system_type"]) {
        header.system_type = kind;
    }
    header.location = location(record);
    header
}

/// Peel `[record]` and `{"system_info": record}` wrappers.
fn unwrap_record(raw: &Value) -> &Value {
    match raw {
        Value::Array(items) => items.first().map(unwrap_record).unwrap_or(raw),
        Value::Object(map) => match map.get("system_info") {
            Some(inner @ Value::Object(_)) => inner,
            _ => raw,
        },
        _ => raw,
    }
}

fn field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !v.is_null())
}

fn text(record: &Value, keys: &[&str]) -> Option<String> {
    let value = field(record, keys)?;
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Coerce a population cell. Accepts integers, non-negative floats and
/// digit strings with optional thousands separators.
fn population(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => {
            let digits: String = s.trim().chars().filter(|c| *c != ',').collect();
            digits.parse::<u64>().ok()
        }
        _ => None,
    }
}

fn location(record: &Value) -> String {
    let city = text(record, &["city_name", "CITY_NAME"]);
    let county = text(record, &["county_name", "COUNTY_NAME"]).map(|c| format!("{c} County"));
    let state = text(record, &["state_code", "STATE_CODE"]);
    let parts: Vec<String> = [city, county, state]
        .into_iter()
        .flatten()
        .filter(|p| !p.starts_with(UNKNOWN))
        .collect();
    if parts.is_empty() {
        UNKNOWN.to_string()
    } else {
        parts.join(", ")
    }
}

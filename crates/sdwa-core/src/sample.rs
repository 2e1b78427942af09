//! # Samples — Laboratory Measurements
//!
//! Two layers:
//!
//! - [`LabRow`] mirrors one row of a laboratory export exactly as it
//!   arrived: every column optional, every cell a string. It exists so that
//!   data-quality checks can see what was missing before anything is
//!   interpreted.
//! - [`SampleRecord`] is the typed measurement the detector consumes. Its
//!   [`SampleValue`] has already separated numbers from presence/absence
//!   results and from garbage.
//!
//! Conversion from row to record never fails on a bad result cell: the
//! value becomes [`SampleValue::Unreadable`] and the detector decides what
//! to do with it. Only a missing or blank parameter name drops the row.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parameter::Parameter;
use crate::temporal;

/// Location recorded when a lab row leaves `Sample_Location` blank.
pub const UNKNOWN_LOCATION: &str = "Unknown";

// ---------------------------------------------------------------------------
// SampleValue
// ---------------------------------------------------------------------------

/// The result cell of a laboratory measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    /// A finite, non-negative concentration.
    Numeric(f64),
    /// Presence/absence test came back positive.
    Present,
    /// Presence/absence test came back negative.
    Absent,
    /// Anything else, kept verbatim for diagnostics.
    Unreadable(String),
}

const PRESENT_WORDS: &[&str] = &["present", "positive", "detected", "p", "+"];
const ABSENT_WORDS: &[&str] = &["absent", "negative", "not detected", "nd", "a", "-"];

impl SampleValue {
    /// Interpret a raw result cell.
    ///
    /// Presence words are matched case-insensitively. Numbers must be finite
    /// and non-negative; negative readings, `NaN`, censored values such as
    /// `<0.5`, and free text all become [`SampleValue::Unreadable`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if PRESENT_WORDS.contains(&lower.as_str()) {
            return Self::Present;
        }
        if ABSENT_WORDS.contains(&lower.as_str()) {
            return Self::Absent;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Self::from_number(v).unwrap_or_else(|| Self::Unreadable(raw.to_string())),
            Err(_) => Self::Unreadable(raw.to_string()),
        }
    }

    /// Wrap a number, rejecting negatives and non-finite values.
    pub fn from_number(v: f64) -> Option<Self> {
        (v.is_finite() && v >= 0.0).then_some(Self::Numeric(v))
    }

    /// The numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this is a positive presence/absence result.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

impl std::fmt::Display for SampleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Present => f.write_str("Present"),
            Self::Absent => f.write_str("Absent"),
            Self::Unreadable(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for SampleValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Numeric(v) => serializer.serialize_f64(*v),
            Self::Present => serializer.serialize_str("Present"),
            Self::Absent => serializer.serialize_str("Absent"),
            Self::Unreadable(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for SampleValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ValueVisitor;

        impl serde::de::Visitor<'_> for ValueVisitor {
            type Value = SampleValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a number or a result string")
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<SampleValue, E> {
                Ok(SampleValue::from_number(v)
                    .unwrap_or_else(|| SampleValue::Unreadable(v.to_string())))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<SampleValue, E> {
                self.visit_f64(v as f64)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<SampleValue, E> {
                self.visit_f64(v as f64)
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<SampleValue, E> {
                Ok(if v { SampleValue::Present } else { SampleValue::Absent })
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<SampleValue, E> {
                Ok(SampleValue::parse(v))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<SampleValue, E> {
                Ok(SampleValue::Unreadable(String::new()))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// ---------------------------------------------------------------------------
// SampleRecord
// ---------------------------------------------------------------------------

/// One laboratory measurement, ready for detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub parameter: Parameter,
    pub result: SampleValue,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "unknown_location")]
    pub sample_location: String,
    #[serde(default)]
    pub collection_time: Option<NaiveDateTime>,
}

fn unknown_location() -> String {
    UNKNOWN_LOCATION.to_string()
}

impl SampleRecord {
    /// A sample with no unit, an unknown location and no collection time.
    pub fn new(parameter: Parameter, result: SampleValue) -> Self {
        Self {
            parameter,
            result,
            unit: String::new(),
            sample_location: unknown_location(),
            collection_time: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.sample_location = location.into();
        self
    }

    pub fn collected_at(mut self, at: NaiveDateTime) -> Self {
        self.collection_time = Some(at);
        self
    }
}

// ---------------------------------------------------------------------------
// LabRow
// ---------------------------------------------------------------------------

/// A raw laboratory-export row. Column names follow the export headers
/// (`PWSID`, `Sample_Date`, `Parameter`, ...); snake_case spellings are
/// accepted too. Numeric cells are kept as their textual rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabRow {
    #[serde(default, alias = "PWSID", deserialize_with = "lenient_cell")]
    pub pwsid: Option<String>,
    #[serde(default, alias = "Sample_Date", deserialize_with = "lenient_cell")]
    pub sample_date: Option<String>,
    #[serde(default, alias = "Parameter", deserialize_with = "lenient_cell")]
    pub parameter: Option<String>,
    #[serde(default, alias = "Result", deserialize_with = "lenient_cell")]
    pub result: Option<String>,
    #[serde(default, alias = "Units", alias = "unit", deserialize_with = "lenient_cell")]
    pub units: Option<String>,
    #[serde(default, alias = "MCL", deserialize_with = "lenient_cell")]
    pub mcl: Option<String>,
    #[serde(default, alias = "Lab_Cert_Number", deserialize_with = "lenient_cell")]
    pub lab_cert_number: Option<String>,
    #[serde(default, alias = "Sample_Location", alias = "location", deserialize_with = "lenient_cell")]
    pub sample_location: Option<String>,
    #[serde(default, alias = "Collection_Time", deserialize_with = "lenient_cell")]
    pub collection_time: Option<String>,
}

/// Accept strings, numbers and booleans; blank strings and nulls are `None`.
fn lenient_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => non_blank(&s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

impl LabRow {
    /// Build a row from a header → cell mapping (e.g. a CSV record).
    /// Unrecognized headers are ignored.
    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row = Self::default();
        for (header, cell) in cells {
            let value = non_blank(cell);
            match header.trim().to_ascii_lowercase().as_str() {
                "pwsid" => row.pwsid = value,
                "sample_date" => row.sample_date = value,
                "parameter" => row.parameter = value,
                "result" => row.result = value,
                "units" | "unit" => row.units = value,
                "mcl" => row.mcl = value,
                "lab_cert_number" => row.lab_cert_number = value,
                "sample_location" | "location" => row.sample_location = value,
                "collection_time" => row.collection_time = value,
                _ => {}
            }
        }
        row
    }

    /// Interpret the row as a [`SampleRecord`].
    ///
    /// Returns `None` only when the parameter cell is missing or blank. A
    /// missing result becomes `Unreadable("")`.
    pub fn to_sample_record(&self) -> Option<SampleRecord> {
        let parameter = Parameter::new(self.parameter.as_deref()?).ok()?;
        let result = self
            .result
            .as_deref()
            .map(SampleValue::parse)
            .unwrap_or_else(|| SampleValue::Unreadable(String::new()));
        Some(SampleRecord {
            parameter,
            result,
            unit: self.units.clone().unwrap_or_default(),
            sample_location: self
                .sample_location
                .clone()
                .unwrap_or_else(unknown_location),
            collection_time: temporal::parse_collection_time(
                self.sample_date.as_deref(),
                self.collection_time.as_deref(),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::names;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(SampleValue::parse("18.2"), SampleValue::Numeric(18.2));
        assert_eq!(SampleValue::parse(" 0 "), SampleValue::Numeric(0.0));
    }

    #[test]
    fn test_parse_presence_words() {
        assert_eq!(SampleValue::parse("Present"), SampleValue::Present);
        assert_eq!(SampleValue::parse("POSITIVE"), SampleValue::Present);
        assert_eq!(SampleValue::parse("Absent"), SampleValue::Absent);
        assert_eq!(SampleValue::parse("not detected"), SampleValue::Absent);
    }

    #[test]
    fn test_parse_unreadable_keeps_raw() {
        for raw in ["N/A", "<0.5", "-3.0", "NaN", "inf", ""] {
            assert_eq!(
                SampleValue::parse(raw),
                SampleValue::Unreadable(raw.to_string()),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let v: SampleValue = serde_json::from_str("22.1").unwrap();
        assert_eq!(v, SampleValue::Numeric(22.1));
        let v: SampleValue = serde_json::from_str("1400").unwrap();
        assert_eq!(v, SampleValue::Numeric(1400.0));
        let v: SampleValue = serde_json::from_str("\"Present\"").unwrap();
        assert_eq!(v, SampleValue::Present);
        let v: SampleValue = serde_json::from_str("-1").unwrap();
        assert!(matches!(v, SampleValue::Unreadable(_)));
    }

    #[test]
    fn test_serialize_forms() {
        assert_eq!(serde_json::to_string(&SampleValue::Numeric(8.2)).unwrap(), "8.2");
        assert_eq!(serde_json::to_string(&SampleValue::Present).unwrap(), "\"Present\"");
        assert_eq!(
            serde_json::to_string(&SampleValue::Unreadable("N/A".into())).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn test_lab_row_from_export_headers() {
        let json = serde_json::json!({
            "PWSID": "OH7700001",
            "Sample_Date": "2025-01-15",
            "Parameter": "PB90",
            "Result": 25.3,
            "Units": "ppb",
            "MCL": 15,
            "Lab_Cert_Number": "",
            "Sample_Location": "Kitchen tap, 12 Elm St",
            "Collection_Time": "09:15"
        });
        let row: LabRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.result.as_deref(), Some("25.3"));
        assert_eq!(row.mcl.as_deref(), Some("15"));
        assert_eq!(row.lab_cert_number, None);

        let record = row.to_sample_record().unwrap();
        assert_eq!(record.parameter.as_str(), names::LEAD);
        assert_eq!(record.result, SampleValue::Numeric(25.3));
        assert_eq!(record.unit, "ppb");
        assert_eq!(record.sample_location, "Kitchen tap, 12 Elm St");
        assert_eq!(
            record.collection_time.map(|t| temporal::format_collection_time(&t)),
            Some("2025-01-15 09:15".to_string())
        );
    }

    #[test]
    fn test_lab_row_from_cells() {
        let row = LabRow::from_cells([
            ("Parameter", "E.coli"),
            ("Result", "Present"),
            ("Sample_Location", "  "),
            ("Extra_Column", "ignored"),
        ]);
        let record = row.to_sample_record().unwrap();
        assert_eq!(record.result, SampleValue::Present);
        assert_eq!(record.sample_location, UNKNOWN_LOCATION);
        assert_eq!(record.collection_time, None);
    }

    #[test]
    fn test_row_without_parameter_is_dropped() {
        let row = LabRow::from_cells([("Result", "12")]);
        assert!(row.to_sample_record().is_none());
    }

    #[test]
    fn test_row_without_result_is_unreadable() {
        let row = LabRow::from_cells([("Parameter", "Lead")]);
        let record = row.to_sample_record().unwrap();
        assert_eq!(record.result, SampleValue::Unreadable(String::new()));
    }

    #[test]
    fn test_sample_record_builder() {
        let s = SampleRecord::new(Parameter::from_static(names::COPPER), SampleValue::Numeric(1400.0))
            .with_unit("ppb")
            .with_location("School fountain");
        assert_eq!(s.unit, "ppb");
        assert_eq!(s.sample_location, "School fountain");
    }
}

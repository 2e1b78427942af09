//! Shared fixtures for the cross-crate test suite.

use chrono::{NaiveDate, NaiveDateTime};

use sdwa_core::{Parameter, SampleRecord, SampleValue, SystemHeader};

/// Report date used by every scenario.
pub fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap_or_default()
}

/// `2025-01-<day> <hour>:00`.
pub fn collected(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap_or_default()
}

/// The system every scenario reports for.
pub fn springfield() -> SystemHeader {
    SystemHeader {
        system_name: "Springfield Municipal Water District".to_string(),
        population_served: Some(58_000),
        system_type: "CWS".to_string(),
        location: "Springfield, Clark County, OH".to_string(),
        ..SystemHeader::placeholder("OH7700001")
    }
}

/// One numeric sample for `parameter`.
pub fn numeric(parameter: &str, value: f64) -> SampleRecord {
    sample(parameter, SampleValue::Numeric(value))
}

/// One sample with a raw laboratory result, parsed as the lab wrote it.
pub fn raw(parameter: &str, result: &str) -> SampleRecord {
    sample(parameter, SampleValue::parse(result))
}

fn sample(parameter: &str, result: SampleValue) -> SampleRecord {
    let parameter = Parameter::new(parameter).unwrap_or_else(|_| Parameter::from_static("Unnamed"));
    let location = format!("{parameter} sampling tap");
    SampleRecord::new(parameter, result).with_location(location)
}

/// A laboratory CSV export covering every built-in scenario.
pub const MIXED_ROUND_CSV: &str = "\
PWSID,Sample_Date,Parameter,Result,Units,MCL,Lab_Cert_Number,Sample_Location,Collection_Time
OH7700001,2025-01-15,E.coli,Present,,0,OH-0042,Well house,07:45
OH7700001,2025-01-15,Lead,18.2,ppb,15,OH-0042,101 Elm St,08:30
OH7700001,2025-01-15,Lead,22.1,ppb,15,OH-0042,14 Oak Ave,08:40
OH7700001,2025-01-15,Lead,16.8,ppb,15,OH-0042,9 Pine Rd,08:50
OH7700001,2025-01-15,Lead,25.3,ppb,15,OH-0042,220 Main St,09:00
OH7700001,2025-01-16,Lead,N/A,ppb,15,OH-0042,3 Birch Ln,09:10
OH7700001,2025-01-16,Copper,1400,ppb,1300,OH-0042,101 Elm St,09:20
OH7700001,2025-01-16,Copper,2100,ppb,1300,OH-0042,14 Oak Ave,09:30
OH7700001,2025-01-16,PFOA,8.2,ng/L,4,OH-0042,Plant effluent,10:00
OH7700001,2025-01-16,Chlorine Residual,1.1,mg/L,,OH-0042,Plant effluent,10:05
";

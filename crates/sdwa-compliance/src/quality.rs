//! # Laboratory Data Quality
//!
//! Scores a laboratory export before its rows are interpreted. Issues are
//! problems that make the export unfit for submission; warnings reduce the
//! quality score but leave the export usable.
//!
//! | Check | Outcome |
//! |-------|---------|
//! | required column missing | issue, `valid = false` |
//! | PWSID not `^[A-Z]{2}\d{7}$` | issue |
//! | any lab certification number missing | warning, −10 |
//! | any collection time missing | warning, −5 |
//! | row without a parameter | warning |

use serde::Serialize;

use sdwa_core::{LabRow, Pwsid};

/// Columns a laboratory export must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "PWSID",
    "Sample_Date",
    "Parameter",
    "Result",
    "Units",
    "MCL",
    "Lab_Cert_Number",
];

const MISSING_CERT_PENALTY: u8 = 10;
const MISSING_TIME_PENALTY: u8 = 5;

/// Outcome of [`validate_data_quality`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// 0..=100.
    pub quality_score: u8,
    pub rows: usize,
}

impl Default for QualityReport {
    fn default() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
            warnings: Vec::new(),
            quality_score: 100,
            rows: 0,
        }
    }
}

impl QualityReport {
    fn add_issue(&mut self, msg: impl Into<String>) {
        self.issues.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>, penalty: u8) {
        self.warnings.push(msg.into());
        self.quality_score = self.quality_score.saturating_sub(penalty);
    }
}

/// Validate a laboratory export given its header row and parsed rows.
/// Column names match case-insensitively.
pub fn validate_data_quality<S: AsRef<str>>(columns: &[S], rows: &[LabRow]) -> QualityReport {
    let mut report = QualityReport {
        rows: rows.len(),
        ..QualityReport::default()
    };

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| {
            !columns
                .iter()
                .any(|c| c.as_ref().trim().eq_ignore_ascii_case(required))
        })
        .collect();
    if !missing.is_empty() {
        report.add_issue(format!("Missing required columns: {}", missing.join(", ")));
        report.valid = false;
    }

    let mut invalid_pwsids: Vec<&str> = Vec::new();
    for row in rows {
        let shown = match row.pwsid.as_deref() {
            Some(id) if Pwsid::is_well_formed(id) => continue,
            Some(id) => id,
            None => "<missing>",
        };
        if !invalid_pwsids.contains(&shown) {
            invalid_pwsids.push(shown);
        }
    }
    if !invalid_pwsids.is_empty() {
        report.add_issue(format!("Invalid PWSID format: {}", invalid_pwsids.join(", ")));
    }

    if rows.iter().any(|r| r.lab_cert_number.is_none()) {
        report.add_warning("Missing laboratory certification numbers", MISSING_CERT_PENALTY);
    }
    if rows.iter().any(|r| r.collection_time.is_none()) {
        report.add_warning("Missing collection times", MISSING_TIME_PENALTY);
    }

    let unnamed = rows.iter().filter(|r| r.parameter.is_none()).count();
    if unnamed > 0 {
        report.add_warning(format!("{unnamed} row(s) without a parameter"), 0);
    }

    tracing::info!(
        score = report.quality_score,
        valid = report.valid,
        issues = report.issues.len(),
        warnings = report.warnings.len(),
        "data quality validation complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pwsid: &str, cert: Option<&str>, time: Option<&str>) -> LabRow {
        LabRow {
            pwsid: Some(pwsid.to_string()),
            sample_date: Some("2025-01-15".to_string()),
            parameter: Some("Lead".to_string()),
            result: Some("18.2".to_string()),
            units: Some("ppb".to_string()),
            mcl: Some("15".to_string()),
            lab_cert_number: cert.map(String::from),
            sample_location: Some("Kitchen tap".to_string()),
            collection_time: time.map(String::from),
        }
    }

    fn all_columns() -> Vec<&'static str> {
        let mut cols = REQUIRED_COLUMNS.to_vec();
        cols.push("Collection_Time");
        cols
    }

    #[test]
    fn test_clean_export_scores_100() {
        let rows = vec![row("OH7700001", Some("OH-123"), Some("08:30"))];
        let report = validate_data_quality(&all_columns(), &rows);
        assert!(report.valid);
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.quality_score, 100);
        assert_eq!(report.rows, 1);
    }

    #[test]
    fn test_missing_columns_invalidate() {
        let report = validate_data_quality(&["pwsid", "parameter", "result"], &[]);
        assert!(!report.valid);
        assert_eq!(
            report.issues,
            vec!["Missing required columns: Sample_Date, Units, MCL, Lab_Cert_Number".to_string()]
        );
    }

    #[test]
    fn test_invalid_pwsid_is_issue_but_still_valid() {
        let rows = vec![
            row("OH7700001", Some("C"), Some("08:30")),
            row("oh77", Some("C"), Some("08:30")),
            row("oh77", Some("C"), Some("08:30")),
        ];
        let report = validate_data_quality(&all_columns(), &rows);
        assert!(report.valid);
        assert_eq!(report.issues, vec!["Invalid PWSID format: oh77".to_string()]);
    }

    #[test]
    fn test_penalties() {
        let rows = vec![
            row("OH7700001", None, Some("08:30")),
            row("OH7700001", Some("C"), None),
            row("OH7700001", None, None),
        ];
        let report = validate_data_quality(&all_columns(), &rows);
        assert_eq!(report.quality_score, 85);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_missing_pwsid_reported() {
        let mut r = row("OH7700001", Some("C"), Some("08:30"));
        r.pwsid = None;
        let report = validate_data_quality(&all_columns(), &[r]);
        assert_eq!(report.issues, vec!["Invalid PWSID format: <missing>".to_string()]);
    }

    #[test]
    fn test_rows_without_parameter_warned() {
        let mut r = row("OH7700001", Some("C"), Some("08:30"));
        r.parameter = None;
        let report = validate_data_quality(&all_columns(), &[r]);
        assert_eq!(report.warnings, vec!["1 row(s) without a parameter".to_string()]);
        assert_eq!(report.quality_score, 100);
    }
}

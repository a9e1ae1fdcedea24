use crate::app::state::picker::OptionValue;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttendanceStatus {
    #[default]
    Unmarked,
    Present,
    Absent,
    Leave,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Leave,
        AttendanceStatus::Unmarked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Unmarked => "unmarked",
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Leave => "leave",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Unmarked => "Unmarked",
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Leave => "On leave",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AttendanceRecord {
    pub name: String,
    #[serde(rename = "class", default)]
    pub class_id: OptionValue,
    #[serde(default)]
    pub month: OptionValue,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub leave_type: Option<OptionValue>,
}

/// Unknown, misspelt or missing statuses read as unmarked instead of failing the file.
fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AttendanceStatus, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(AttendanceStatus::parse)
        .unwrap_or_default())
}

/// The already-fetched payload a roster screen works from.
///
/// Option sections stay raw JSON: a section that is not an array (an error
/// object from a failed fetch, say) shows up as an empty picker rather than
/// failing the whole load.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SchoolData {
    pub classes: Value,
    pub months: Value,
    pub leave_types: Value,
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Debug)]
pub enum DataError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
}

impl DataError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            DataError::Parse(error) => write!(f, "invalid school data: {error}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io { source, .. } => Some(source),
            DataError::Parse(error) => Some(error),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(error: serde_json::Error) -> Self {
        DataError::Parse(error)
    }
}

pub fn parse_school_data(text: &str) -> Result<SchoolData, DataError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_school_data(path: &Path) -> Result<SchoolData, DataError> {
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_school_data(&text)
}

#[cfg(test)]
mod tests {
    use super::{load_school_data, parse_school_data, AttendanceStatus, DataError};
    use crate::app::state::picker::{options_from_json, OptionValue, PickerOption};
    use std::path::Path;

    const SAMPLE: &str = r#"{
        "classes": [{ "label": "Grade 5A", "value": "5a" }, "6b"],
        "months": [{ "label": "October", "value": 10 }],
        "attendance": [
            { "name": "Asha Rao", "class": "5a", "month": "10", "status": "present" },
            { "name": "Ravi Iyer", "class": "5a", "month": 10 }
        ]
    }"#;

    #[test]
    fn parse_school_data_reads_mixed_shapes() {
        let data = parse_school_data(SAMPLE).expect("sample parses");
        assert_eq!(
            options_from_json(&data.classes),
            vec![
                PickerOption::new("Grade 5A", "5a"),
                PickerOption::new("6b", "6b")
            ]
        );
        assert!(options_from_json(&data.leave_types).is_empty());
        assert_eq!(data.attendance.len(), 2);
        assert_eq!(data.attendance[0].status, AttendanceStatus::Present);
        assert_eq!(data.attendance[1].status, AttendanceStatus::Unmarked);
        assert_eq!(data.attendance[0].month, data.attendance[1].month);
        assert_eq!(data.attendance[1].month, OptionValue::from("10"));
    }

    #[test]
    fn non_array_option_sections_still_load() {
        let data = parse_school_data(r#"{ "classes": { "error": "timeout" }, "attendance": [] }"#);
        assert!(data.is_ok_and(|data| options_from_json(&data.classes).is_empty()));
    }

    #[test]
    fn parse_school_data_reports_malformed_json() {
        let error = parse_school_data("{ \"attendance\": [ }").err();
        assert!(matches!(error, Some(DataError::Parse(_))));
    }

    #[test]
    fn load_school_data_flags_missing_files() {
        let error = load_school_data(Path::new("/nonexistent/schooldesk.json")).err();
        assert!(error.as_ref().is_some_and(DataError::is_not_found));
        let message = error.expect("missing file error").to_string();
        assert!(message.contains("/nonexistent/schooldesk.json"));
    }

    #[test]
    fn odd_statuses_fall_back_to_unmarked() {
        let data = parse_school_data(
            r#"{ "attendance": [
                { "name": "A", "status": "Present" },
                { "name": "B", "status": "late" },
                { "name": "C", "status": null },
                { "name": "D", "status": 3 }
            ] }"#,
        )
        .expect("odd statuses still load");
        let statuses: Vec<AttendanceStatus> =
            data.attendance.iter().map(|record| record.status).collect();
        assert_eq!(
            statuses,
            [
                AttendanceStatus::Present,
                AttendanceStatus::Unmarked,
                AttendanceStatus::Unmarked,
                AttendanceStatus::Unmarked,
            ]
        );
    }

    #[test]
    fn attendance_status_parses_case_insensitively() {
        assert_eq!(
            AttendanceStatus::parse(" Leave "),
            Some(AttendanceStatus::Leave)
        );
        assert_eq!(AttendanceStatus::parse("late"), None);
    }
}

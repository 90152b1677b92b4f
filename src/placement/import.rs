use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::UserId;
use super::input::StudentProfileInput;

/// Outcome of a roster import; failed rows do not stop the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total: usize,
    pub created: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportSummary {
    pub(crate) fn record_failure(&mut self, row: usize, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(ImportRowError {
            row,
            message: message.into(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

#[derive(Debug)]
pub enum StudentImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for StudentImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentImportError::Io(err) => write!(f, "failed to read student roster: {}", err),
            StudentImportError::Csv(err) => write!(f, "invalid student roster CSV: {}", err),
        }
    }
}

impl std::error::Error for StudentImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StudentImportError::Io(err) => Some(err),
            StudentImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StudentImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for StudentImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One roster line, kept as text so bad values become row errors instead of aborting.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RosterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    user_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    enrollment_no: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    course: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    branch: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    graduation_year: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cgpa: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tenth_percentage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    twelfth_percentage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    active_backlogs: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    resume_url: Option<String>,
}

impl RosterRow {
    pub(crate) fn into_input(self) -> Result<(UserId, StudentProfileInput), String> {
        let (Some(user_id), Some(enrollment_no), Some(course), Some(branch), Some(year)) = (
            self.user_id,
            self.enrollment_no,
            self.course,
            self.branch,
            self.graduation_year,
        ) else {
            return Err(
                "missing required fields: userId, enrollmentNo, course, branch, graduationYear"
                    .to_string(),
            );
        };

        let input = StudentProfileInput {
            full_name: self.full_name,
            enrollment_no: Some(enrollment_no),
            course: Some(course),
            branch: Some(branch),
            graduation_year: Some(parse_field("graduationYear", &year)?),
            cgpa: parse_optional("cgpa", self.cgpa)?,
            tenth_percentage: parse_optional("tenthPercentage", self.tenth_percentage)?,
            twelfth_percentage: parse_optional("twelfthPercentage", self.twelfth_percentage)?,
            active_backlogs: parse_optional("activeBacklogs", self.active_backlogs)?,
            resume_url: self.resume_url,
        };

        Ok((UserId(user_id), input))
    }
}

pub(crate) fn read_roster<R: Read>(reader: R) -> Result<Vec<RosterRow>, StudentImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        rows.push(record?);
    }

    Ok(rows)
}

fn parse_field<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| format!("{field} '{raw}' is not a valid number"))
}

fn parse_optional<T: std::str::FromStr>(
    field: &str,
    raw: Option<String>,
) -> Result<Option<T>, String> {
    raw.map(|value| parse_field(field, &value)).transpose()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

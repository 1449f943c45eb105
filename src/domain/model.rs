use crate::utils::error::{FormError, Result};
use crate::utils::validation::validate_required_field;
use serde::{Deserialize, Serialize};

/// Raw form payload as it arrived; either field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    pub department: Option<String>,
    pub name: Option<String>,
}

impl Submission {
    pub fn new(department: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            department: Some(department.into()),
            name: Some(name.into()),
        }
    }

    /// Turns the payload into a record if both fields are non-empty.
    pub fn into_record(self) -> Result<ParticipantRecord> {
        let department = validate_required_field("department", self.department.as_deref())?;
        let name = validate_required_field("name", self.name.as_deref())?;
        Ok(ParticipantRecord {
            department: department.to_string(),
            name: name.to_string(),
        })
    }
}

/// One accepted `(department, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub department: String,
    pub name: String,
}

impl ParticipantRecord {
    /// Serializes the record as one newline-terminated store line.
    pub fn to_line(&self, format: RecordFormat) -> Result<Vec<u8>> {
        match format {
            RecordFormat::Raw => Ok(format!("{},{}\n", self.department, self.name).into_bytes()),
            RecordFormat::Csv => {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .terminator(csv::Terminator::Any(b'\n'))
                    .from_writer(Vec::new());
                writer.write_record([self.department.as_str(), self.name.as_str()])?;
                writer
                    .into_inner()
                    .map_err(|e| FormError::Io(e.into_error()))
            }
        }
    }
}

/// How records are laid out on disk.
///
/// `Raw` joins the fields verbatim, so a comma or newline inside a value
/// changes the shape of the line. `Csv` quotes such values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    #[default]
    Raw,
    Csv,
}

pub const HEADER_LINE: &[u8] = b"department,name\n";

/// Message shown above the form after a POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

impl StatusMessage {
    pub fn added(record: &ParticipantRecord) -> Self {
        StatusMessage::Success(format!(
            "successfully added: department - {}, name - {}",
            record.department, record.name
        ))
    }

    pub fn missing_fields() -> Self {
        StatusMessage::Error("please fill all fields!".to_string())
    }

    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Success(text) | StatusMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_requires_both_fields() {
        assert!(Submission::new("Engineering", "Alice").into_record().is_ok());
        assert!(Submission::new("", "Bob").into_record().is_err());
        assert!(Submission::new("Sales", "").into_record().is_err());

        let missing_name = Submission {
            department: Some("Sales".to_string()),
            name: None,
        };
        assert!(missing_name.into_record().is_err());

        let missing_department = Submission {
            department: None,
            name: Some("Bob".to_string()),
        };
        assert!(missing_department.into_record().is_err());
        assert!(Submission::default().into_record().is_err());
    }

    #[test]
    fn test_raw_line_is_verbatim() {
        let record = ParticipantRecord {
            department: "R&D, Lab 2".to_string(),
            name: "Alice".to_string(),
        };
        let line = record.to_line(RecordFormat::Raw).unwrap();
        assert_eq!(line, b"R&D, Lab 2,Alice\n");
    }

    #[test]
    fn test_csv_line_quotes_embedded_commas() {
        let record = ParticipantRecord {
            department: "R&D, Lab 2".to_string(),
            name: "Say \"hi\"".to_string(),
        };
        let line = record.to_line(RecordFormat::Csv).unwrap();
        assert_eq!(
            String::from_utf8(line).unwrap(),
            "\"R&D, Lab 2\",\"Say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_csv_line_plain_values_match_raw() {
        let record = ParticipantRecord {
            department: "Engineering".to_string(),
            name: "Alice".to_string(),
        };
        assert_eq!(
            record.to_line(RecordFormat::Csv).unwrap(),
            record.to_line(RecordFormat::Raw).unwrap()
        );
    }

    #[test]
    fn test_status_messages() {
        let record = ParticipantRecord {
            department: "Engineering".to_string(),
            name: "Alice".to_string(),
        };
        let added = StatusMessage::added(&record);
        assert!(!added.is_error());
        assert_eq!(
            added.text(),
            "successfully added: department - Engineering, name - Alice"
        );
        assert!(StatusMessage::missing_fields().is_error());
    }
}

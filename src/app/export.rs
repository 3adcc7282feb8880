use crate::utils::error::{HrError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Renders rows as a pretty JSON array or as CSV with a header line taken
/// from the domain field names.
pub fn render<T: Serialize>(rows: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in rows {
                writer.serialize(row)?;
            }
            let bytes = writer.into_inner().map_err(|e| HrError::IoError(e.into_error()))?;
            String::from_utf8(bytes).map_err(|e| HrError::MappingError {
                message: format!("CSV output is not UTF-8: {}", e),
            })
        }
    }
}

/// Like [`render`] for a single value; JSON output is an object rather than
/// a one-element array.
pub fn render_one<T: Serialize>(row: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(row)?),
        OutputFormat::Csv => render(std::slice::from_ref(row), format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Employee, EmployeeStatus};

    fn employee() -> Employee {
        Employee {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Some("ada@x.co".to_string()),
            phone: None,
            role: Some("Analyst".to_string()),
            department: Some("Engineering".to_string()),
            join_date: Some("2024-01-10".to_string()),
            status: EmployeeStatus::Active,
            photo_url: None,
        }
    }

    #[test]
    fn test_csv_uses_domain_headers() {
        let output = render(&[employee()], OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Id,firstName,lastName,email,phone,role,department,joinDate,status,photoUrl"
        );
        assert_eq!(
            lines[1],
            "1,Ada,Lovelace,ada@x.co,,Analyst,Engineering,2024-01-10,active,"
        );
    }

    #[test]
    fn test_json_single_is_object() {
        let output = render_one(&employee(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["firstName"], "Ada");

        let empty = render::<Employee>(&[], OutputFormat::Json).unwrap();
        assert_eq!(empty, "[]");
    }
}

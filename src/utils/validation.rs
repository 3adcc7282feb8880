use crate::domain::model::RecordId;
use crate::utils::error::{HrError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HrError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| HrError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(HrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Input-side counterpart of `validate_non_empty_string`: reports a
/// `ValidationError` rather than a configuration error.
pub fn require_text(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HrError::validation(field_name, "must not be empty"));
    }
    Ok(())
}

/// Store identities are positive integers.
pub fn validate_record_id(id: RecordId) -> Result<RecordId> {
    if id <= 0 {
        return Err(HrError::validation(
            "Id",
            format!("record id must be a positive integer, got {}", id),
        ));
    }
    Ok(id)
}

/// Parses an identifier typed by a person or carried as a string in the
/// domain model.
pub fn parse_record_id(field_name: &str, raw: &str) -> Result<RecordId> {
    let trimmed = raw.trim();
    let id = trimmed.parse::<RecordId>().map_err(|_| {
        HrError::validation(field_name, format!("'{}' is not a numeric identifier", raw))
    })?;
    if id <= 0 {
        return Err(HrError::validation(
            field_name,
            format!("'{}' is not a positive identifier", raw),
        ));
    }
    Ok(id)
}

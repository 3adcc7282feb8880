use thiserror::Error;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("Remote store request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Remote store error: {message}")]
    StoreError { message: String },

    #[error("Record rejected by remote store: {message}")]
    RecordRejectedError { message: String },

    #[error("Malformed record: {message}")]
    MappingError { message: String },

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("{entity} {id} not found")]
    NotFoundError { entity: String, id: i64 },

    #[error("Cannot move record {id} from '{from}' to '{to}'")]
    InvalidTransitionError { id: i64, from: String, to: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, HrError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    RemoteStore,
    Data,
    Input,
    Workflow,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HrError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        HrError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HrError::ApiError(_) => ErrorCategory::Network,
            HrError::StoreError { .. } | HrError::RecordRejectedError { .. } => {
                ErrorCategory::RemoteStore
            }
            HrError::SerializationError(_) | HrError::CsvError(_) | HrError::MappingError { .. } => {
                ErrorCategory::Data
            }
            HrError::ValidationError { .. } | HrError::NotFoundError { .. } => ErrorCategory::Input,
            HrError::InvalidTransitionError { .. } => ErrorCategory::Workflow,
            HrError::ConfigError { .. }
            | HrError::ConfigValidationError { .. }
            | HrError::InvalidConfigValueError { .. }
            | HrError::MissingConfigError { .. } => ErrorCategory::Configuration,
            HrError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Workflow => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::RemoteStore => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Text shown to the person who triggered the operation. Store-provided
    /// messages are passed through untouched.
    pub fn user_friendly_message(&self) -> String {
        match self {
            HrError::StoreError { message } | HrError::RecordRejectedError { message } => {
                message.clone()
            }
            HrError::ApiError(_) => "Could not reach the record store".to_string(),
            HrError::ValidationError { field, message } => format!("{}: {}", field, message),
            HrError::NotFoundError { entity, id } => format!("No {} with id {}", entity, id),
            HrError::InvalidTransitionError { from, to, .. } => {
                format!("A {} request cannot be {}", from, to)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the store base URL",
            ErrorCategory::RemoteStore => "Review the store message and correct the record",
            ErrorCategory::Data => "The store returned an unexpected shape; check table fields",
            ErrorCategory::Input => "Correct the input and try again",
            ErrorCategory::Workflow => "Reload the record; it may already have been processed",
            ErrorCategory::Configuration => {
                "Check the config file or STAFFHUB_* environment variables"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_message_is_passed_through() {
        let err = HrError::RecordRejectedError {
            message: "duplicate email".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "duplicate email");
        assert_eq!(err.category(), ErrorCategory::RemoteStore);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = HrError::MissingConfigError {
            field: "store.project_id".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}

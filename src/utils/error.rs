use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to append to store {}: {source}", path.display())]
    StorageWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out after {waited:?} waiting for exclusive lock on {}", path.display())]
    LockTimeout { path: PathBuf, waited: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FormError {
    /// Whether the error means the submission was not persisted because of the store.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            FormError::StorageWriteFailure { .. } | FormError::LockTimeout { .. }
        )
    }

    /// HTTP status the web layer should answer with. Validation failures are
    /// answered with the form page and its inline message.
    pub fn status_code(&self) -> u16 {
        match self {
            FormError::Validation { .. } => 200,
            _ => 500,
        }
    }

    /// Message that is safe to show to an end user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::Validation { message } => message.clone(),
            FormError::StorageWriteFailure { .. } | FormError::LockTimeout { .. } => {
                "could not save your entry, please try again later".to_string()
            }
            FormError::ConfigError { message } => format!("configuration problem: {}", message),
            FormError::InvalidConfigValueError { field, reason, .. } => {
                format!("invalid setting {}: {}", field, reason)
            }
            _ => "internal server error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failures_map_to_500() {
        let err = FormError::StorageWriteFailure {
            path: PathBuf::from("data/participants.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(err.is_storage_failure());
        assert_eq!(err.status_code(), 500);
        assert!(!err.user_friendly_message().contains("read-only"));

        let timeout = FormError::LockTimeout {
            path: PathBuf::from("x.csv"),
            waited: Duration::from_millis(10),
        };
        assert!(timeout.is_storage_failure());
    }

    #[test]
    fn test_validation_is_not_storage_failure() {
        let err = FormError::Validation {
            message: "please fill all fields!".to_string(),
        };
        assert!(!err.is_storage_failure());
        assert_eq!(err.status_code(), 200);
        assert_eq!(err.user_friendly_message(), "please fill all fields!");
    }
}

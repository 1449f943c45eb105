use crate::utils::error::{FormError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A form field is present when it was sent and is not the empty string.
/// Whitespace is kept as-is: `"  "` counts as a value.
pub fn validate_required_field<'a>(field_name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FormError::Validation {
            message: format!("{} is required", field_name),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let as_str = path.to_string_lossy();
    if as_str.is_empty() {
        return Err(FormError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if as_str.contains('\0') {
        return Err(FormError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(FormError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_required_field() {
        assert_eq!(validate_required_field("name", Some("Alice")).unwrap(), "Alice");
        assert!(validate_required_field("name", Some("")).is_err());
        assert!(validate_required_field("name", None).is_err());
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert_eq!(validate_required_field("department", Some("  ")).unwrap(), "  ");
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store.path", &PathBuf::from("data/participants.csv")).is_ok());
        assert!(validate_path("store.path", &PathBuf::from("")).is_err());
        assert!(validate_path("store.path", &PathBuf::from("bad\0path")).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("store.lock_timeout_ms", 5000, 1).is_ok());
        assert!(validate_positive_number("store.lock_timeout_ms", 0, 1).is_err());
    }
}

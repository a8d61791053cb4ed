//! # Form Error Types
//!
//! Validation failures are never errors; they are verdicts with messages.
//! These variants cover wiring and configuration problems only.

use thiserror::Error;

/// Result type alias for form wiring and configuration operations
pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while wiring the form or loading its configuration
#[derive(Error, Debug)]
pub enum FormError {
    /// No element matched the selector
    #[error("No element matches selector `{selector}`")]
    MissingElement { selector: String },

    /// The input has no parent element to act as its container
    #[error("Field `{field}` has no container element")]
    MissingContainer { field: String },

    /// The container has no message slot
    #[error("Field `{field}` container has no message slot")]
    MissingMessageSlot { field: String },

    /// An input event came from an element the form does not know
    #[error("Unknown field identifier: {id}")]
    UnknownField { id: String },

    /// A configuration value is out of range
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfig { field: String, message: String },

    /// The configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed
    #[error("Failed to parse configuration file {path}: {message}")]
    ConfigParse { path: String, message: String },
}

impl FormError {
    /// Create a new invalid configuration error
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration parse error
    #[must_use]
    pub fn config_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FormError::MissingElement {
            selector: "#email".to_string(),
        };
        assert_eq!(err.to_string(), "No element matches selector `#email`");

        let err = FormError::invalid_config("username_min", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: username_min - must be at least 1"
        );
    }

    #[test]
    fn test_config_io_keeps_source() {
        let err = FormError::ConfigIo {
            path: "missing.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("missing.yaml"));
    }
}

//! CLI-specific error types

use std::fmt;
use std::io;

use crate::error::ParseError;
use crate::schema::{SchemaError, ValidationReport};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Schema registry error
    SchemaError,
    /// Data file could not be parsed or decoded
    ParseFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PARK_CLI_CONFIG_ERROR",
            Self::IoError => "PARK_CLI_IO_ERROR",
            Self::SchemaError => "PARK_CLI_SCHEMA_ERROR",
            Self::ParseFailed => "PARK_CLI_PARSE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    report: Option<ValidationReport>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            report: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field errors, when a decode failed validation
    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, format!("{}: {}", e.code(), e))
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        let message = format!("{}: {}", e.code(), e);
        let report = match e {
            ParseError::Validation(report) => Some(report),
            _ => None,
        };
        Self {
            code: CliErrorCode::ParseFailed,
            message,
            report,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldError;

    #[test]
    fn test_display() {
        let err = CliError::config_error("bad log_level");
        assert_eq!(err.to_string(), "PARK_CLI_CONFIG_ERROR: bad log_level");
    }

    #[test]
    fn test_from_parse_error_keeps_report() {
        let mut report = ValidationReport::new();
        report.push(FieldError::blank_value("legalName"));

        let err = CliError::from(ParseError::Validation(report));
        assert_eq!(err.code(), CliErrorCode::ParseFailed);
        assert!(err.message().starts_with("PARK_VALIDATION_FAILED"));
        assert_eq!(err.report().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_from_malformed_has_no_report() {
        let err = CliError::from(ParseError::malformed(Some(1), "expected start marker"));
        assert!(err.report().is_none());
        assert!(err.message().contains("PARK_MALFORMED_INPUT"));
    }
}

//! Error type for reading and decoding data files

use thiserror::Error;

use crate::schema::ValidationReport;

/// The primary error type for parse operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Markers missing or misplaced, truncated block, or an unparsable line.
    /// Fatal for the whole parse; nothing is decoded.
    #[error("Malformed input{}: {reason}", line_suffix(.line))]
    MalformedInput {
        /// 1-based line number, when the failure is tied to one line
        line: Option<usize>,
        reason: String,
    },

    /// One or more field-scoped errors from the decode pass.
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),
}

impl ParseError {
    pub fn malformed(line: Option<usize>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Io(_) => "PARK_IO_ERROR",
            ParseError::MalformedInput { .. } => "PARK_MALFORMED_INPUT",
            ParseError::Validation(_) => "PARK_VALIDATION_FAILED",
        }
    }

    /// Returns the validation report, if this is a validation failure
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ParseError::Validation(report) => Some(report),
            _ => None,
        }
    }
}

impl From<ValidationReport> for ParseError {
    fn from(report: ValidationReport) -> Self {
        ParseError::Validation(report)
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|n| format!(" at line {}", n)).unwrap_or_default()
}

/// A convenience `Result` alias using [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldError;

    #[test]
    fn test_malformed_display_with_line() {
        let err = ParseError::malformed(Some(3), "line 'abc' has no ':' separator");
        assert_eq!(
            err.to_string(),
            "Malformed input at line 3: line 'abc' has no ':' separator"
        );
        assert_eq!(err.code(), "PARK_MALFORMED_INPUT");
    }

    #[test]
    fn test_malformed_display_without_line() {
        let err = ParseError::malformed(None, "source is empty");
        assert_eq!(err.to_string(), "Malformed input: source is empty");
    }

    #[test]
    fn test_validation_carries_report() {
        let mut report = ValidationReport::new();
        report.push(FieldError::blank_value("legalName"));

        let err = ParseError::from(report);
        assert_eq!(err.code(), "PARK_VALIDATION_FAILED");
        assert_eq!(err.report().map(|r| r.len()), Some(1));
        assert!(err.to_string().contains("legalName"));
    }
}

//! Field-scoped decode errors and schema registry errors
//!
//! Field error codes:
//! - PARK_MISSING_FIELD
//! - PARK_MAX_LENGTH_EXCEEDED
//! - PARK_BLANK_VALUE
//! - PARK_CONVERSION_FAILED
//!
//! All field errors are collected into a [`ValidationReport`]; none of them
//! stops the decode of sibling fields.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Kind of a field-scoped failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// The lookup key is absent from the block
    MissingField,
    /// The value is longer than the declared maximum
    MaxLengthExceeded,
    /// The value is empty but the field is declared not-blank
    BlankValue,
    /// The value cannot be converted to the declared kind
    ConversionFailed,
}

impl FieldErrorKind {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::MissingField => "PARK_MISSING_FIELD",
            FieldErrorKind::MaxLengthExceeded => "PARK_MAX_LENGTH_EXCEEDED",
            FieldErrorKind::BlankValue => "PARK_BLANK_VALUE",
            FieldErrorKind::ConversionFailed => "PARK_CONVERSION_FAILED",
        }
    }

    /// Whether this kind comes from a declared constraint rather than
    /// from the shape of the input
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            FieldErrorKind::MaxLengthExceeded | FieldErrorKind::BlankValue
        )
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One failed check on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Logical field name
    pub field: String,
    /// What went wrong
    pub kind: FieldErrorKind,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>, key: &str) -> Self {
        Self::new(
            field,
            FieldErrorKind::MissingField,
            format!("key '{}' is not present in the block", key),
        )
    }

    pub fn max_length_exceeded(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(
            field,
            FieldErrorKind::MaxLengthExceeded,
            format!("length {} exceeds maximum of {}", actual, max),
        )
    }

    pub fn blank_value(field: impl Into<String>) -> Self {
        Self::new(field, FieldErrorKind::BlankValue, "value must not be blank")
    }

    pub fn conversion_failed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(field, FieldErrorKind::ConversionFailed, reason)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {} [{}]", self.field, self.message, self.kind.code())
    }
}

/// Every field error found in one decode pass, in discovery order.
///
/// An empty report means the decode succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Errors recorded against one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Whether `field` has an error of `kind`
    pub fn has(&self, field: &str, kind: FieldErrorKind) -> bool {
        self.for_field(field).any(|e| e.kind == kind)
    }

    /// Appends every error from `other`
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    /// `Ok(value)` when empty, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationReport> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Schema registry errors
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No schema registered under this id
    #[error("Schema '{0}' not found")]
    UnknownSchema(String),

    /// The id exists but not at this version
    #[error("Schema '{id}' version '{version}' not found")]
    UnknownVersion { id: String, version: String },

    /// Attempt to replace a registered or saved schema
    #[error("Schema '{id}' version '{version}' is immutable")]
    Immutable { id: String, version: String },

    /// Unreadable or structurally invalid schema file
    #[error("Malformed schema '{path}': {reason}")]
    Malformed { path: String, reason: String },
}

impl SchemaError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownSchema(_) => "PARK_UNKNOWN_SCHEMA",
            SchemaError::UnknownVersion { .. } => "PARK_UNKNOWN_SCHEMA_VERSION",
            SchemaError::Immutable { .. } => "PARK_SCHEMA_IMMUTABLE",
            SchemaError::Malformed { .. } => "PARK_MALFORMED_SCHEMA",
        }
    }
}

/// Result type for schema registry operations
pub type SchemaResult<T> = Result<T, SchemaError>;

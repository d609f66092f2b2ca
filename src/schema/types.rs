//! Schema type definitions
//!
//! Supported value kinds:
//! - text: the raw value, unchanged
//! - date: a calendar date written as `YYYY-MM-DD`

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declared value kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// UTF-8 text, used as-is
    #[default]
    Text,
    /// Calendar date
    Date,
}

impl ValueKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Date => "date",
        }
    }
}

/// Metadata for one target field.
///
/// Built once when a schema is defined:
///
/// ```ignore
/// FieldDescriptor::text("legalName").not_blank().max_length(200)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Logical field name, used in reports and decoded output
    pub name: String,
    /// Source key in the block; the field name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Maximum value length in characters; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Whether an empty value is rejected
    #[serde(default)]
    pub not_blank: bool,
    /// Declared value kind
    #[serde(default)]
    pub kind: ValueKind,
}

impl FieldDescriptor {
    /// Create a descriptor with the given kind and no constraints
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            key: None,
            max_length: None,
            not_blank: false,
            kind,
        }
    }

    /// Create a text field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Text)
    }

    /// Create a date field
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Date)
    }

    /// Read the value from `key` instead of the field name
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Reject values longer than `max` characters
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Reject empty values
    pub fn not_blank(mut self) -> Self {
        self.not_blank = true;
        self
    }

    /// Returns the key this field is read from
    pub fn lookup_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }
}

/// Complete schema: an ordered field list bound to an id and version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema identifier
    pub schema_id: String,
    /// Schema version
    pub schema_version: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field descriptors, in decode order
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Create a new schema
    pub fn new(
        schema_id: impl Into<String>,
        schema_version: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            schema_id: schema_id.into(),
            schema_version: schema_version.into(),
            description: None,
            fields,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the unique key for this schema (id, version)
    pub fn key(&self) -> (&str, &str) {
        (&self.schema_id, &self.schema_version)
    }

    /// Looks up a field by its logical name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema structure itself (not a data file)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("Schema must declare at least one field".into());
        }

        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("Field names must not be empty".into());
            }
            if !names.insert(field.name.as_str()) {
                return Err(format!("Duplicate field name '{}'", field.name));
            }
            if !keys.insert(field.lookup_key()) {
                return Err(format!(
                    "Duplicate lookup key '{}' (field '{}')",
                    field.lookup_key(),
                    field.name
                ));
            }
            if field.max_length == Some(0) {
                return Err(format!("Field '{}' has max_length 0", field.name));
            }
        }

        Ok(())
    }
}

/// A converted field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    /// Returns the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Date(_) => None,
        }
    }

    /// Returns the date if this is a date value
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(_) => None,
        }
    }

    /// Returns the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Date(_) => ValueKind::Date,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Writes the value in its block text form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Typed values of one decode, in schema order, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFields {
    values: Vec<(String, FieldValue)>,
}

impl DecodedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field's value, replacing any previous one
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Removes and returns a field's value
    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        let idx = self.values.iter().position(|(n, _)| n == name)?;
        Some(self.values.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Serialize for DecodedFields {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

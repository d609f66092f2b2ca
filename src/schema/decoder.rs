//! Schema-driven decoder: raw block values to typed field values
//!
//! For each descriptor, in schema order:
//! 1. Resolve the lookup key
//! 2. Fetch the raw value (absent key is a MissingField error)
//! 3. Check max length and not-blank, independently
//! 4. Convert according to the declared kind
//! 5. Keep the converted value only if the field recorded no error
//!
//! Errors never stop the pass. The decode fails once at the end if the
//! report is non-empty.

use chrono::NaiveDate;

use crate::block::RawRecord;
use crate::observability::Event;

use super::errors::{FieldError, ValidationReport};
use super::types::{DecodedFields, FieldDescriptor, FieldValue, Schema, ValueKind};

/// Decodes `raw` against `schema`.
///
/// # Errors
///
/// Returns every missing-field, constraint and conversion error found across
/// all fields.
pub fn decode(schema: &Schema, raw: &RawRecord) -> Result<DecodedFields, ValidationReport> {
    let mut report = ValidationReport::new();
    let mut decoded = DecodedFields::new();

    for descriptor in &schema.fields {
        let errors_before = report.len();
        let value = decode_field(descriptor, raw, &mut report);

        for error in &report.errors()[errors_before..] {
            Event::FieldRejected.emit(&[
                ("code", error.kind.code()),
                ("field", error.field.as_str()),
                ("schema_id", schema.schema_id.as_str()),
            ]);
        }

        if let Some(value) = value {
            decoded.insert(descriptor.name.as_str(), value);
        }
    }

    if report.is_empty() {
        let count = decoded.len().to_string();
        Event::RecordDecoded.emit(&[
            ("fields", count.as_str()),
            ("schema_id", schema.schema_id.as_str()),
        ]);
    }

    report.into_result(decoded)
}

/// Decodes one field, appending its errors to `report`.
///
/// Returns the converted value only when this field recorded no error.
fn decode_field(
    descriptor: &FieldDescriptor,
    raw: &RawRecord,
    report: &mut ValidationReport,
) -> Option<FieldValue> {
    let key = descriptor.lookup_key();
    let Some(raw_value) = raw.get(key) else {
        report.push(FieldError::missing_field(&descriptor.name, key));
        return None;
    };

    let mut clean = true;

    if let Some(max) = descriptor.max_length {
        let length = raw_value.chars().count();
        if length > max {
            report.push(FieldError::max_length_exceeded(&descriptor.name, max, length));
            clean = false;
        }
    }

    if descriptor.not_blank && raw_value.is_empty() {
        report.push(FieldError::blank_value(&descriptor.name));
        clean = false;
    }

    let converted = match convert(descriptor.kind, raw_value) {
        Ok(value) => value,
        Err(reason) => {
            report.push(FieldError::conversion_failed(&descriptor.name, reason));
            return None;
        }
    };

    clean.then_some(converted)
}

/// Converts a raw string to a value of the given kind
pub fn convert(kind: ValueKind, raw: &str) -> Result<FieldValue, String> {
    match kind {
        ValueKind::Text => Ok(FieldValue::Text(raw.to_string())),
        ValueKind::Date => parse_date(raw).map(FieldValue::Date),
    }
}

/// Parses `YYYY-MM-DD` as exactly three `-`-separated integers forming a
/// valid calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let parts: Vec<&str> = raw.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(format!(
            "invalid date '{}': expected 3 '-'-separated components, found {}",
            raw,
            parts.len()
        ));
    };

    let year: i32 = parse_component(raw, "year", year)?;
    let month: u32 = parse_component(raw, "month", month)?;
    let day: u32 = parse_component(raw, "day", day)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        format!(
            "invalid date '{}': {}-{}-{} is not a calendar date",
            raw, year, month, day
        )
    })
}

fn parse_component<T: std::str::FromStr>(raw: &str, name: &str, part: &str) -> Result<T, String> {
    part.parse::<T>()
        .map_err(|_| format!("invalid date '{}': {} '{}' is not a number", raw, name, part))
}

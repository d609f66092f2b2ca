//! Typed target records
//!
//! A record type supplies its schema and moves decoded values into its own
//! slots. The decode loop itself stays generic.

mod park;

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::block::{self, RawRecord};
use crate::schema::{self, DecodedFields, FieldError, FieldValue, Schema, ValidationReport};

pub use park::Park;

/// A record type that can be decoded from, and encoded to, a block.
pub trait Record: Sized {
    /// The record's schema, defined once per type
    fn schema() -> &'static Schema;

    /// Builds the record from a successful decode of [`Record::schema`].
    ///
    /// Slots that are absent or hold the wrong kind are reported, never
    /// defaulted.
    fn from_fields(fields: DecodedFields) -> Result<Self, ValidationReport>;

    /// The record's values, keyed by field name
    fn to_fields(&self) -> DecodedFields;
}

/// Decodes `raw` against `R`'s schema and builds an `R`.
pub fn decode_record<R: Record>(raw: &RawRecord) -> Result<R, ValidationReport> {
    let fields = schema::decode(R::schema(), raw)?;
    R::from_fields(fields)
}

/// Writes `record` in block form.
pub fn encode_record<R: Record, W: Write>(record: &R, writer: &mut W) -> io::Result<()> {
    block::encode(R::schema(), &record.to_fields(), writer)
}

/// Moves a text slot out of `fields`, reporting absence or a kind mismatch.
pub fn take_text(
    fields: &mut DecodedFields,
    name: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    match fields.take(name) {
        Some(FieldValue::Text(text)) => Some(text),
        Some(other) => {
            report.push(slot_mismatch(name, "text", &other));
            None
        }
        None => {
            report.push(FieldError::missing_field(name, name));
            None
        }
    }
}

/// Moves a date slot out of `fields`, reporting absence or a kind mismatch.
pub fn take_date(
    fields: &mut DecodedFields,
    name: &str,
    report: &mut ValidationReport,
) -> Option<NaiveDate> {
    match fields.take(name) {
        Some(FieldValue::Date(date)) => Some(date),
        Some(other) => {
            report.push(slot_mismatch(name, "date", &other));
            None
        }
        None => {
            report.push(FieldError::missing_field(name, name));
            None
        }
    }
}

fn slot_mismatch(name: &str, expected: &str, actual: &FieldValue) -> FieldError {
    FieldError::conversion_failed(
        name,
        format!(
            "slot expects {} but schema produced {}",
            expected,
            actual.kind().type_name()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldErrorKind;

    #[test]
    fn test_take_text_and_date() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let mut fields = DecodedFields::new();
        fields.insert("name", FieldValue::Text("Lindenhof".into()));
        fields.insert("opened", FieldValue::Date(date));

        let mut report = ValidationReport::new();
        assert_eq!(take_text(&mut fields, "name", &mut report), Some("Lindenhof".into()));
        assert_eq!(take_date(&mut fields, "opened", &mut report), Some(date));
        assert!(report.is_empty());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_take_reports_missing_and_mismatch() {
        let mut fields = DecodedFields::new();
        fields.insert("opened", FieldValue::Text("soon".into()));

        let mut report = ValidationReport::new();
        assert_eq!(take_date(&mut fields, "opened", &mut report), None);
        assert_eq!(take_text(&mut fields, "name", &mut report), None);

        assert!(report.has("opened", FieldErrorKind::ConversionFailed));
        assert!(report.has("name", FieldErrorKind::MissingField));
    }
}

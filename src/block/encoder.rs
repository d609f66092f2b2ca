//! Block encoder: writes decoded fields back out in block form

use std::io::{self, Write};

use crate::schema::{DecodedFields, Schema};

use super::extractor::MARKER;

/// Writes `fields` as a marker-delimited block, one `key: "value"` line per
/// schema field in schema order, under each field's lookup key.
///
/// Fields absent from `fields` are skipped. Values containing spaces or
/// quotes do not survive a re-read, since the extractor strips them.
pub fn encode<W: Write>(schema: &Schema, fields: &DecodedFields, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", MARKER)?;
    for descriptor in &schema.fields {
        if let Some(value) = fields.get(&descriptor.name) {
            writeln!(writer, "{}: \"{}\"", descriptor.lookup_key(), value)?;
        }
    }
    writeln!(writer, "{}", MARKER)?;
    writer.flush()
}

/// Encodes into a `String`
pub fn encode_to_string(schema: &Schema, fields: &DecodedFields) -> String {
    let mut buffer = Vec::new();
    // Writing to a Vec cannot fail
    let _ = encode(schema, fields, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::extract;
    use crate::schema::{decode, FieldDescriptor, FieldValue};
    use chrono::NaiveDate;

    fn schema() -> Schema {
        Schema::new(
            "garden",
            "v1",
            vec![
                FieldDescriptor::text("name").with_key("gardenName"),
                FieldDescriptor::date("opened"),
            ],
        )
    }

    #[test]
    fn test_encode_layout() {
        let mut fields = DecodedFields::new();
        fields.insert("opened", FieldValue::Date(NaiveDate::from_ymd_opt(2003, 4, 5).unwrap()));
        fields.insert("name", FieldValue::Text("Rosarium".into()));

        let text = encode_to_string(&schema(), &fields);
        assert_eq!(text, "***\ngardenName: \"Rosarium\"\nopened: \"2003-04-05\"\n***\n");
    }

    #[test]
    fn test_encode_then_decode() {
        let mut fields = DecodedFields::new();
        fields.insert("name", FieldValue::Text("Rosarium".into()));
        fields.insert("opened", FieldValue::Date(NaiveDate::from_ymd_opt(1899, 12, 31).unwrap()));

        let text = encode_to_string(&schema(), &fields);
        let raw = extract(text.as_bytes()).unwrap();
        assert_eq!(decode(&schema(), &raw).unwrap(), fields);
    }

    #[test]
    fn test_missing_fields_skipped() {
        let text = encode_to_string(&schema(), &DecodedFields::new());
        assert_eq!(text, "***\n***\n");
    }
}

//! Parse entry points: source → block → typed record
//!
//! Each call is independent and synchronous. The file handle lives only for
//! the duration of the call and is released on every exit path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::block;
use crate::error::{ParseError, Result};
use crate::observability::ObservationScope;
use crate::record::{self, Park, Record};
use crate::schema::{self, DecodedFields, Schema};

/// Parses a park data file.
///
/// # Errors
///
/// `Io` if the file cannot be read, `MalformedInput` if the block is
/// malformed, `Validation` with every field error otherwise.
pub fn parse_park(path: impl AsRef<Path>) -> Result<Park> {
    parse_record(path)
}

/// Parses a data file into any [`Record`] type.
pub fn parse_record<R: Record>(path: impl AsRef<Path>) -> Result<R> {
    let path = path.as_ref();
    observed(path, &R::schema().schema_id, || {
        let reader = open(path)?;
        parse_reader(reader)
    })
}

/// Parses a data file against a schema chosen at runtime.
pub fn parse_with_schema(path: impl AsRef<Path>, schema: &Schema) -> Result<DecodedFields> {
    let path = path.as_ref();
    observed(path, &schema.schema_id, || {
        let raw = block::extract(open(path)?)?;
        Ok(schema::decode(schema, &raw)?)
    })
}

/// Parses a record from any buffered reader.
pub fn parse_reader<R: Record, B: BufRead>(source: B) -> Result<R> {
    let raw = block::extract(source)?;
    Ok(record::decode_record(&raw)?)
}

/// Parses a record from in-memory text.
pub fn parse_str<R: Record>(text: &str) -> Result<R> {
    parse_reader(text.as_bytes())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

/// Runs `parse` inside a `PARSE` observation scope.
fn observed<T>(path: &Path, schema_id: &str, parse: impl FnOnce() -> Result<T>) -> Result<T> {
    let path_str = path.display().to_string();
    let scope = ObservationScope::with_fields(
        "PARSE",
        &[("path", path_str.as_str()), ("schema_id", schema_id)],
    );

    let result = parse();
    match &result {
        Ok(_) => scope.complete(),
        Err(e) => scope.fail(&failure_reason(e)),
    }
    result
}

fn failure_reason(error: &ParseError) -> String {
    match error {
        ParseError::Validation(report) => format!("{} field error(s)", report.len()),
        other => other.to_string(),
    }
}

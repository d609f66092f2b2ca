//! Block extractor
//!
//! ```text
//! ***
//! key1: "value1"
//! key2: "value2"
//! ***
//! ```
//!
//! The first line must be the start marker. Interior lines are split at the
//! first `:`; every space and `"` is removed from both halves. Reading stops
//! at the end marker; lines after it are never read.

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::{ParseError, Result};
use crate::observability::Event;

/// Start and end marker line
pub const MARKER: &str = "***";

const STRIPPED: &[char] = &[' ', '"'];

/// Unvalidated key/value pairs from one block. Keys are unique; a repeated
/// key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    values: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, returning the replaced value if the key was present
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Reads one marker-delimited block from `source`.
///
/// # Errors
///
/// `MalformedInput` when the first line is not the start marker, the source
/// ends before the end marker, or an interior line has no `:` or an empty
/// key. `Io` when reading fails.
pub fn extract<R: BufRead>(source: R) -> Result<RawRecord> {
    let mut lines = source.lines();

    match lines.next().transpose()? {
        Some(first) if first == MARKER => {}
        Some(first) => {
            return Err(ParseError::malformed(
                Some(1),
                format!("expected start marker '{}', found '{}'", MARKER, first),
            ))
        }
        None => return Err(ParseError::malformed(None, "source is empty")),
    }

    let mut record = RawRecord::new();
    let mut line_no = 1;

    loop {
        line_no += 1;
        let Some(line) = lines.next().transpose()? else {
            return Err(ParseError::malformed(
                None,
                format!("source ended before end marker '{}'", MARKER),
            ));
        };

        if line == MARKER {
            break;
        }

        let (key, value) = parse_line(&line, line_no)?;
        if let Some(previous) = record.insert(key.as_str(), value) {
            let line = line_no.to_string();
            Event::DuplicateKey.emit(&[
                ("discarded", previous.as_str()),
                ("key", key.as_str()),
                ("line", line.as_str()),
            ]);
        }
    }

    let count = record.len().to_string();
    Event::BlockExtracted.emit(&[("keys", count.as_str())]);

    Ok(record)
}

/// Splits one interior line into its stripped key and value.
fn parse_line(line: &str, line_no: usize) -> Result<(String, String)> {
    let Some((key, value)) = line.split_once(':') else {
        return Err(ParseError::malformed(
            Some(line_no),
            format!("line '{}' has no ':' separator", line),
        ));
    };

    let key = strip(key);
    if key.is_empty() {
        return Err(ParseError::malformed(
            Some(line_no),
            format!("line '{}' has an empty key", line),
        ));
    }

    Ok((key, strip(value)))
}

fn strip(segment: &str) -> String {
    segment.replace(STRIPPED, "")
}

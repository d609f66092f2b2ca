//! Observable events emitted while reading and decoding data files

use std::fmt;

use super::logger::{Logger, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded
    ConfigLoaded,
    /// Schema registered from disk or built-ins
    SchemaLoaded,
    /// Marker-delimited block read into a raw record
    BlockExtracted,
    /// A key appeared more than once in a block; the later value wins
    DuplicateKey,
    /// A field failed validation or conversion
    FieldRejected,
    /// All fields decoded without errors
    RecordDecoded,
}

impl Event {
    /// Returns the event name as written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::BlockExtracted => "BLOCK_EXTRACTED",
            Event::DuplicateKey => "DUPLICATE_KEY",
            Event::FieldRejected => "FIELD_REJECTED",
            Event::RecordDecoded => "RECORD_DECODED",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::DuplicateKey | Event::FieldRejected => Severity::Warn,
            Event::BlockExtracted => Severity::Trace,
            _ => Severity::Info,
        }
    }

    /// Emit this event at its default severity
    pub fn emit(&self, fields: &[(&str, &str)]) {
        Logger::log(self.severity(), self.as_str(), fields);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BlockExtracted.as_str(), "BLOCK_EXTRACTED");
        assert_eq!(Event::FieldRejected.to_string(), "FIELD_REJECTED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::DuplicateKey.severity(), Severity::Warn);
        assert_eq!(Event::RecordDecoded.severity(), Severity::Info);
        assert_eq!(Event::BlockExtracted.severity(), Severity::Trace);
    }
}

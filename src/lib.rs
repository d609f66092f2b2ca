//! parkdata - strict, schema-driven decoding of park data files
//!
//! ```text
//! ***
//! "legalName": "Acme Park"
//! "ownerOrganizationInn": "1234567890"
//! "foundationYear": "1998-06-01"
//! ***
//! ```
//!
//! text → [`block::extract`] → [`block::RawRecord`] → [`schema::decode`] →
//! typed record, or a [`schema::ValidationReport`] holding every field error.

pub mod block;
pub mod cli;
pub mod error;
pub mod observability;
pub mod parser;
pub mod record;
pub mod schema;

pub use error::{ParseError, Result};
pub use parser::{parse_park, parse_reader, parse_record, parse_str, parse_with_schema};
pub use record::{Park, Record};

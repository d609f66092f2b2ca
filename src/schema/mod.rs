//! Schema-driven decoding
//!
//! A schema is an ordered list of field descriptors. One generic decode loop
//! interprets it against a raw block record; adding a record type means
//! adding a schema, not changing the decoder.
//!
//! # Rules
//!
//! - Lookup key defaults to the field name
//! - Max length and not-blank are checked independently
//! - Every field error is collected; none short-circuits the pass
//! - Any collected error fails the decode; there are no partial records

mod decoder;
mod errors;
mod loader;
mod types;

pub use decoder::{convert, decode, parse_date};
pub use errors::{FieldError, FieldErrorKind, SchemaError, SchemaResult, ValidationReport};
pub use loader::SchemaLoader;
pub use types::{DecodedFields, FieldDescriptor, FieldValue, Schema, ValueKind};

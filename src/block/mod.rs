//! Marker-delimited `key: "value"` blocks
//!
//! Reading produces a [`RawRecord`] of stripped strings; nothing is typed or
//! validated here. See [`crate::schema`] for decoding.

mod encoder;
mod extractor;

pub use encoder::{encode, encode_to_string};
pub use extractor::{extract, RawRecord, MARKER};

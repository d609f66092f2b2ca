//! CLI module for parkdata
//!
//! Provides:
//! - parse: decode a data file to JSON
//! - schema: print a registered schema
//! - encode: write a park given as JSON in block form

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{encode, parse, run, run_command, schema, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json_stdin, write_error, write_response};

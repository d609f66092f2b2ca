//! CLI argument definitions using clap
//!
//! Commands:
//! - parkdata parse <file> [--schema <id>] [--schema-version <v>]
//! - parkdata schema [--id <id>] [--schema-version <v>]
//! - parkdata encode

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// parkdata - strict, schema-driven decoder for park data files
#[derive(Parser, Debug)]
#[command(name = "parkdata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a data file and print the decoded record as JSON
    Parse {
        /// Data file to parse
        file: PathBuf,

        /// Decode with a registered schema instead of the built-in park record
        #[arg(long)]
        schema: Option<String>,

        /// Version of --schema
        #[arg(long, default_value = "v1")]
        schema_version: String,
    },

    /// Print a registered schema as JSON
    Schema {
        /// Schema identifier
        #[arg(long, default_value = "park")]
        id: String,

        /// Schema version
        #[arg(long, default_value = "v1")]
        schema_version: String,
    },

    /// Read a park as JSON from stdin and write it in block form to stdout
    Encode,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cli = Cli::try_parse_from(["parkdata", "parse", "park.txt"]).unwrap();
        match cli.command {
            Command::Parse { file, schema, .. } => {
                assert_eq!(file, PathBuf::from("park.txt"));
                assert!(schema.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_with_schema_and_config() {
        let cli = Cli::try_parse_from([
            "parkdata",
            "parse",
            "garden.txt",
            "--schema",
            "garden",
            "--schema-version",
            "v2",
            "--config",
            "parkdata.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("parkdata.json")));
        match cli.command {
            Command::Parse { schema, schema_version, .. } => {
                assert_eq!(schema.as_deref(), Some("garden"));
                assert_eq!(schema_version, "v2");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_schema_defaults() {
        let cli = Cli::try_parse_from(["parkdata", "schema"]).unwrap();
        match cli.command {
            Command::Schema { id, schema_version } => {
                assert_eq!(id, "park");
                assert_eq!(schema_version, "v1");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_requires_file() {
        assert!(Cli::try_parse_from(["parkdata", "parse"]).is_err());
    }
}

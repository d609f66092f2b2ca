//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::{Event, Logger, Severity};
use crate::parser::{parse_park, parse_with_schema};
use crate::record::{encode_record, Park};
use crate::schema::SchemaLoader;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_json_stdin, write_error, write_response, write_text};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of `*.json` schema files (optional)
    #[serde(default)]
    pub schema_dir: Option<String>,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if let Some(dir) = &self.schema_dir {
            if dir.trim().is_empty() {
                return Err(CliError::config_error("schema_dir must not be empty"));
            }
        }

        Ok(())
    }

    /// Parsed minimum log severity
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Schema directory as a path, defaulting to `./schemas`
    pub fn schema_path(&self) -> PathBuf {
        PathBuf::from(self.schema_dir.as_deref().unwrap_or("schemas"))
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Load config, apply it, and run the selected command
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            Logger::set_min_severity(config.severity()?);
            Event::ConfigLoaded.emit(&[("path", path.display().to_string().as_str())]);
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Parse {
            file,
            schema,
            schema_version,
        } => parse(&config, &file, schema.as_deref(), &schema_version),
        Command::Schema { id, schema_version } => schema(&config, &id, &schema_version),
        Command::Encode => encode(),
    }
}

/// Parse a data file and print the decoded record
///
/// Failures are written as an error response before being returned.
pub fn parse(
    config: &Config,
    file: &Path,
    schema_id: Option<&str>,
    schema_version: &str,
) -> CliResult<()> {
    let result = decode_file(config, file, schema_id, schema_version);
    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(&e)?;
            Err(e)
        }
    }
}

fn decode_file(
    config: &Config,
    file: &Path,
    schema_id: Option<&str>,
    schema_version: &str,
) -> CliResult<serde_json::Value> {
    match schema_id {
        None => {
            let park = parse_park(file)?;
            Ok(serde_json::to_value(park)?)
        }
        Some(id) => {
            let loader = load_schemas(config)?;
            let schema = loader.resolve(id, schema_version)?;
            let fields = parse_with_schema(file, schema)?;
            Ok(serde_json::to_value(fields)?)
        }
    }
}

/// Print a registered schema
pub fn schema(config: &Config, schema_id: &str, schema_version: &str) -> CliResult<()> {
    let loader = load_schemas(config)?;
    let schema = loader.resolve(schema_id, schema_version)?;
    write_response(serde_json::to_value(schema)?)
}

/// Read a park as JSON from stdin and write it in block form
pub fn encode() -> CliResult<()> {
    let park: Park = serde_json::from_value(read_json_stdin()?)?;
    write_text(&encode_park(&park)?)
}

fn encode_park(park: &Park) -> CliResult<String> {
    let mut buffer = Vec::new();
    encode_record(park, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| CliError::io_error(e.to_string()))
}

/// Built-in schemas plus any found in the configured schema directory
fn load_schemas(config: &Config) -> CliResult<SchemaLoader> {
    let mut loader = SchemaLoader::with_builtins(&config.schema_path())?;
    if config.schema_dir.is_some() {
        loader.load_all()?;
    }
    Ok(loader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, Schema};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.severity().unwrap(), Severity::Info);
        assert_eq!(config.schema_path(), PathBuf::from("schemas"));
    }

    #[test]
    fn test_config_load_and_validate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parkdata.json");

        fs::write(&path, r#"{"schema_dir": "/srv/schemas", "log_level": "warn"}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.severity().unwrap(), Severity::Warn);
        assert_eq!(config.schema_path(), PathBuf::from("/srv/schemas"));

        fs::write(&path, r#"{"log_level": "loud"}"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "PARK_CLI_CONFIG_ERROR");

        fs::write(&path, "not json").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn test_load_schemas_from_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            schema_dir: Some(temp_dir.path().display().to_string()),
            ..Config::default()
        };

        let garden = Schema::new("garden", "v1", vec![FieldDescriptor::text("name")]);
        SchemaLoader::new(temp_dir.path()).save_schema(&garden).unwrap();

        let loader = load_schemas(&config).unwrap();
        assert!(loader.exists("garden", "v1"));
        assert!(loader.exists("park", "v1"));
    }

    #[test]
    fn test_decode_file_with_runtime_schema() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            schema_dir: Some(temp_dir.path().display().to_string()),
            ..Config::default()
        };
        let garden = Schema::new(
            "garden",
            "v1",
            vec![FieldDescriptor::text("name"), FieldDescriptor::date("opened")],
        );
        SchemaLoader::new(temp_dir.path()).save_schema(&garden).unwrap();

        let file = temp_dir.path().join("garden.txt");
        fs::write(&file, "***\nname: \"Rosarium\"\nopened: \"1901-05-20\"\n***\n").unwrap();

        let data = decode_file(&config, &file, Some("garden"), "v1").unwrap();
        assert_eq!(data, serde_json::json!({"name": "Rosarium", "opened": "1901-05-20"}));

        let err = decode_file(&config, &file, Some("garden"), "v7").unwrap_err();
        assert!(err.message().contains("PARK_UNKNOWN_SCHEMA_VERSION"));
    }

    #[test]
    fn test_decode_file_reports_field_errors() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("park.txt");
        fs::write(&file, "***\nlegalName: \"\"\n***\n").unwrap();

        let err = decode_file(&Config::default(), &file, None, "v1").unwrap_err();
        assert_eq!(err.code_str(), "PARK_CLI_PARSE_FAILED");
        assert_eq!(err.report().map(|r| r.len()), Some(3));
    }

    #[test]
    fn test_encode_park() {
        let park = Park {
            legal_name: "Sokolniki".into(),
            owner_organization_inn: "7718000000".into(),
            foundation_year: NaiveDate::from_ymd_opt(1931, 7, 1).unwrap(),
        };

        assert_eq!(
            encode_park(&park).unwrap(),
            "***\nlegalName: \"Sokolniki\"\nownerOrganizationInn: \"7718000000\"\nfoundationYear: \"1931-07-01\"\n***\n"
        );
    }
}

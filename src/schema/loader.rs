//! Schema registry backed by a directory of JSON schema files
//!
//! - One file per schema version, named `schema_<id>_<version>.json`
//! - Registered schemas are immutable
//! - Malformed files fail the whole load

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::Event;
use crate::record::{Park, Record};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Loads schema files from disk and keeps an in-memory registry.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by (schema_id, schema_version)
    schemas: HashMap<(String, String), Schema>,
}

impl SchemaLoader {
    /// Creates an empty loader for the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: HashMap::new(),
        }
    }

    /// Creates a loader with the built-in record schemas already registered.
    pub fn with_builtins(schema_dir: &Path) -> SchemaResult<Self> {
        let mut loader = Self::new(schema_dir);
        loader.register(Park::schema().clone())?;
        Ok(loader)
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// A missing directory loads nothing.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        // Directory order is platform dependent
        paths.sort();
        for path in paths {
            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    /// Loads and registers a single schema file.
    pub fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let schema: Schema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed(path.display().to_string(), e))?;

        let source = path.display().to_string();
        self.insert(schema, &source)
    }

    /// Registers a schema directly.
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed("<in-memory>", e))?;

        self.insert(schema, "<in-memory>")
    }

    fn insert(&mut self, schema: Schema, source: &str) -> SchemaResult<()> {
        let key = (schema.schema_id.clone(), schema.schema_version.clone());
        if self.schemas.contains_key(&key) {
            return Err(SchemaError::Immutable {
                id: key.0,
                version: key.1,
            });
        }

        Event::SchemaLoaded.emit(&[
            ("schema_id", key.0.as_str()),
            ("schema_version", key.1.as_str()),
            ("source", source),
        ]);
        self.schemas.insert(key, schema);
        Ok(())
    }

    /// Gets a schema by ID and version.
    pub fn get(&self, schema_id: &str, schema_version: &str) -> Option<&Schema> {
        self.schemas
            .get(&(schema_id.to_string(), schema_version.to_string()))
    }

    /// Gets a schema, distinguishing an unknown id from an unknown version.
    pub fn resolve(&self, schema_id: &str, schema_version: &str) -> SchemaResult<&Schema> {
        if !self.schema_id_exists(schema_id) {
            return Err(SchemaError::UnknownSchema(schema_id.to_string()));
        }
        self.get(schema_id, schema_version)
            .ok_or_else(|| SchemaError::UnknownVersion {
                id: schema_id.to_string(),
                version: schema_version.to_string(),
            })
    }

    /// Checks if a schema exists.
    pub fn exists(&self, schema_id: &str, schema_version: &str) -> bool {
        self.get(schema_id, schema_version).is_some()
    }

    /// Checks if any version of a schema ID exists.
    pub fn schema_id_exists(&self, schema_id: &str) -> bool {
        self.schemas.keys().any(|(id, _)| id == schema_id)
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes a schema file to the schema directory.
    ///
    /// Refuses to overwrite an existing file.
    pub fn save_schema(&self, schema: &Schema) -> SchemaResult<PathBuf> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed("<in-memory>", e))?;

        let filename = format!("schema_{}_{}.json", schema.schema_id, schema.schema_version);
        let path = self.schema_dir.join(filename);

        if path.exists() {
            return Err(SchemaError::Immutable {
                id: schema.schema_id.clone(),
                version: schema.schema_version.clone(),
            });
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(
                self.schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Failed to serialize schema: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Failed to write file: {}", e))
        })?;

        Ok(path)
    }
}

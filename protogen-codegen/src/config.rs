//! Generator configuration.
//!
//! Layers, later wins: built-in defaults, a `protogen.toml` file, then the
//! request's parameter string (`key=value,key=value`).

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings shared by every file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Name written into the generated-code banner.
    pub generator: String,
    /// Extension of output files, without the leading dot.
    pub extension: String,
    /// Path prepended to imports of modules generated in this batch
    /// (e.g., `crate::proto`). External imports are written as given.
    pub import_prefix: Option<String>,
    /// Whether the header lists the file's top-level messages.
    pub list_messages: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator: "protogen".to_string(),
            extension: "pb.rs".to_string(),
            import_prefix: None,
            list_messages: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration file (uses "protogen.toml" as filename)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with_filename(content, "protogen.toml")
    }

    /// Parse a configuration file with a custom filename for error reporting
    pub fn from_toml_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config_file(e, content, filename))
    }

    /// Apply a generator parameter string on top of the current values.
    ///
    /// Entries are comma-separated `key=value` pairs; a bare `list_messages`
    /// means `list_messages=true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parameter`] for unknown keys or invalid values.
    pub fn apply_parameter(&mut self, parameter: &str) -> Result<()> {
        for entry in parameter.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (entry, None),
            };

            match key {
                "generator" => self.generator = required(key, value)?.to_string(),
                "extension" | "ext" => {
                    self.extension = required(key, value)?.trim_start_matches('.').to_string();
                }
                "import_prefix" => {
                    self.import_prefix = value.filter(|v| !v.is_empty()).map(str::to_string);
                }
                "list_messages" => self.list_messages = parse_bool(key, value.unwrap_or("true"))?,
                _ => {
                    return Err(Box::new(Error::Parameter {
                        key: key.to_string(),
                        message: "unknown parameter".to_string(),
                    }));
                }
            }
        }
        Ok(())
    }

    /// Builder form of [`apply_parameter`](Self::apply_parameter).
    pub fn with_parameter(mut self, parameter: &str) -> Result<Self> {
        self.apply_parameter(parameter)?;
        Ok(self)
    }
}

fn required<'v>(key: &str, value: Option<&'v str>) -> Result<&'v str> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Box::new(Error::Parameter {
            key: key.to_string(),
            message: "a non-empty value is required".to_string(),
        })),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Box::new(Error::Parameter {
            key: key.to_string(),
            message: format!("expected true or false, got '{other}'"),
        })),
    }
}

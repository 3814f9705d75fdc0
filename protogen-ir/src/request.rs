//! The batch handed to the generator.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, FileUnit, Result};

/// Everything one generation run needs: every loaded file plus the subset
/// whose output should be surfaced.
///
/// `files` lists dependencies before dependents, the way protoc orders a
/// `CodeGeneratorRequest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// All loaded files.
    pub files: Vec<FileUnit>,
    /// Names of the files to produce artifacts for.
    #[serde(default)]
    pub generate: Vec<String>,
    /// Generator parameter string (`key=value,key=value`).
    #[serde(default)]
    pub parameter: Option<String>,
}

impl GenerateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a loaded file without surfacing it.
    pub fn file(mut self, file: FileUnit) -> Self {
        self.files.push(file);
        self
    }

    /// Add a loaded file and surface its output.
    pub fn generated_file(mut self, file: FileUnit) -> Self {
        self.generate.push(file.name.clone());
        self.files.push(file);
        self
    }

    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Find a loaded file by name.
    pub fn find_file(&self, name: &str) -> Option<&FileUnit> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Whether the named file's output is surfaced.
    pub fn is_generated(&self, name: &str) -> bool {
        self.generate.iter().any(|g| g == name)
    }

    /// Parse a request from a JSON string (uses "request.json" as filename)
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_json_str_with_filename(content, "request.json")
    }

    /// Parse a request from JSON with a custom filename for error reporting
    pub fn from_json_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::parse(e, content, filename))
    }

    /// Read and parse a request file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_json_str_with_filename(&content, &path.display().to_string())
    }
}

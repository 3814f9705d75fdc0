//! Outcome of a generation run.

use crate::Error;

/// A generated file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Output path relative to the output root (`foo/bar.pb.rs`).
    pub name: String,
    /// Canonical source text.
    pub content: String,
}

/// A file whose generation was aborted without stopping the batch.
#[derive(Debug)]
pub struct FileFailure {
    /// Input file name.
    pub file: String,
    pub error: Box<Error>,
}

/// Artifacts of surfaced files, in request order, plus per-file failures.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<FileFailure>,
}

impl GenerationReport {
    /// Check if every file generated cleanly.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Find an artifact by output name.
    pub fn artifact(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// Find the failure recorded for an input file.
    pub fn failure(&self, file: &str) -> Option<&FileFailure> {
        self.failures.iter().find(|f| f.file == file)
    }
}

//! Check command report data structures.

use std::path::PathBuf;

use protogen_codegen::FileFailure;

use super::output::{Output, Report};

/// Report data from a pipeline run without output.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the request that was checked.
    pub request_path: PathBuf,
    /// Number of loaded files.
    pub loaded: usize,
    /// Number of files marked for generation.
    pub surfaced: usize,
    /// Artifacts that would be produced.
    pub artifacts: Vec<String>,
    /// Files whose generation was aborted.
    pub failures: Vec<FileFailure>,
}

impl CheckReport {
    /// Check if every file generated cleanly.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for failure in &self.failures {
            out.diagnostic(failure.error.as_ref());
        }
        if !self.is_success() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.request_path.display()));
        out.newline();
        out.key_value("Loaded files", &self.loaded.to_string());
        out.key_value("Surfaced files", &self.surfaced.to_string());

        if !self.artifacts.is_empty() {
            out.newline();
            out.section("Would generate");
            for name in &self.artifacts {
                out.list_item(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use protogen_codegen::Error;

    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    fn report(failures: Vec<FileFailure>) -> CheckReport {
        CheckReport {
            request_path: PathBuf::from("request.json"),
            loaded: 3,
            surfaced: 1,
            artifacts: vec!["a.pb.rs".to_string()],
            failures,
        }
    }

    #[test]
    fn test_render_valid() {
        let mut out = RecordingOutput::default();
        report(Vec::new()).render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "✓ request.json is valid",
                "",
                "Loaded files: 3",
                "Surfaced files: 1",
                "",
                "Would generate:",
                "  - a.pb.rs",
            ]
        );
    }

    #[test]
    fn test_render_failures_only() {
        let failure = FileFailure {
            file: "a.proto".to_string(),
            error: Error::strategy("structs", "a.proto", "boom"),
        };

        let mut out = RecordingOutput::default();
        let report = report(vec![failure]);
        report.render(&mut out);

        assert!(!report.is_success());
        assert_eq!(out.lines.len(), 1);
        assert!(out.lines[0].starts_with("error: "));
    }
}

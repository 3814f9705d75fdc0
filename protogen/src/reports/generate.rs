//! Generate command report data structures.

use std::path::PathBuf;

use protogen_codegen::FileFailure;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Generation result (files written or preview).
    pub result: GenerationResult,
    /// Files whose generation was aborted.
    pub failures: Vec<FileFailure>,
}

impl GenerateReport {
    /// Check if every file generated cleanly.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// Result when files were written to disk.
#[derive(Debug, Default)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Artifacts whose content changed.
    pub written: Vec<String>,
    /// Artifacts already up to date.
    pub unchanged: Vec<String>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(result) => render_written(result, out),
            GenerationResult::Preview(files) => render_preview(files, out),
        }

        for failure in &self.failures {
            out.diagnostic(failure.error.as_ref());
        }
    }
}

fn render_written(result: &WrittenResult, out: &mut dyn Output) {
    if result.written.is_empty() && result.unchanged.is_empty() {
        out.preformatted("No files generated.");
        return;
    }

    if !result.written.is_empty() {
        out.section(&format!("Generated in {}", result.output_dir.display()));
        for path in &result.written {
            out.added_item(path);
        }
    }
    if !result.unchanged.is_empty() {
        out.section("Unchanged");
        for path in &result.unchanged {
            out.list_item(path);
        }
    }
}

fn render_preview(files: &[PreviewFile], out: &mut dyn Output) {
    for file in files {
        out.divider(&file.path);
        out.preformatted(&file.content);
    }

    out.divider("Summary");
    out.preformatted(&format!("{} files would be generated", files.len()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            result: GenerationResult::Written(WrittenResult {
                output_dir: PathBuf::from("out"),
                written: vec!["a.pb.rs".to_string()],
                unchanged: vec!["b.pb.rs".to_string()],
            }),
            failures: Vec::new(),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec!["Generated in out:", "  + a.pb.rs", "Unchanged:", "  - b.pb.rs"]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            result: GenerationResult::Preview(vec![PreviewFile {
                path: "a.pb.rs".to_string(),
                content: "pub struct A {}".to_string(),
            }]),
            failures: Vec::new(),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "── a.pb.rs ──");
        assert_eq!(out.lines[1], "pub struct A {}");
        assert_eq!(out.lines[3], "1 files would be generated");
    }
}

//! Generate operation - writing pipeline artifacts to disk.

use std::path::{Component, Path, PathBuf};

use eyre::{Context, Result, bail};
use protogen_codegen::GenerationReport;
use protogen_core::{File, WriteResult};

use crate::reports::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Root directory artifact names are resolved against.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Writes every artifact of a finished pipeline run, or collects them for
/// preview. Per-file failures are carried into the report untouched.
pub fn generate(outcome: GenerationReport, opts: GenerateOptions) -> Result<GenerateReport> {
    let GenerationReport {
        artifacts,
        failures,
    } = outcome;

    let result = if opts.dry_run {
        GenerationResult::Preview(
            artifacts
                .into_iter()
                .map(|a| PreviewFile {
                    path: a.name,
                    content: a.content,
                })
                .collect(),
        )
    } else {
        // Nothing is written unless every artifact stays inside the output directory.
        let paths = artifacts
            .iter()
            .map(|a| artifact_path(opts.output_dir, &a.name))
            .collect::<Result<Vec<_>>>()?;

        let mut written = WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            ..WrittenResult::default()
        };
        for (artifact, path) in artifacts.into_iter().zip(paths) {
            let file = File::new(path, artifact.content);
            let outcome = file
                .write()
                .wrap_err_with(|| format!("Failed to write {}", file.path().display()))?;
            tracing::debug!(path = %file.path().display(), ?outcome, "wrote artifact");

            match outcome {
                WriteResult::Written => written.written.push(artifact.name),
                WriteResult::Unchanged => written.unchanged.push(artifact.name),
            }
        }
        GenerationResult::Written(written)
    };

    Ok(GenerateReport { result, failures })
}

/// Resolve an artifact name against the output directory.
///
/// Names must be relative and may not climb out with `..`.
fn artifact_path(output_dir: &Path, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name);
    let escapes = relative.as_os_str().is_empty()
        || relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
    if escapes {
        bail!(
            "Refusing to write artifact '{}' outside {}",
            name,
            output_dir.display()
        );
    }
    Ok(output_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use protogen_codegen::Artifact;
    use tempfile::TempDir;

    use super::*;

    fn outcome() -> GenerationReport {
        GenerationReport {
            artifacts: vec![
                Artifact {
                    name: "shop/order.pb.rs".to_string(),
                    content: "pub struct Order {}\n".to_string(),
                },
                Artifact {
                    name: "a.pb.rs".to_string(),
                    content: "pub struct A {}\n".to_string(),
                },
            ],
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_generate_writes_artifacts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.pb.rs"), "pub struct A {}\n").unwrap();

        let report = generate(
            outcome(),
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(report.is_success());
        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written result");
        };
        assert_eq!(written.written, vec!["shop/order.pb.rs"]);
        assert_eq!(written.unchanged, vec!["a.pb.rs"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("shop/order.pb.rs")).unwrap(),
            "pub struct Order {}\n"
        );
    }

    #[test]
    fn test_artifact_outside_output_dir_is_rejected() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("out");
        let mut outcome = outcome();
        outcome.artifacts.push(Artifact {
            name: "../escape.pb.rs".to_string(),
            content: "pub struct Escape {}\n".to_string(),
        });

        let err = generate(
            outcome,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: false,
            },
        )
        .unwrap_err();

        assert!(err.to_string().contains("../escape.pb.rs"));
        assert!(!temp.path().join("escape.pb.rs").exists());
        assert!(!output_dir.join("a.pb.rs").exists());
    }

    #[test]
    fn test_artifact_path() {
        let dir = Path::new("out");
        assert_eq!(artifact_path(dir, "shop/order.pb.rs").unwrap(), dir.join("shop/order.pb.rs"));
        assert!(artifact_path(dir, "/etc/passwd.pb.rs").is_err());
        assert!(artifact_path(dir, "shop/../../x.pb.rs").is_err());
        assert!(artifact_path(dir, "").is_err());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();

        let report = generate(
            outcome(),
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: true,
            },
        )
        .unwrap();

        let GenerationResult::Preview(files) = &report.result else {
            panic!("expected preview result");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "shop/order.pb.rs");
        assert!(!temp.path().join("shop").exists());
    }
}

//! Core operations.
//!
//! This module contains the business logic for protogen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

pub use check::check;
pub use generate::generate;

use protogen_codegen::{GenerationReport, GeneratorConfig, Pipeline};
use protogen_codegen_rust::StructStrategy;
use protogen_ir::GenerateRequest;

/// Run the bundled struct strategy over every file of the request.
pub fn run_pipeline(
    request: &GenerateRequest,
    config: GeneratorConfig,
) -> protogen_codegen::Result<GenerationReport> {
    Pipeline::new()
        .config(config)
        .run(request, &mut StructStrategy::new())
}

/// Append command-line parameters to the request's own parameter string.
///
/// Later entries override earlier ones, so the command line wins.
pub fn merge_parameters(request: Option<&str>, extra: &[String]) -> Option<String> {
    let merged: Vec<&str> = request
        .into_iter()
        .chain(extra.iter().map(String::as_str))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if merged.is_empty() {
        None
    } else {
        Some(merged.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_parameters() {
        assert_eq!(merge_parameters(None, &[]), None);
        assert_eq!(merge_parameters(Some(" "), &[]), None);
        assert_eq!(
            merge_parameters(Some("extension=rs"), &[]).as_deref(),
            Some("extension=rs")
        );
        assert_eq!(
            merge_parameters(
                Some("extension=rs"),
                &["list_messages=false".to_string(), "extension=gen.rs".to_string()]
            )
            .as_deref(),
            Some("extension=rs,list_messages=false,extension=gen.rs")
        );
    }

    #[test]
    fn test_command_line_parameter_wins() {
        let mut request = GenerateRequest::new()
            .generated_file(protogen_ir::FileUnit::new("a.proto"))
            .parameter("extension=rs");
        request.parameter =
            merge_parameters(request.parameter.as_deref(), &["extension=gen.rs".to_string()]);

        let outcome = run_pipeline(&request, GeneratorConfig::default()).unwrap();
        assert_eq!(outcome.artifacts[0].name, "a.gen.rs");
    }
}

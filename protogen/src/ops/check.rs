//! Check operation - pipeline run without output.

use std::path::Path;

use protogen_codegen::GenerationReport;
use protogen_ir::GenerateRequest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Summarizes a finished pipeline run; nothing is written.
pub fn check(
    request_path: &Path,
    request: &GenerateRequest,
    outcome: GenerationReport,
) -> CheckReport {
    CheckReport {
        request_path: request_path.to_path_buf(),
        loaded: request.files.len(),
        surfaced: request.generate.len(),
        artifacts: outcome.artifacts.into_iter().map(|a| a.name).collect(),
        failures: outcome.failures,
    }
}

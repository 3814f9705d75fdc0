//! Pipeline orchestrator.

use miette::{NamedSource, SourceSpan};
use protogen_ir::{FileUnit, GenerateRequest};

use super::{Artifact, Batch, FileContext, FileFailure, GenerationReport, Stage, StageHook, Strategy};
use crate::{
    Canonicalizer, Error, GeneratorConfig, Result, RustCanonicalizer, naming::output_file_name,
};

/// The generation pipeline orchestrator.
///
/// Every loaded file goes through the same stages: the strategy writes the
/// body, the header and the imports the body used are written in front of
/// it, and the assembled text is parsed and printed back in canonical form.
/// Only files marked for generation are surfaced as artifacts.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .config(config)
///     .hook(MyHook::new());
///
/// let report = pipeline.run(&request, &mut StructStrategy::new())?;
/// ```
pub struct Pipeline<C = RustCanonicalizer> {
    canonicalizer: C,
    config: GeneratorConfig,
    hooks: Vec<Box<dyn StageHook>>,
}

impl Pipeline {
    /// Create a pipeline with the Rust canonicalizer and default settings.
    pub fn new() -> Self {
        Self {
            canonicalizer: RustCanonicalizer,
            config: GeneratorConfig::default(),
            hooks: Vec::new(),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Canonicalizer> Pipeline<C> {
    /// Replace the canonicalizer.
    pub fn canonicalizer<D: Canonicalizer>(self, canonicalizer: D) -> Pipeline<D> {
        Pipeline {
            canonicalizer,
            config: self.config,
            hooks: self.hooks,
        }
    }

    /// Set the base configuration. The request's parameter string is
    /// applied on top of it for each run.
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a hook to receive stage transitions.
    pub fn hook(mut self, hook: impl StageHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Run the pipeline over every file of a request.
    ///
    /// # Errors
    ///
    /// Returns the first batch-fatal error (unresolved type, syntax error,
    /// missing file, bad parameter, strategy initialization). Errors that
    /// only concern one file are collected in the report instead.
    pub fn run(
        &self,
        request: &GenerateRequest,
        strategy: &mut dyn Strategy,
    ) -> Result<GenerationReport> {
        let mut config = self.config.clone();
        if let Some(parameter) = request.parameter.as_deref() {
            config.apply_parameter(parameter)?;
        }

        let mut batch = Batch::new(request, config)?.with_naming(strategy.naming());
        strategy.init(&mut batch)?;

        tracing::debug!(
            strategy = strategy.name(),
            files = request.files.len(),
            surfaced = request.generate.len(),
            "starting batch"
        );

        let mut report = GenerationReport::default();
        for file in batch.files() {
            match self.run_file(&mut batch, file, strategy) {
                Ok(content) if batch.is_surfaced(&file.name) => {
                    report.artifacts.push(Artifact {
                        name: output_file_name(&file.name, &batch.config().extension),
                        content,
                    });
                }
                Ok(_) => {}
                Err(error) if error.is_batch_fatal() => return Err(error),
                Err(error) => report.failures.push(FileFailure {
                    file: file.name.clone(),
                    error,
                }),
            }
        }

        Ok(report)
    }

    /// Drive one file through every stage, reporting failure to the hooks.
    fn run_file<'a>(
        &self,
        batch: &mut Batch<'a>,
        file: &'a FileUnit,
        strategy: &mut dyn Strategy,
    ) -> Result<String> {
        let span = tracing::debug_span!("file", name = %file.name);
        let _enter = span.enter();

        let mut tracker = StageTracker {
            file: &file.name,
            hooks: &self.hooks,
            stage: Stage::Idle,
        };
        let result = self.stages(batch, file, strategy, &mut tracker);
        if let Err(error) = &result {
            tracker.fail(error);
        }
        result
    }

    fn stages<'a>(
        &self,
        batch: &mut Batch<'a>,
        file: &'a FileUnit,
        strategy: &mut dyn Strategy,
        tracker: &mut StageTracker<'_>,
    ) -> Result<String> {
        batch.begin_file();
        let mut ctx = FileContext::new(batch, file);

        strategy.generate(&mut ctx)?;
        let body = ctx.take_output();
        tracker.advance(Stage::BodyGenerated)?;

        ctx.write_header();
        strategy.generate_imports(&mut ctx)?;
        ctx.out().push_raw(&body);
        let assembled = ctx.into_output();
        tracker.advance(Stage::Assembled)?;

        let tree = self.canonicalizer.parse(&assembled).map_err(|err| {
            Box::new(Error::Syntax {
                file: file.name.clone(),
                span: err.offset.map(SourceSpan::from),
                message: err.message,
                src: NamedSource::new(&file.name, assembled.clone()),
            })
        })?;
        tracker.advance(Stage::Parsed)?;

        let content = self.canonicalizer.print(&tree);
        tracker.advance(Stage::Canonicalized)?;

        tracker.advance(Stage::Done)?;
        Ok(content)
    }
}

struct StageTracker<'p> {
    file: &'p str,
    hooks: &'p [Box<dyn StageHook>],
    stage: Stage,
}

impl StageTracker<'_> {
    fn advance(&mut self, stage: Stage) -> Result<()> {
        debug_assert_eq!(self.stage.next(), Some(stage));
        self.stage = stage;
        tracing::debug!(stage = stage.name(), "stage reached");
        for hook in self.hooks {
            hook.on_stage(self.file, stage)?;
        }
        Ok(())
    }

    fn fail(&mut self, error: &Error) {
        tracing::warn!(
            file = self.file,
            stage = self.stage.name(),
            error = %error,
            "file generation failed"
        );
        self.stage = Stage::Failed;
        for hook in self.hooks {
            if let Err(hook_error) = hook.on_stage(self.file, Stage::Failed) {
                tracing::warn!(hook = hook.name(), error = %hook_error, "stage hook failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use protogen_ir::Message;

    use super::*;

    struct Recorder {
        seen: Arc<Mutex<Vec<(String, Stage)>>>,
    }

    impl StageHook for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn on_stage(&self, file: &str, stage: Stage) -> Result<()> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((file.to_string(), stage));
            }
            Ok(())
        }
    }

    struct Units;

    impl Strategy for Units {
        fn name(&self) -> &'static str {
            "units"
        }

        fn generate(&mut self, ctx: &mut FileContext<'_, '_>) -> Result<()> {
            let file = ctx.file();
            for message in file.messages() {
                ctx.out().push_line(&format!("pub struct {};", message.name));
            }
            Ok(())
        }
    }

    #[test]
    fn test_pipeline_hooks_see_every_stage() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().hook(Recorder { seen: seen.clone() });
        let request = GenerateRequest::new()
            .generated_file(FileUnit::new("a.proto").message(Message::new("A")));

        let report = pipeline.run(&request, &mut Units).expect("pipeline should succeed");
        assert!(report.is_success());
        assert_eq!(report.artifacts[0].name, "a.pb.rs");

        let stages: Vec<Stage> = seen.lock().unwrap().iter().map(|(_, s)| *s).collect();
        assert_eq!(
            stages,
            vec![
                Stage::BodyGenerated,
                Stage::Assembled,
                Stage::Parsed,
                Stage::Canonicalized,
                Stage::Done,
            ]
        );
    }

    #[test]
    fn test_request_parameter_applies() {
        let request = GenerateRequest::new()
            .generated_file(FileUnit::new("a/b.proto").message(Message::new("B")))
            .parameter("extension=rs");

        let report = Pipeline::new().run(&request, &mut Units).unwrap();
        assert_eq!(report.artifacts[0].name, "a/b.rs");
    }

    #[test]
    fn test_bad_parameter_is_fatal() {
        let request = GenerateRequest::new()
            .generated_file(FileUnit::new("a.proto"))
            .parameter("bogus=1");

        let err = Pipeline::new().run(&request, &mut Units).unwrap_err();
        assert!(matches!(*err, Error::Parameter { .. }));
    }
}

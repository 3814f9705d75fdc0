//! State shared by every file of one generation run.

use protogen_ir::{FileUnit, GenerateRequest};

use crate::naming::{NamingConvention, RUST_IDENTIFIERS};
use crate::{Error, GeneratorConfig, ImportRegistry, Result, TypeIndex};

/// One generation run: the loaded files, the type index over them, the
/// import registry and the configuration.
///
/// The registry and the index live exactly as long as the batch, so alias
/// uniqueness holds across all of its files.
#[derive(Debug)]
pub struct Batch<'a> {
    request: &'a GenerateRequest,
    index: TypeIndex<'a>,
    imports: ImportRegistry,
    config: GeneratorConfig,
    naming: NamingConvention,
}

impl<'a> Batch<'a> {
    /// Index the request and set up an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFile`] when a file marked for generation is
    /// not among the loaded files.
    pub fn new(request: &'a GenerateRequest, config: GeneratorConfig) -> Result<Self> {
        if let Some(name) = request
            .generate
            .iter()
            .find(|name| request.find_file(name).is_none())
        {
            return Err(Box::new(Error::MissingFile { name: name.clone() }));
        }

        let imports = match config.import_prefix.as_deref() {
            Some(prefix) => ImportRegistry::with_prefix(prefix),
            None => ImportRegistry::new(),
        };

        Ok(Self {
            request,
            index: TypeIndex::build(&request.files),
            imports,
            config,
            naming: RUST_IDENTIFIERS,
        })
    }

    /// Use `naming` for type references written in this batch.
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    pub fn request(&self) -> &'a GenerateRequest {
        self.request
    }

    /// All loaded files, in request order.
    pub fn files(&self) -> &'a [FileUnit] {
        &self.request.files
    }

    pub fn index(&self) -> &TypeIndex<'a> {
        &self.index
    }

    pub fn imports(&self) -> &ImportRegistry {
        &self.imports
    }

    pub fn imports_mut(&mut self) -> &mut ImportRegistry {
        &mut self.imports
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Whether the named file's artifact is surfaced.
    pub fn is_surfaced(&self, name: &str) -> bool {
        self.request.is_generated(name)
    }

    /// Reset per-file state before generating the next file.
    pub fn begin_file(&mut self) {
        self.imports.begin_file();
    }
}

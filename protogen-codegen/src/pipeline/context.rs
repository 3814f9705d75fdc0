//! Per-file view of the batch handed to strategies.

use protogen_ir::{Field, FileUnit};

use super::{Batch, header};
use crate::{
    CodeBuilder, Declaration, Error, GeneratorConfig, ImportHandle, Result, custom_type,
    naming::module_path_for,
};

/// Everything a strategy may touch while generating one file.
///
/// Holds the batch mutably for the duration of the file, so import requests
/// and references land in the batch-wide registry.
pub struct FileContext<'b, 'a> {
    batch: &'b mut Batch<'a>,
    file: &'a FileUnit,
    out: CodeBuilder,
}

impl<'b, 'a> FileContext<'b, 'a> {
    pub(crate) fn new(batch: &'b mut Batch<'a>, file: &'a FileUnit) -> Self {
        Self {
            batch,
            file,
            out: CodeBuilder::rust(),
        }
    }

    /// The file being generated.
    pub fn file(&self) -> &'a FileUnit {
        self.file
    }

    /// Output buffer for the current section of the file.
    pub fn out(&mut self) -> &mut CodeBuilder {
        &mut self.out
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.batch.config()
    }

    pub fn batch(&self) -> &Batch<'a> {
        &*self.batch
    }

    /// Register interest in an import path. Nothing is emitted unless the
    /// handle is later [referenced](Self::reference).
    pub fn request_import(&mut self, path: &str) -> ImportHandle {
        self.batch.imports_mut().request(path)
    }

    /// Alias to write in code for `handle`; marks the import as used by
    /// this file.
    pub fn reference(&mut self, handle: ImportHandle) -> String {
        self.batch.imports_mut().reference(handle).to_string()
    }

    pub fn is_used(&self, handle: ImportHandle) -> bool {
        self.batch.imports().is_used(handle)
    }

    /// Write one `use` item per import referenced so far.
    pub fn write_used_imports(&mut self) {
        for decl in self.batch.imports().used_imports() {
            self.out.push_line(&decl.to_string());
        }
    }

    /// Type reference for the field's custom type, importing its path.
    ///
    /// Returns `Ok(None)` when the field has no custom type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the annotation is malformed.
    pub fn custom_type(&mut self, field: &Field) -> Result<Option<String>> {
        let annotation = field.options.custom_type.as_deref();
        let resolved = custom_type::resolve(annotation).map_err(|source| {
            Box::new(Error::Configuration {
                file: self.file.name.clone(),
                field: field.name.clone(),
                annotation: source.annotation.clone(),
                source,
            })
        })?;

        if resolved.is_empty() {
            return Ok(None);
        }
        let naming = *self.batch.naming();
        if !resolved.is_imported() {
            return Ok(Some(naming.safe_name(&resolved.reference)));
        }

        let handle = self.request_import(&resolved.import_path);
        let alias = self.reference(handle);
        Ok(Some(format!("{alias}::{}", naming.safe_name(&resolved.type_name))))
    }

    /// Look up a declaration that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedType`], which aborts the batch.
    pub fn resolve(&self, type_name: &str) -> Result<Declaration<'a>> {
        self.batch
            .index()
            .resolve(type_name)
            .cloned()
            .map_err(|e| e.at(&self.file.name, None))
    }

    /// Resolve the declaration a message, group or enum field refers to.
    pub fn resolve_field(&self, field: &Field) -> Result<Declaration<'a>> {
        let type_name = field.type_name.as_deref().unwrap_or_default();
        self.batch
            .index()
            .resolve(type_name)
            .cloned()
            .map_err(|e| e.at(&self.file.name, Some(&field.name)))
    }

    /// Whether the field refers to a group. Unknown types are not groups.
    pub fn is_group(&self, field: &Field) -> bool {
        field
            .type_name
            .as_deref()
            .is_some_and(|name| self.batch.index().is_group(name))
    }

    /// Path to write in code for a declaration.
    ///
    /// Declarations from this file, or another file of the same package,
    /// use their local name. Anything else goes through the import of the
    /// declaring file's module. The batch's naming convention applies to
    /// the name in both cases.
    pub fn type_path(&mut self, decl: &Declaration<'a>) -> String {
        let name = self.batch.naming().type_name(&decl.local_name);
        if self.is_local(decl.file) {
            return name;
        }
        let handle = self.batch.imports_mut().request_local(&module_path_for(decl.file));
        let alias = self.reference(handle);
        format!("{alias}::{name}")
    }

    fn is_local(&self, other: &FileUnit) -> bool {
        if other.name == self.file.name {
            return true;
        }
        match (self.file.package.as_deref(), other.package.as_deref()) {
            (Some(mine), Some(theirs)) => !mine.is_empty() && mine == theirs,
            _ => false,
        }
    }

    /// Create a strategy error for the current file.
    pub fn strategy_error(
        &self,
        strategy: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Box<Error> {
        Error::strategy(strategy, &self.file.name, source)
    }

    pub(crate) fn write_header(&mut self) {
        header::write_header(&mut self.out, self.file, self.batch.config());
    }

    pub(crate) fn take_output(&mut self) -> String {
        self.out.take()
    }

    pub(crate) fn into_output(self) -> String {
        self.out.build()
    }
}

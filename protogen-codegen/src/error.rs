use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::custom_type::MalformedCustomType;

/// Result type for generation (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Errors raised while generating a batch.
///
/// [`Error::is_batch_fatal`] tells whether an error stops the whole batch or
/// only the file it was raised for.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid custom type on field '{field}' in {file}")]
    #[diagnostic(code(protogen::configuration))]
    Configuration {
        file: String,
        field: String,
        annotation: String,
        #[source]
        #[diagnostic_source]
        source: MalformedCustomType,
    },

    #[error("type '{type_name}' is not declared in any loaded file{}", location(.file, .field))]
    #[diagnostic(
        code(protogen::unresolved_type),
        help("the request must carry every file the generated files depend on")
    )]
    UnresolvedType {
        type_name: String,
        file: Option<String>,
        field: Option<String>,
    },

    #[error("generated code for {file} does not parse")]
    #[diagnostic(
        code(protogen::syntax),
        help("the generation strategy produced invalid Rust; the text shown is the assembled file")
    )]
    Syntax {
        file: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("strategy '{strategy}' failed on {file}")]
    #[diagnostic(code(protogen::strategy))]
    Strategy {
        strategy: String,
        file: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("'{name}' is marked for generation but was not loaded")]
    #[diagnostic(code(protogen::missing_file))]
    MissingFile { name: String },

    #[error("invalid generator parameter '{key}': {message}")]
    #[diagnostic(
        code(protogen::parameter),
        help("parameters are written as key=value pairs separated by commas")
    )]
    Parameter { key: String, message: String },

    #[error("failed to parse generator configuration")]
    #[diagnostic(code(protogen::config_file))]
    ConfigFile {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a strategy error wrapping any error type.
    pub fn strategy(
        strategy: impl Into<String>,
        file: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Box<Self> {
        Box::new(Error::Strategy {
            strategy: strategy.into(),
            file: file.into(),
            source: source.into(),
        })
    }

    /// Create an unresolved type error with no location attached yet.
    pub fn unresolved(type_name: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnresolvedType {
            type_name: type_name.into(),
            file: None,
            field: None,
        })
    }

    /// Create a configuration file error from a toml error.
    pub fn config_file(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigFile {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Whether the error aborts the whole batch rather than a single file.
    pub fn is_batch_fatal(&self) -> bool {
        !matches!(self, Error::Configuration { .. } | Error::Strategy { .. })
    }

    /// Attach the file and field an unresolved reference came from.
    ///
    /// Other errors are returned unchanged.
    pub fn at(mut self: Box<Self>, at_file: &str, at_field: Option<&str>) -> Box<Self> {
        if let Error::UnresolvedType { file, field, .. } = self.as_mut() {
            file.get_or_insert_with(|| at_file.to_string());
            if field.is_none() {
                *field = at_field.map(str::to_string);
            }
        }
        self
    }
}

fn location(file: &Option<String>, field: &Option<String>) -> String {
    match (file, field) {
        (Some(file), Some(field)) => format!(" (referenced by field '{field}' in {file})"),
        (Some(file), None) => format!(" (referenced in {file})"),
        _ => String::new(),
    }
}

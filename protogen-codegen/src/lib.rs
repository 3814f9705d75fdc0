//! Generation core for protogen.
//!
//! This crate turns the descriptor model of `protogen-ir` into canonical
//! Rust source through a pluggable [`Strategy`].
//!
//! # Module Organization
//!
//! - [`builder`] - Output buffer and renderable fragments (CodeBuilder, CodeFragment)
//! - [`imports`] - Deferred import registry with batch-wide aliases
//! - [`custom_type`] - Decoding of `import/path.Type` annotations
//! - [`type_index`] - Fully-qualified name lookup over all loaded files
//! - [`canonical`] - Parse-then-print canonicalization
//! - [`pipeline`] - The per-file stages and the batch driving them
//! - [`naming`] - Alias derivation, output names, naming conventions
//! - [`config`] - Generator settings and parameter strings
//! - [`types`] - Field type mapping for target languages

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
pub mod canonical;
pub mod config;
pub mod custom_type;
mod error;
pub mod imports;
pub mod naming;
pub mod pipeline;
pub mod type_index;
pub mod types;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use canonical::{Canonicalizer, RustCanonicalizer, SyntaxError};
pub use config::GeneratorConfig;
pub use custom_type::{CustomType, MalformedCustomType};
pub use error::{Error, Result};
pub use imports::{ImportDecl, ImportHandle, ImportRegistry};
pub use naming::NamingConvention;
pub use pipeline::{
    Artifact, Batch, FileContext, FileFailure, GenerationReport, Pipeline, Stage, StageHook,
    Strategy,
};
pub use type_index::{DeclKind, Declaration, TypeIndex};
pub use types::TypeMapper;

//! Text building blocks handed to generation strategies.
//!
//! - [`CodeBuilder`] - indented output buffer, one per file being generated
//! - [`CodeFragment`] - intermediate representation for code pieces
//! - [`Renderable`] - trait for AST nodes that render to fragments
//! - [`Indent`] - indentation configuration
//!
//! Whitespace written here is not final: the pipeline re-prints every file
//! through the canonicalizer.

mod code_builder;
mod fragment;
mod indent;

pub use code_builder::CodeBuilder;
pub use fragment::{CodeFragment, Renderable};
pub use indent::Indent;

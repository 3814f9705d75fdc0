//! Core utilities and types for protogen.
//!
//! This crate provides the small, dependency-free building blocks shared by
//! the model, the code generation core and the CLI.

mod file;
mod utils;

// File operations
pub use file::{File, WriteResult};
// String and identifier utilities
pub use utils::{
    RUST_KEYWORDS, is_identifier, is_raw_identifier_forbidden, is_rust_keyword, to_pascal_case,
    to_snake_case,
};

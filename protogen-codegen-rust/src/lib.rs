//! Rust data-type generation for protogen.
//!
//! [`StructStrategy`] plugs into the `protogen-codegen` pipeline and writes
//! plain structs and enums for every declaration of a file.

mod naming;
mod strategy;
mod type_mapper;

pub mod ast;

pub use ast::{Enum, Field, Struct, Variant};
pub use naming::RUST_NAMING;
pub use strategy::StructStrategy;
pub use type_mapper::RustTypeMapper;

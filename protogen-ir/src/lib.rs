//! Interface-description model for protogen.
//!
//! This crate provides the descriptor types the generator consumes: files,
//! messages, enums, fields and their options. They mirror the shape of a
//! protobuf `FileDescriptorProto` closely enough that a loader can map one
//! onto the other, and they deserialize from JSON for tooling and tests.
//!
//! # Architecture
//!
//! ```text
//! request.json → GenerateRequest (loading) → protogen-codegen (pipeline) → artifacts
//! ```
//!
//! The model is read-only once loaded. The generator never mutates it.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod model;
mod request;

pub use error::{Error, Result};
pub use model::{Enum, EnumValue, Field, FieldKind, FieldOptions, FileUnit, Label, Message};
pub use request::GenerateRequest;

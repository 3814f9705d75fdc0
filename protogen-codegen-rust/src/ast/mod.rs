//! Rust AST builders for generating structs and enums.
//!
//! These provide a high-level API for constructing Rust syntax,
//! which can then be rendered via CodeBuilder.

mod enums;
mod structs;

pub use enums::{Enum, Variant};
pub use structs::{Field, Struct};

//! Rust-specific naming conventions.

use protogen_codegen::NamingConvention;
use protogen_codegen::naming::escape_rust_reserved;
use protogen_core::{RUST_KEYWORDS, to_pascal_case, to_snake_case};

/// Declared names are kept as written; nesting is already joined with `_`.
fn keep_declared(name: &str) -> String {
    name.to_string()
}

/// `COLOR_RED` -> `ColorRed`, `darkBlue` -> `DarkBlue`.
fn value_to_variant(name: &str) -> String {
    if name.chars().any(|c| c.is_ascii_lowercase()) {
        to_pascal_case(name)
    } else {
        to_pascal_case(&name.to_ascii_lowercase())
    }
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    decl_to_type: keep_declared,
    value_to_variant,
    field_to_name: to_snake_case,
    reserved_words: RUST_KEYWORDS,
    escape_reserved: escape_rust_reserved,
};

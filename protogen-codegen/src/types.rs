//! Mapping of declared field types to target-language type syntax.

use protogen_ir::FieldKind;

/// Maps field kinds and wrappers to type syntax.
///
/// Implemented per target language; strategies combine the pieces.
pub trait TypeMapper {
    /// Language identifier (e.g., "rust").
    fn language(&self) -> &'static str;

    /// Type for a scalar kind. `None` for message, group and enum kinds,
    /// which name a declaration instead.
    fn map_scalar(&self, kind: FieldKind) -> Option<&'static str>;

    fn map_optional(&self, inner: &str) -> String;

    fn map_array(&self, inner: &str) -> String;

    /// Indirection for recursive message types.
    fn map_boxed(&self, inner: &str) -> String;

    /// Map type from `container`, the path of the module providing it.
    fn map_map(&self, container: &str, key: &str, value: &str) -> String;
}

//! Rust type mapper implementation.

use protogen_codegen::TypeMapper;
use protogen_ir::FieldKind;

/// Rust type mapper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn map_scalar(&self, kind: FieldKind) -> Option<&'static str> {
        let ty = match kind {
            FieldKind::Double => "f64",
            FieldKind::Float => "f32",
            FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => "i64",
            FieldKind::Uint64 | FieldKind::Fixed64 => "u64",
            FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 => "i32",
            FieldKind::Uint32 | FieldKind::Fixed32 => "u32",
            FieldKind::Bool => "bool",
            FieldKind::String => "String",
            FieldKind::Bytes => "Vec<u8>",
            FieldKind::Message | FieldKind::Group | FieldKind::Enum => return None,
        };
        Some(ty)
    }

    fn map_optional(&self, inner: &str) -> String {
        format!("Option<{}>", inner)
    }

    fn map_array(&self, inner: &str) -> String {
        format!("Vec<{}>", inner)
    }

    fn map_boxed(&self, inner: &str) -> String {
        format!("Box<{}>", inner)
    }

    fn map_map(&self, container: &str, key: &str, value: &str) -> String {
        format!("{}::HashMap<{}, {}>", container, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_scalar_types() {
        let mapper = RustTypeMapper;

        assert_eq!(mapper.map_scalar(FieldKind::Double), Some("f64"));
        assert_eq!(mapper.map_scalar(FieldKind::Sint64), Some("i64"));
        assert_eq!(mapper.map_scalar(FieldKind::Fixed32), Some("u32"));
        assert_eq!(mapper.map_scalar(FieldKind::Bytes), Some("Vec<u8>"));
        assert_eq!(mapper.map_scalar(FieldKind::String), Some("String"));
        assert_eq!(mapper.map_scalar(FieldKind::Message), None);
        assert_eq!(mapper.map_scalar(FieldKind::Enum), None);
    }

    #[test]
    fn test_rust_wrappers() {
        let mapper = RustTypeMapper;

        assert_eq!(mapper.language(), "rust");
        assert_eq!(mapper.map_optional("String"), "Option<String>");
        assert_eq!(mapper.map_array("i64"), "Vec<i64>");
        assert_eq!(mapper.map_boxed("Node"), "Box<Node>");
        assert_eq!(
            mapper.map_map("std_collections", "String", "i32"),
            "std_collections::HashMap<String, i32>"
        );
    }
}

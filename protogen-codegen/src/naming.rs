//! Naming rules shared by the registry, the resolver and strategies.

use protogen_core::{RUST_KEYWORDS, is_raw_identifier_forbidden, is_rust_keyword};
use protogen_ir::FileUnit;

/// Language-specific naming conventions.
///
/// Defines how declaration and field names are transformed and how reserved
/// words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a declaration name to a type name (e.g., "hello_world" -> "HelloWorld")
    pub decl_to_type: fn(&str) -> String,
    /// Transform an enum value name to a variant name (e.g., "COLOR_RED" -> "ColorRed")
    pub value_to_variant: fn(&str) -> String,
    /// Transform a field name (e.g., "userId" -> "user_id")
    pub field_to_name: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform and make safe for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        self.safe_name(&(self.decl_to_type)(name))
    }

    /// Transform and make safe for use as an enum variant.
    pub fn variant_name(&self, name: &str) -> String {
        self.safe_name(&(self.value_to_variant)(name))
    }

    /// Transform and make safe for use as a field name.
    pub fn field_name(&self, name: &str) -> String {
        self.safe_name(&(self.field_to_name)(name))
    }
}

/// Escape a Rust keyword: `type` -> `r#type`, `self` -> `self_`.
///
/// `self`, `Self`, `super` and `crate` cannot be raw identifiers and get a
/// `_` suffix instead.
pub fn escape_rust_reserved(name: &str) -> String {
    if is_raw_identifier_forbidden(name) {
        format!("{name}_")
    } else {
        format!("r#{name}")
    }
}

fn keep(name: &str) -> String {
    name.to_string()
}

/// Names kept as declared, Rust keywords escaped.
///
/// Used for type references unless the strategy supplies its own
/// convention through [`Strategy::naming`](crate::Strategy::naming).
pub const RUST_IDENTIFIERS: NamingConvention = NamingConvention {
    decl_to_type: keep,
    value_to_variant: keep,
    field_to_name: keep,
    reserved_words: RUST_KEYWORDS,
    escape_reserved: escape_rust_reserved,
};

/// Normalize an import path: `::` and `/` both separate levels, the result
/// uses `/` with no leading or trailing separator.
///
/// ```
/// use protogen_codegen::naming::canonical_path;
///
/// assert_eq!(canonical_path("std::collections"), "std/collections");
/// assert_eq!(canonical_path("/encoding/bytes/"), "encoding/bytes");
/// ```
pub fn canonical_path(path: &str) -> String {
    path.trim().replace("::", "/").trim_matches('/').to_string()
}

/// Derive the alias for an import path.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`. An empty result, a
/// leading digit or a keyword gets a `_` prefix.
pub fn package_alias(path: &str) -> String {
    let mut alias: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    let needs_prefix = alias.is_empty()
        || alias.starts_with(|c: char| c.is_ascii_digit())
        || is_rust_keyword(&alias)
        || alias == "_";
    if needs_prefix {
        alias.insert(0, '_');
    }
    alias
}

/// Render a canonical import path as a Rust path, prepending `prefix` when set.
///
/// Segments are sanitized the way aliases are; keyword segments are written
/// as raw identifiers unless they are path roots such as `crate`.
pub fn rust_path(prefix: Option<&str>, path: &str) -> String {
    let prefix = prefix.map(canonical_path).filter(|p| !p.is_empty());
    let full = match prefix {
        Some(prefix) => format!("{prefix}/{path}"),
        None => path.to_string(),
    };

    full.split('/')
        .filter(|segment| !segment.is_empty())
        .map(rust_segment)
        .collect::<Vec<_>>()
        .join("::")
}

fn rust_segment(segment: &str) -> String {
    if is_raw_identifier_forbidden(segment) {
        return segment.to_string();
    }
    if is_rust_keyword(segment) {
        return format!("r#{segment}");
    }
    package_alias(segment)
}

/// Name of the artifact produced for `name`: the `.proto` or `.protodevel`
/// suffix is dropped, `.{extension}` appended, directories kept.
///
/// ```
/// use protogen_codegen::naming::output_file_name;
///
/// assert_eq!(output_file_name("foo/bar.proto", "pb.rs"), "foo/bar.pb.rs");
/// assert_eq!(output_file_name("legacy.protodevel", "rs"), "legacy.rs");
/// ```
pub fn output_file_name(name: &str, extension: &str) -> String {
    let stem = name
        .strip_suffix(".proto")
        .or_else(|| name.strip_suffix(".protodevel"))
        .unwrap_or(name);
    let extension = extension.trim_start_matches('.');
    format!("{stem}.{extension}")
}

/// Import path of the module generated for `file`.
///
/// The package with `.` turned into `/` when the file has one, otherwise the
/// file's directory plus its snake-cased base name.
pub fn module_path_for(file: &FileUnit) -> String {
    if let Some(package) = file.package.as_deref().filter(|p| !p.is_empty()) {
        return canonical_path(&package.replace('.', "/"));
    }

    let base = protogen_core::to_snake_case(file.base_name());
    match file.name.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => format!("{dir}/{base}"),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_path() {
        assert_eq!(canonical_path("std::collections"), "std/collections");
        assert_eq!(canonical_path(" encoding/bytes "), "encoding/bytes");
        assert_eq!(canonical_path("::a::b"), "a/b");
        assert_eq!(canonical_path(""), "");
    }

    #[test]
    fn test_package_alias() {
        assert_eq!(package_alias("encoding/bytes"), "encoding_bytes");
        assert_eq!(package_alias("github.com/gogo/protobuf/proto"), "github_com_gogo_protobuf_proto");
        assert_eq!(package_alias("a-b/c.d"), "a_b_c_d");
        assert_eq!(package_alias("already_fine"), "already_fine");
    }

    #[test]
    fn test_package_alias_edge_cases() {
        assert_eq!(package_alias(""), "_");
        assert_eq!(package_alias("3d/mesh"), "_3d_mesh");
        assert_eq!(package_alias("type"), "_type");
        assert_eq!(package_alias("-"), "__");
    }

    #[test]
    fn test_rust_path() {
        assert_eq!(rust_path(None, "std/collections"), "std::collections");
        assert_eq!(rust_path(Some("crate::gen"), "shapes"), "crate::gen::shapes");
        assert_eq!(rust_path(None, "github.com/x/type"), "github_com::x::r#type");
        assert_eq!(rust_path(None, "3d/mesh"), "_3d::mesh");
        assert_eq!(rust_path(Some(""), "a/b"), "a::b");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("foo/bar.proto", "pb.rs"), "foo/bar.pb.rs");
        assert_eq!(output_file_name("plain", ".rs"), "plain.rs");
    }

    #[test]
    fn test_module_path_for() {
        let file = FileUnit::new("shapes/square.proto").package("geo.shapes");
        assert_eq!(module_path_for(&file), "geo/shapes");

        let file = FileUnit::new("foo/BarBaz.proto");
        assert_eq!(module_path_for(&file), "foo/bar_baz");

        let file = FileUnit::new("top.proto");
        assert_eq!(module_path_for(&file), "top");
    }
}

//! Custom-type annotations.
//!
//! A field may replace its generated type with an externally defined one by
//! naming it as `import/path.TypeName`. Everything before the last `.` is
//! the import path, the remainder is the bare type name.

use miette::Diagnostic;
use protogen_core::is_identifier;
use thiserror::Error;

use crate::naming::{canonical_path, package_alias};

/// Resolved form of a custom-type annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomType {
    /// Canonical import path; empty for local types.
    pub import_path: String,
    /// Bare type name (`Raw`).
    pub type_name: String,
    /// Sanitized alias of the import path; empty for local types.
    pub alias: String,
    /// Type reference to write in code (`encoding_bytes::Raw`).
    pub reference: String,
}

impl CustomType {
    /// Whether the type needs an import.
    pub fn is_imported(&self) -> bool {
        !self.import_path.is_empty()
    }

    /// Whether no annotation was given.
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }
}

/// A custom-type annotation that cannot be split into path and name.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("custom type '{annotation}' requires a qualified path and type name")]
#[diagnostic(
    code(protogen::custom_type::malformed),
    help("write it as `import/path.TypeName`, or a bare `TypeName` for a local type")
)]
pub struct MalformedCustomType {
    pub annotation: String,
}

/// Resolve a custom-type annotation.
///
/// ```
/// use protogen_codegen::custom_type::resolve;
///
/// let resolved = resolve(Some("encoding/bytes.Raw")).unwrap();
/// assert_eq!(resolved.import_path, "encoding/bytes");
/// assert_eq!(resolved.reference, "encoding_bytes::Raw");
///
/// let local = resolve(Some("Uuid")).unwrap();
/// assert!(!local.is_imported());
/// assert_eq!(local.reference, "Uuid");
///
/// assert!(resolve(Some("foo/Bar")).is_err());
/// ```
pub fn resolve(annotation: Option<&str>) -> Result<CustomType, MalformedCustomType> {
    let annotation = annotation.map(str::trim).unwrap_or_default();
    if annotation.is_empty() {
        return Ok(CustomType::default());
    }

    let malformed = || MalformedCustomType {
        annotation: annotation.to_string(),
    };

    let split = annotation
        .rsplit_once('.')
        .or_else(|| annotation.rsplit_once("::"));

    let Some((path, name)) = split else {
        if !is_identifier(annotation) {
            return Err(malformed());
        }
        return Ok(CustomType {
            type_name: annotation.to_string(),
            reference: annotation.to_string(),
            ..CustomType::default()
        });
    };

    let import_path = canonical_path(path);
    let segments_ok = !path.starts_with('/')
        && !path.ends_with('/')
        && !import_path.is_empty()
        && import_path.split('/').all(|segment| !segment.is_empty());
    if !segments_ok || !is_identifier(name) {
        return Err(malformed());
    }

    let alias = package_alias(&import_path);
    Ok(CustomType {
        reference: format!("{alias}::{name}"),
        type_name: name.to_string(),
        alias,
        import_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_annotation() {
        assert_eq!(resolve(None).unwrap(), CustomType::default());
        assert!(resolve(Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_splits_at_last_dot() {
        let resolved = resolve(Some("github.com/gogo/protobuf/test.Uuid")).unwrap();
        assert_eq!(resolved.import_path, "github.com/gogo/protobuf/test");
        assert_eq!(resolved.type_name, "Uuid");
        assert_eq!(resolved.alias, "github_com_gogo_protobuf_test");
        assert_eq!(resolved.reference, "github_com_gogo_protobuf_test::Uuid");
        assert!(resolved.is_imported());
    }

    #[test]
    fn test_rust_style_path() {
        let resolved = resolve(Some("uuid::Uuid")).unwrap();
        assert_eq!(resolved.import_path, "uuid");
        assert_eq!(resolved.reference, "uuid::Uuid");
    }

    #[test]
    fn test_local_type() {
        let resolved = resolve(Some("Money")).unwrap();
        assert_eq!(resolved.import_path, "");
        assert_eq!(resolved.alias, "");
        assert_eq!(resolved.reference, "Money");
    }

    #[test]
    fn test_malformed_annotations() {
        for annotation in ["foo/Bar", "foo.", ".Bar", "a//b.C", "/a.B", "a/.B", "a.b-c"] {
            let err = resolve(Some(annotation)).unwrap_err();
            assert_eq!(err.annotation, annotation);
        }
    }

    #[test]
    fn test_error_message() {
        let err = resolve(Some("foo/Bar")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "custom type 'foo/Bar' requires a qualified path and type name"
        );
    }
}

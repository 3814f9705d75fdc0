//! Lookup from fully-qualified type names to their declarations.

use std::collections::HashMap;

use protogen_ir::{Enum, FileUnit, Message};

use crate::{Error, Result};

/// What a qualified name refers to.
#[derive(Debug, Clone, Copy)]
pub enum DeclKind<'a> {
    Message(&'a Message),
    Enum(&'a Enum),
}

/// A message or enum declaration together with where it lives.
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    /// File that declares the type.
    pub file: &'a FileUnit,
    pub kind: DeclKind<'a>,
    /// Fully-qualified name with leading dot (`.pkg.Outer.Inner`).
    pub qualified_name: String,
    /// Name inside the generated module, nesting joined by `_` (`Outer_Inner`).
    pub local_name: String,
}

impl<'a> Declaration<'a> {
    pub fn is_message(&self) -> bool {
        matches!(self.kind, DeclKind::Message(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, DeclKind::Enum(_))
    }

    /// Whether this is a message declared with the group syntax.
    pub fn is_group(&self) -> bool {
        self.as_message().is_some_and(Message::is_group)
    }

    pub fn as_message(&self) -> Option<&'a Message> {
        match self.kind {
            DeclKind::Message(message) => Some(message),
            DeclKind::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&'a Enum> {
        match self.kind {
            DeclKind::Enum(e) => Some(e),
            DeclKind::Message(_) => None,
        }
    }
}

/// Index over every declaration of a batch, nested ones included.
///
/// Built once and never mutated; declarations borrow from the loaded files.
#[derive(Debug, Default)]
pub struct TypeIndex<'a> {
    types: HashMap<String, Declaration<'a>>,
}

impl<'a> TypeIndex<'a> {
    /// Index all declarations in `files`. The first definition of a name wins.
    pub fn build(files: &'a [FileUnit]) -> Self {
        let mut index = Self::default();
        for file in files {
            let prefix = file.qualified_prefix();
            for message in file.messages() {
                index.add_message(file, &prefix, "", message);
            }
            for e in file.enums() {
                index.add_enum(file, &prefix, "", e);
            }
        }
        index
    }

    fn add_message(&mut self, file: &'a FileUnit, scope: &str, local: &str, message: &'a Message) {
        let qualified_name = format!("{scope}.{}", message.name);
        let local_name = join_local(local, &message.name);

        for nested in &message.nested {
            self.add_message(file, &qualified_name, &local_name, nested);
        }
        for e in &message.enums {
            self.add_enum(file, &qualified_name, &local_name, e);
        }

        self.insert(Declaration {
            file,
            kind: DeclKind::Message(message),
            qualified_name,
            local_name,
        });
    }

    fn add_enum(&mut self, file: &'a FileUnit, scope: &str, local: &str, e: &'a Enum) {
        self.insert(Declaration {
            file,
            kind: DeclKind::Enum(e),
            qualified_name: format!("{scope}.{}", e.name),
            local_name: join_local(local, &e.name),
        });
    }

    fn insert(&mut self, decl: Declaration<'a>) {
        self.types.entry(decl.qualified_name.clone()).or_insert(decl);
    }

    /// Find a declaration, accepting names with or without the leading dot.
    pub fn lookup(&self, name: &str) -> Option<&Declaration<'a>> {
        match name.strip_prefix('.') {
            Some(_) => self.types.get(name),
            None => self.types.get(&format!(".{name}")),
        }
    }

    /// Find a declaration that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedType`] when nothing by that name is loaded.
    pub fn resolve(&self, name: &str) -> Result<&Declaration<'a>> {
        self.lookup(name).ok_or_else(|| Error::unresolved(name))
    }

    /// Whether `name` is a message declared as a group. Unknown names are not.
    pub fn is_group(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(Declaration::is_group)
    }

    /// Number of indexed declarations.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn join_local(outer: &str, name: &str) -> String {
    if outer.is_empty() {
        name.to_string()
    } else {
        format!("{outer}_{name}")
    }
}

#[cfg(test)]
mod tests {
    use protogen_ir::{Field, FieldKind};

    use super::*;

    fn files() -> Vec<FileUnit> {
        vec![
            FileUnit::new("shapes.proto")
                .package("geo")
                .message(
                    Message::new("Polygon")
                        .field(Field::scalar("sides", 1, FieldKind::Int32))
                        .nested(Message::new("Vertex").nested(Message::new("Label")))
                        .nested(Message::new("Result").as_group())
                        .enumeration(Enum::new("Kind").value("CONVEX", 0)),
                )
                .enumeration(Enum::new("Color").value("RED", 0)),
            FileUnit::new("plain.proto").message(Message::new("Loose")),
        ]
    }

    #[test]
    fn test_nested_declarations_are_indexed() {
        let files = files();
        let index = TypeIndex::build(&files);

        assert_eq!(index.len(), 7);

        let label = index.lookup(".geo.Polygon.Vertex.Label").unwrap();
        assert_eq!(label.local_name, "Polygon_Vertex_Label");
        assert_eq!(label.file.name, "shapes.proto");
        assert!(label.is_message());

        let kind = index.lookup(".geo.Polygon.Kind").unwrap();
        assert!(kind.is_enum());
        assert_eq!(kind.as_enum().map(|e| e.values.len()), Some(1));
    }

    #[test]
    fn test_lookup_without_leading_dot() {
        let files = files();
        let index = TypeIndex::build(&files);

        assert!(index.lookup("geo.Color").is_some());
        assert!(index.lookup(".Loose").is_some());
        assert!(index.lookup("Loose").is_some());
        assert!(index.lookup(".geo.Missing").is_none());
    }

    #[test]
    fn test_resolve_missing_is_error() {
        let files = files();
        let index = TypeIndex::build(&files);

        assert!(index.resolve(".geo.Polygon").is_ok());
        let err = index.resolve(".geo.Missing").unwrap_err();
        assert!(matches!(*err, Error::UnresolvedType { .. }));
        assert!(err.is_batch_fatal());
    }

    #[test]
    fn test_is_group() {
        let files = files();
        let index = TypeIndex::build(&files);

        assert!(index.is_group(".geo.Polygon.Result"));
        assert!(!index.is_group(".geo.Polygon"));
        assert!(!index.is_group(".geo.Color"));
        assert!(!index.is_group(".geo.Unknown"));
    }

    #[test]
    fn test_first_definition_wins() {
        let files = vec![
            FileUnit::new("a.proto").message(Message::new("Dup").as_group()),
            FileUnit::new("b.proto").message(Message::new("Dup")),
        ];
        let index = TypeIndex::build(&files);

        let decl = index.lookup(".Dup").unwrap();
        assert_eq!(decl.file.name, "a.proto");
        assert!(decl.is_group());
    }
}

//! Descriptor model types.

use serde::{Deserialize, Serialize};

/// One input file and the declarations it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUnit {
    /// File name relative to the import root (e.g., "foo/bar.proto").
    pub name: String,
    /// Dot-separated package (e.g., "example.foo").
    #[serde(default)]
    pub package: Option<String>,
    /// Names of files this file imports.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Top-level messages, in declaration order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Top-level enums, in declaration order.
    #[serde(default)]
    pub enums: Vec<Enum>,
}

impl FileUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn enumeration(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }

    /// Top-level messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Top-level enums.
    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    /// Prefix of every fully-qualified type declared in this file
    /// (".example.foo", or "" without a package).
    pub fn qualified_prefix(&self) -> String {
        match self.package.as_deref() {
            Some(pkg) if !pkg.is_empty() => format!(".{pkg}"),
            _ => String::new(),
        }
    }

    /// File name without directories or the `.proto`/`.protodevel` extension.
    pub fn base_name(&self) -> &str {
        let base = self.name.rsplit('/').next().unwrap_or(&self.name);
        base.strip_suffix(".proto")
            .or_else(|| base.strip_suffix(".protodevel"))
            .unwrap_or(base)
    }
}

/// A message declaration, possibly a group or a synthesized map entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub nested: Vec<Message>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    /// Declared with the `group` syntax.
    #[serde(default)]
    pub group: bool,
    /// Synthesized entry type backing a `map<K, V>` field.
    #[serde(default)]
    pub map_entry: bool,
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn nested(mut self, message: Message) -> Self {
        self.nested.push(message);
        self
    }

    pub fn enumeration(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }

    /// Mark this message as a group.
    pub fn as_group(mut self) -> Self {
        self.group = true;
        self
    }

    /// Mark this message as a map entry.
    pub fn as_map_entry(mut self) -> Self {
        self.map_entry = true;
        self
    }

    pub fn is_group(&self) -> bool {
        self.group
    }

    pub fn is_map_entry(&self) -> bool {
        self.map_entry
    }

    /// Look up a field by number (map entries use 1 for the key, 2 for the value).
    pub fn field_by_number(&self, number: i32) -> Option<&Field> {
        self.fields.iter().find(|f| f.number == number)
    }
}

/// An enum declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            number,
        });
        self
    }
}

/// A single enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    Optional,
    Required,
    Repeated,
}

/// Declared field type, following the protobuf wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl FieldKind {
    /// Kinds whose `type_name` names another declaration.
    pub fn is_reference(self) -> bool {
        matches!(self, Self::Message | Self::Group | Self::Enum)
    }
}

/// Extension options attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Externally-defined type replacing the generated one
    /// (e.g., "encoding/bytes.Raw").
    #[serde(default)]
    pub custom_type: Option<String>,
    /// `Some(false)` drops the optional wrapper.
    #[serde(default)]
    pub nullable: Option<bool>,
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub number: i32,
    pub kind: FieldKind,
    #[serde(default)]
    pub label: Label,
    /// Fully-qualified referenced type (e.g., ".pkg.Outer.Inner").
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub options: FieldOptions,
}

impl Field {
    /// A scalar field.
    pub fn scalar(name: impl Into<String>, number: i32, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            label: Label::Optional,
            type_name: None,
            options: FieldOptions::default(),
        }
    }

    /// A field referencing a message.
    pub fn message(name: impl Into<String>, number: i32, type_name: impl Into<String>) -> Self {
        Self::reference(name, number, FieldKind::Message, type_name)
    }

    /// A field referencing a group.
    pub fn group(name: impl Into<String>, number: i32, type_name: impl Into<String>) -> Self {
        Self::reference(name, number, FieldKind::Group, type_name)
    }

    /// A field referencing an enum.
    pub fn enumeration(name: impl Into<String>, number: i32, type_name: impl Into<String>) -> Self {
        Self::reference(name, number, FieldKind::Enum, type_name)
    }

    fn reference(
        name: impl Into<String>,
        number: i32,
        kind: FieldKind,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::scalar(name, number, kind)
        }
    }

    pub fn repeated(mut self) -> Self {
        self.label = Label::Repeated;
        self
    }

    pub fn required(mut self) -> Self {
        self.label = Label::Required;
        self
    }

    pub fn custom_type(mut self, annotation: impl Into<String>) -> Self {
        self.options.custom_type = Some(annotation.into());
        self
    }

    pub fn non_nullable(mut self) -> Self {
        self.options.nullable = Some(false);
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }

    /// Nullable unless the option explicitly says otherwise.
    pub fn is_nullable(&self) -> bool {
        self.options.nullable.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_prefix() {
        assert_eq!(FileUnit::new("a.proto").package("x.y").qualified_prefix(), ".x.y");
        assert_eq!(FileUnit::new("a.proto").qualified_prefix(), "");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(FileUnit::new("foo/bar.proto").base_name(), "bar");
        assert_eq!(FileUnit::new("legacy.protodevel").base_name(), "legacy");
        assert_eq!(FileUnit::new("plain").base_name(), "plain");
    }

    #[test]
    fn test_field_builders() {
        let field = Field::message("child", 3, ".pkg.Child").repeated();
        assert_eq!(field.kind, FieldKind::Message);
        assert_eq!(field.type_name.as_deref(), Some(".pkg.Child"));
        assert!(field.is_repeated());
        assert!(field.is_nullable());

        let field = Field::scalar("raw", 1, FieldKind::Bytes)
            .custom_type("encoding/bytes.Raw")
            .non_nullable();
        assert_eq!(field.options.custom_type.as_deref(), Some("encoding/bytes.Raw"));
        assert!(!field.is_nullable());
    }

    #[test]
    fn test_message_flags() {
        let group = Message::new("Result").as_group();
        assert!(group.is_group());
        assert!(!group.is_map_entry());

        let entry = Message::new("TagsEntry")
            .as_map_entry()
            .field(Field::scalar("key", 1, FieldKind::String))
            .field(Field::scalar("value", 2, FieldKind::Int32));
        assert!(entry.is_map_entry());
        assert_eq!(entry.field_by_number(2).map(|f| f.kind), Some(FieldKind::Int32));
    }

    #[test]
    fn test_field_kind_is_reference() {
        assert!(FieldKind::Message.is_reference());
        assert!(FieldKind::Group.is_reference());
        assert!(FieldKind::Enum.is_reference());
        assert!(!FieldKind::Bytes.is_reference());
    }
}

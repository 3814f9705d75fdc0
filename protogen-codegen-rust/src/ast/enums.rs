//! Rust enum builder.

use protogen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A variant in a fieldless Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub doc: Option<String>,
    pub discriminant: Option<i64>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            discriminant: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set an explicit discriminant, e.g., `Foo = 3`.
    pub fn discriminant(mut self, value: impl Into<i64>) -> Self {
        self.discriminant = Some(value.into());
        self
    }
}

/// Builder for Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    derives: Vec<String>,
    attrs: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            derives: Vec::new(),
            attrs: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Build the enum as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    fn variants_to_fragments(&self) -> Vec<CodeFragment> {
        self.variants
            .iter()
            .flat_map(|variant| {
                let mut fragments = Vec::new();

                if let Some(doc) = &variant.doc {
                    fragments.push(CodeFragment::RustDoc(doc.clone()));
                }

                let variant_str = match variant.discriminant {
                    Some(value) => format!("{} = {},", variant.name, value),
                    None => format!("{},", variant.name),
                };
                fragments.push(CodeFragment::Line(variant_str));

                fragments
            })
            .collect()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        for attr in &self.attrs {
            fragments.push(CodeFragment::Line(format!("#[{}]", attr)));
        }

        if self.variants.is_empty() {
            fragments.push(CodeFragment::Line(format!("pub enum {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::Block {
                header: format!("pub enum {} {{", self.name),
                body: self.variants_to_fragments(),
                close: Some("}".to_string()),
            });
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_enum() {
        let e = Enum::new("Empty").build();
        assert_eq!(e, "pub enum Empty {}\n");
    }

    #[test]
    fn test_enum_with_discriminants() {
        let e = Enum::new("Status")
            .derive("Debug")
            .derive("Clone")
            .attr("repr(i32)")
            .variant(Variant::new("Active").discriminant(0))
            .variant(Variant::new("Gone").discriminant(-1).doc("Deleted"))
            .build();

        insta::assert_snapshot!(e, @r"
        #[derive(Debug, Clone)]
        #[repr(i32)]
        pub enum Status {
            Active = 0,
            /// Deleted
            Gone = -1,
        }
        ");
    }

    #[test]
    fn test_variant_without_discriminant() {
        let e = Enum::new("Plain").variant(Variant::new("Only")).build();
        assert!(e.contains("    Only,\n"));
    }
}

//! Strategy emitting plain Rust data types for every message and enum.

use protogen_codegen::{
    FileContext, ImportHandle, NamingConvention, Result, Strategy, TypeMapper,
};
use protogen_ir::{Enum as EnumDecl, Field as FieldDecl, FieldKind, Message};

use crate::{
    RUST_NAMING, RustTypeMapper,
    ast::{Enum, Field, Struct, Variant},
};

const COLLECTIONS: &str = "std/collections";

/// Generates one struct per message and one `#[repr(i32)]` enum per enum.
///
/// Nested declarations are flattened with `_` (`Outer_Inner`), map-entry
/// messages become `HashMap` fields instead of structs.
#[derive(Debug, Clone, Copy)]
pub struct StructStrategy {
    mapper: RustTypeMapper,
    naming: NamingConvention,
}

impl StructStrategy {
    pub fn new() -> Self {
        Self {
            mapper: RustTypeMapper,
            naming: RUST_NAMING,
        }
    }

    fn write_message(
        &self,
        ctx: &mut FileContext<'_, '_>,
        outer: &str,
        message: &Message,
        collections: ImportHandle,
    ) -> Result<()> {
        if message.is_map_entry() {
            return Ok(());
        }

        let name = scoped(outer, &message.name);
        let mut node = Struct::new(self.naming.type_name(&name))
            .derive("Debug")
            .derive("Clone")
            .derive("PartialEq");
        if message.is_group() {
            node = node.doc(format!("Group `{}`.", message.name));
        }

        for field in &message.fields {
            let ty = self.field_type(ctx, field, collections)?;
            let mut member = Field::new(self.naming.field_name(&field.name), ty);
            if let Some(annotation) = custom_annotation(field) {
                member = member.doc(format!("Custom type `{annotation}`."));
            }
            node = node.field(member);
        }

        tracing::trace!(name = %name, fields = message.fields.len(), "writing struct");
        ctx.out().emit(&node).push_blank();

        for nested in &message.nested {
            self.write_message(ctx, &name, nested, collections)?;
        }
        for e in &message.enums {
            ctx.out().emit(&self.enum_node(&name, e)).push_blank();
        }
        Ok(())
    }

    fn enum_node(&self, outer: &str, e: &EnumDecl) -> Enum {
        let mut node = Enum::new(self.naming.type_name(&scoped(outer, &e.name)))
            .derive("Debug")
            .derive("Clone")
            .derive("Copy")
            .derive("PartialEq")
            .derive("Eq")
            .derive("Hash");

        // Aliased values share a number; only the first becomes a variant.
        let mut variants: Vec<(i32, String, Vec<&str>)> = Vec::new();
        for value in &e.values {
            match variants.iter_mut().find(|(number, ..)| *number == value.number) {
                Some((_, _, aliases)) => aliases.push(&value.name),
                None => variants.push((
                    value.number,
                    self.naming.variant_name(&value.name),
                    Vec::new(),
                )),
            }
        }
        for (number, name, aliases) in variants {
            let mut variant = Variant::new(name).discriminant(number);
            if !aliases.is_empty() {
                variant = variant.doc(format!("Also `{}`.", aliases.join("`, `")));
            }
            node = node.variant(variant);
        }

        // Zero-variant enums cannot carry a representation.
        if node.is_empty() {
            node
        } else {
            node.attr("repr(i32)")
        }
    }

    fn field_type(
        &self,
        ctx: &mut FileContext<'_, '_>,
        field: &FieldDecl,
        collections: ImportHandle,
    ) -> Result<String> {
        if let Some(custom) = ctx.custom_type(field)? {
            return Ok(self.wrap(field, custom, false));
        }

        if let Some(scalar) = self.mapper.map_scalar(field.kind) {
            let ty = scalar.to_string();
            return Ok(if field.is_repeated() {
                self.mapper.map_array(&ty)
            } else {
                ty
            });
        }

        let decl = ctx.resolve_field(field)?;
        let map_entry = decl.as_message().filter(|m| m.is_map_entry());
        if let (Some(entry), true) = (map_entry, field.is_repeated()) {
            let key = self.entry_type(ctx, entry, 1)?;
            let value = self.entry_type(ctx, entry, 2)?;
            let container = ctx.reference(collections);
            return Ok(self.mapper.map_map(&container, &key, &value));
        }

        let path = ctx.type_path(&decl);
        if field.kind == FieldKind::Enum {
            return Ok(if field.is_repeated() {
                self.mapper.map_array(&path)
            } else {
                path
            });
        }
        // Groups are embedded by value.
        let boxed = !ctx.is_group(field);
        Ok(self.wrap(field, path, boxed))
    }

    /// Apply the repeated and nullable wrappers to a referenced type.
    fn wrap(&self, field: &FieldDecl, ty: String, boxed: bool) -> String {
        if field.is_repeated() {
            return self.mapper.map_array(&ty);
        }
        if !field.is_nullable() {
            return ty;
        }
        let inner = if boxed { self.mapper.map_boxed(&ty) } else { ty };
        self.mapper.map_optional(&inner)
    }

    /// Key (1) or value (2) type of a map entry, without wrappers.
    fn entry_type(
        &self,
        ctx: &mut FileContext<'_, '_>,
        entry: &Message,
        number: i32,
    ) -> Result<String> {
        let Some(field) = entry.field_by_number(number) else {
            return Err(ctx.strategy_error(
                self.name(),
                format!("map entry '{}' has no field {}", entry.name, number),
            ));
        };

        if let Some(custom) = ctx.custom_type(field)? {
            return Ok(custom);
        }
        if let Some(scalar) = self.mapper.map_scalar(field.kind) {
            return Ok(scalar.to_string());
        }
        let decl = ctx.resolve_field(field)?;
        Ok(ctx.type_path(&decl))
    }
}

impl Default for StructStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for StructStrategy {
    fn name(&self) -> &'static str {
        "structs"
    }

    fn naming(&self) -> NamingConvention {
        self.naming
    }

    fn generate(&mut self, ctx: &mut FileContext<'_, '_>) -> Result<()> {
        // Requested for every file; only emitted where a map field uses it.
        let collections = ctx.request_import(COLLECTIONS);

        let file = ctx.file();
        for message in file.messages() {
            self.write_message(ctx, "", message, collections)?;
        }
        for e in file.enums() {
            ctx.out().emit(&self.enum_node("", e)).push_blank();
        }
        Ok(())
    }
}

fn custom_annotation(field: &FieldDecl) -> Option<&str> {
    field
        .options
        .custom_type
        .as_deref()
        .map(str::trim)
        .filter(|annotation| !annotation.is_empty())
}

fn scoped(outer: &str, name: &str) -> String {
    if outer.is_empty() {
        name.to_string()
    } else {
        format!("{outer}_{name}")
    }
}

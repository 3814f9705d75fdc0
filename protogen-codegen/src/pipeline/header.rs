//! Banner written at the top of every generated file.

use protogen_ir::FileUnit;

use crate::{CodeBuilder, GeneratorConfig};

/// Lints generated code is allowed to trip.
pub const ALLOWED_LINTS: &str = "dead_code, non_camel_case_types, non_snake_case";

/// Write the generated-code banner and crate-level attributes.
///
/// Uses inner doc comments so the banner survives canonicalization.
pub fn write_header(out: &mut CodeBuilder, file: &FileUnit, config: &GeneratorConfig) {
    out.push_inner_doc(&format!(
        "Code generated by {}. DO NOT EDIT.",
        config.generator
    ))
    .push_inner_doc(&format!("source: {}", file.name));

    let listed: Vec<&str> = file
        .messages()
        .iter()
        .filter(|m| !m.is_map_entry())
        .map(|m| m.name.as_str())
        .collect();

    if config.list_messages && !listed.is_empty() {
        out.push_inner_doc("")
            .push_inner_doc("It has these top-level messages:");
        for name in listed {
            out.push_inner_doc(&format!("- `{name}`"));
        }
    }

    out.push_line(&format!("#![allow({ALLOWED_LINTS})]"));
}

#[cfg(test)]
mod tests {
    use protogen_ir::Message;

    use super::*;

    #[test]
    fn test_header_lists_messages() {
        let file = FileUnit::new("shop/order.proto")
            .message(Message::new("Order"))
            .message(Message::new("TagsEntry").as_map_entry())
            .message(Message::new("Receipt"));

        let mut out = CodeBuilder::rust();
        write_header(&mut out, &file, &GeneratorConfig::default());

        insta::assert_snapshot!(out.build(), @r"
        //! Code generated by protogen. DO NOT EDIT.
        //! source: shop/order.proto
        //!
        //! It has these top-level messages:
        //! - `Order`
        //! - `Receipt`
        #![allow(dead_code, non_camel_case_types, non_snake_case)]
        ");
    }

    #[test]
    fn test_header_without_listing() {
        let file = FileUnit::new("empty.proto");
        let mut out = CodeBuilder::rust();
        write_header(&mut out, &file, &GeneratorConfig::default());
        assert!(!out.as_str().contains("top-level messages"));

        let file = FileUnit::new("a.proto").message(Message::new("A"));
        let config = GeneratorConfig {
            generator: "protoc-gen-x".to_string(),
            list_messages: false,
            ..GeneratorConfig::default()
        };
        let mut out = CodeBuilder::rust();
        write_header(&mut out, &file, &config);
        assert!(out.as_str().starts_with("//! Code generated by protoc-gen-x. DO NOT EDIT.\n"));
        assert!(!out.as_str().contains("- `A`"));
    }
}

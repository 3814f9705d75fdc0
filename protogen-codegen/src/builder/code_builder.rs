//! Output buffer for generated code.

use super::{CodeFragment, Indent, Renderable};

/// Indented output buffer a strategy writes a file body into.
///
/// # Example
///
/// ```
/// use protogen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::rust();
/// builder
///     .push_line("pub struct Foo {")
///     .push_indent()
///     .push_line("pub bar: u32,")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "pub struct Foo {\n    pub bar: u32,\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add an outer doc comment (`/// text`).
    pub fn push_rust_doc(&mut self, text: &str) -> &mut Self {
        self.push_doc("///", text)
    }

    /// Add an inner doc comment (`//! text`).
    ///
    /// Unlike plain `//` comments these are attributes, so they survive
    /// canonicalization.
    pub fn push_inner_doc(&mut self, text: &str) -> &mut Self {
        self.push_doc("//!", text)
    }

    fn push_doc(&mut self, prefix: &str, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(prefix);
        if !text.is_empty() {
            self.buffer.push(' ');
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::RustDoc(text) => {
                self.push_rust_doc(&text);
            }
        }
    }

    /// Move the written text out, leaving the buffer empty.
    ///
    /// Indentation level is reset as well.
    pub fn take(&mut self) -> String {
        self.indent_level = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutable_api_basic() {
        let mut builder = CodeBuilder::rust();
        builder
            .push_line("let x = 1;")
            .push_blank()
            .push_line("let y = 2;");
        assert_eq!(builder.build(), "let x = 1;\n\nlet y = 2;\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::new(Indent::Tab);
        builder.push_dedent().push_indent().push_line("x");
        assert_eq!(builder.current_indent(), 1);
        assert_eq!(builder.build(), "\tx\n");
    }

    #[test]
    fn test_doc_comments() {
        let mut builder = CodeBuilder::rust();
        builder
            .push_inner_doc("Generated.")
            .push_inner_doc("")
            .push_rust_doc("A message");
        assert_eq!(builder.build(), "//! Generated.\n//!\n/// A message\n");
    }

    #[test]
    fn test_take_resets_buffer() {
        let mut builder = CodeBuilder::rust();
        builder.push_indent().push_line("body");

        assert_eq!(builder.take(), "    body\n");
        assert!(builder.is_empty());
        assert_eq!(builder.current_indent(), 0);
    }

    #[test]
    fn test_emit_block_fragment() {
        struct BlockNode;
        impl Renderable for BlockNode {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::RustDoc("Entry point".to_string()),
                    CodeFragment::Block {
                        header: "fn main() {".to_string(),
                        body: vec![CodeFragment::Line("run();".to_string())],
                        close: Some("}".to_string()),
                    },
                ]
            }
        }

        let mut builder = CodeBuilder::rust();
        builder.emit(&BlockNode);
        assert_eq!(
            builder.build(),
            "/// Entry point\nfn main() {\n    run();\n}\n"
        );
    }
}

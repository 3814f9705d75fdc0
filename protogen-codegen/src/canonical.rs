//! Parse-then-print canonicalization of generated text.

use std::fmt;

/// A parse failure with the position it was detected at, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// Byte offset into the parsed text.
    pub offset: Option<usize>,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} (at byte {offset})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Turns assembled source text into its canonical form.
///
/// Parsing and printing are separate so the pipeline can report which of
/// the two stages a file reached.
pub trait Canonicalizer {
    /// Syntax tree produced by [`parse`](Canonicalizer::parse).
    type Tree;

    /// Parse assembled text.
    fn parse(&self, source: &str) -> Result<Self::Tree, SyntaxError>;

    /// Print a tree in canonical form.
    fn print(&self, tree: &Self::Tree) -> String;

    /// Parse then print.
    fn canonicalize(&self, source: &str) -> Result<String, SyntaxError> {
        let tree = self.parse(source)?;
        Ok(self.print(&tree))
    }
}

/// Rust canonicalizer: `syn` for parsing, `prettyplease` for printing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCanonicalizer;

impl Canonicalizer for RustCanonicalizer {
    type Tree = syn::File;

    fn parse(&self, source: &str) -> Result<syn::File, SyntaxError> {
        syn::parse_file(source).map_err(|err| {
            let start = err.span().start();
            SyntaxError {
                message: err.to_string(),
                offset: byte_offset(source, start.line, start.column),
            }
        })
    }

    fn print(&self, tree: &syn::File) -> String {
        prettyplease::unparse(tree)
    }
}

/// Byte offset of a 1-based line and 0-based character column.
fn byte_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut start = 0;
    for _ in 1..line {
        start += source[start..].find('\n')? + 1;
    }
    let line_text = source[start..].split('\n').next().unwrap_or_default();
    let within = line_text
        .char_indices()
        .nth(column)
        .map_or(line_text.len(), |(i, _)| i);
    Some(start + within)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_reformats() {
        let canonical = RustCanonicalizer
            .canonicalize("pub struct A{pub x:u32,pub y:Option<Box<A>>}")
            .unwrap();
        assert_eq!(
            canonical,
            "pub struct A {\n    pub x: u32,\n    pub y: Option<Box<A>>,\n}\n"
        );
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let source = "//! Header\nuse a::b as c;\n#[derive(Debug)] pub enum E { A = 0, B = 1 }\nfn f() -> c::T { todo!() }";
        let once = RustCanonicalizer.canonicalize(source).unwrap();
        let twice = RustCanonicalizer.canonicalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inner_docs_survive() {
        let canonical = RustCanonicalizer
            .canonicalize("//! Code generated by test.\n//! source: a.proto\npub struct A;")
            .unwrap();
        assert!(canonical.contains("//! Code generated by test."));
        assert!(canonical.contains("//! source: a.proto"));
    }

    #[test]
    fn test_parse_error_reports_offset() {
        let source = "pub struct A;\npub struct {}";
        let err = RustCanonicalizer.parse(source).unwrap_err();
        let offset = err.offset.expect("offset should be known");
        assert!(offset >= "pub struct A;\n".len());
        assert!(offset <= source.len());
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(byte_offset("ab\ncd", 2, 1), Some(4));
        assert_eq!(byte_offset("ab\ncd", 1, 9), Some(2));
        assert_eq!(byte_offset("ab", 3, 0), None);
        assert_eq!(byte_offset("ab", 0, 0), None);
    }
}

//! Deferred import registry.
//!
//! Strategies request imports freely while writing a file body; an import is
//! only emitted if the body actually referenced it. Aliases are allocated on
//! first reference and stay fixed for the rest of the batch.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::naming::{canonical_path, package_alias, rust_path};

/// Handle to a requested import. Cheap to copy and store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportHandle(usize);

#[derive(Debug, Clone, Default)]
struct ImportEntry {
    alias: Option<String>,
    used: bool,
    /// Module generated in this batch; rendered under the registry prefix.
    local: bool,
}

/// Batch-scoped table of import paths and their aliases.
///
/// Alias assignment is append-only: once a path has an alias, no other path
/// receives it. Usage flags are per file and cleared by [`begin_file`].
///
/// # Example
///
/// ```
/// use protogen_codegen::ImportRegistry;
///
/// let mut imports = ImportRegistry::new();
/// let bytes = imports.request("encoding/bytes");
/// let unused = imports.request("std/fmt");
///
/// assert_eq!(imports.reference(bytes), "encoding_bytes");
///
/// let used = imports.used_imports();
/// assert_eq!(used.len(), 1);
/// assert_eq!(used[0].to_string(), "use encoding::bytes as encoding_bytes;");
/// assert!(!imports.is_used(unused));
/// ```
///
/// [`begin_file`]: ImportRegistry::begin_file
#[derive(Debug, Clone, Default)]
pub struct ImportRegistry {
    prefix: Option<String>,
    entries: IndexMap<String, ImportEntry>,
    taken: HashSet<String>,
}

impl ImportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that renders generated modules under `prefix`
    /// (e.g., `crate::proto`). Aliases are not affected.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Register interest in `path` without allocating an alias.
    ///
    /// Requesting the same path twice, in any spelling that canonicalizes
    /// equally, yields the same handle.
    pub fn request(&mut self, path: &str) -> ImportHandle {
        self.insert(path, false)
    }

    /// Like [`request`](Self::request), for a module generated in this
    /// batch. Its rendered path starts with the registry prefix.
    pub fn request_local(&mut self, path: &str) -> ImportHandle {
        self.insert(path, true)
    }

    fn insert(&mut self, path: &str, local: bool) -> ImportHandle {
        let entry = self.entries.entry(canonical_path(path));
        let index = entry.index();
        entry.or_default().local |= local;
        ImportHandle(index)
    }

    /// Reference a requested import from generated code.
    ///
    /// Allocates the alias on first use in the batch and marks the import as
    /// used by the current file.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was issued by a different registry.
    pub fn reference(&mut self, handle: ImportHandle) -> &str {
        let Self { entries, taken, .. } = self;
        let Some((path, entry)) = entries.get_index_mut(handle.0) else {
            panic!("import handle {} was not issued by this registry", handle.0);
        };

        entry.used = true;
        entry
            .alias
            .get_or_insert_with(|| allocate_alias(taken, path))
            .as_str()
    }

    /// Whether the import was referenced while generating the current file.
    pub fn is_used(&self, handle: ImportHandle) -> bool {
        self.entries
            .get_index(handle.0)
            .is_some_and(|(_, entry)| entry.used)
    }

    /// Alias of the import, if one has been allocated.
    pub fn alias(&self, handle: ImportHandle) -> Option<&str> {
        self.entries
            .get_index(handle.0)
            .and_then(|(_, entry)| entry.alias.as_deref())
    }

    /// Mark `alias` as unavailable. Returns `false` if it was already taken.
    pub fn reserve(&mut self, alias: impl Into<String>) -> bool {
        self.taken.insert(alias.into())
    }

    /// Start a new file: usage flags are cleared, aliases are kept.
    pub fn begin_file(&mut self) {
        for entry in self.entries.values_mut() {
            entry.used = false;
        }
    }

    /// Imports referenced by the current file, in request order.
    pub fn used_imports(&self) -> Vec<ImportDecl> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.used)
            .filter_map(|(path, entry)| {
                let alias = entry.alias.clone()?;
                let prefix = if entry.local { self.prefix.as_deref() } else { None };
                Some(ImportDecl {
                    rust_path: rust_path(prefix, path),
                    path: path.clone(),
                    alias,
                })
            })
            .collect()
    }

    /// Number of distinct requested paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn allocate_alias(taken: &mut HashSet<String>, path: &str) -> String {
    let base = package_alias(path);
    let mut alias = base.clone();
    let mut suffix = 1;
    while taken.contains(&alias) {
        alias = format!("{base}{suffix}");
        suffix += 1;
    }

    tracing::trace!(path, alias = %alias, "allocated import alias");
    taken.insert(alias.clone());
    alias
}

/// One `use` item to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Canonical import path (`encoding/bytes`).
    pub path: String,
    /// Allocated alias.
    pub alias: String,
    /// Path as written in the `use` item, prefix included.
    pub rust_path: String,
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.rust_path.rsplit("::").next().unwrap_or_default();
        if last == self.alias {
            write!(f, "use {};", self.rust_path)
        } else {
            write!(f, "use {} as {};", self.rust_path, self.alias)
        }
    }
}

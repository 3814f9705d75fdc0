//! Pluggable generation strategy.

use super::{Batch, FileContext};
use crate::Result;
use crate::naming::{NamingConvention, RUST_IDENTIFIERS};

/// Writes the body of each generated file.
///
/// The pipeline calls [`generate`](Strategy::generate) once per loaded file,
/// then [`generate_imports`](Strategy::generate_imports) after the header
/// has been written. Imports referenced while writing the body are known by
/// then, so the default implementation only renders those.
///
/// # Example
///
/// ```
/// use protogen_codegen::{FileContext, Result, Strategy};
///
/// struct Names;
///
/// impl Strategy for Names {
///     fn name(&self) -> &'static str {
///         "names"
///     }
///
///     fn generate(&mut self, ctx: &mut FileContext<'_, '_>) -> Result<()> {
///         let file = ctx.file();
///         for message in file.messages() {
///             ctx.out().push_line(&format!("pub struct {};", message.name));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Strategy {
    /// The name of this strategy (used in errors and logs).
    fn name(&self) -> &'static str;

    /// Convention applied to type names written by [`FileContext`].
    ///
    /// The batch takes it before [`init`](Strategy::init) runs.
    fn naming(&self) -> NamingConvention {
        RUST_IDENTIFIERS
    }

    /// Called once before any file, with the whole batch.
    ///
    /// # Errors
    ///
    /// Any error aborts the batch.
    #[allow(unused_variables)]
    fn init(&mut self, batch: &mut Batch<'_>) -> Result<()> {
        Ok(())
    }

    /// Write the body of the current file.
    fn generate(&mut self, ctx: &mut FileContext<'_, '_>) -> Result<()>;

    /// Write the import block. Runs after the header, before the body is
    /// appended.
    fn generate_imports(&mut self, ctx: &mut FileContext<'_, '_>) -> Result<()> {
        ctx.write_used_imports();
        Ok(())
    }
}

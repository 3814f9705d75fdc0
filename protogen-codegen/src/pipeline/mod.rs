//! Two-phase generation pipeline.
//!
//! The body of a file is generated first; the header and the imports it
//! turned out to need are written afterwards, then the assembled text is
//! parsed and printed back in canonical form.
//!
//! - [`Pipeline`] - runs a [`Strategy`] over a request
//! - [`Batch`] - registry, type index and configuration shared by all files
//! - [`FileContext`] - what a strategy sees while generating one file
//! - [`Stage`] / [`StageHook`] - per-file progress and observers

mod batch;
mod context;
mod header;
mod report;
mod runner;
mod stage;
mod strategy;

pub use batch::Batch;
pub use context::FileContext;
pub use header::{ALLOWED_LINTS, write_header};
pub use report::{Artifact, FileFailure, GenerationReport};
pub use runner::Pipeline;
pub use stage::{Stage, StageHook};
pub use strategy::Strategy;

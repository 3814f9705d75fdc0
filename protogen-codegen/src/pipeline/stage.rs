//! Per-file stages and hooks observing them.

use crate::Result;

/// Where a file is in the generation pipeline.
///
/// Files move forward one stage at a time from [`Stage::Idle`] to
/// [`Stage::Done`]; [`Stage::Failed`] can be entered from any stage that is
/// not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    BodyGenerated,
    Assembled,
    Parsed,
    Canonicalized,
    Done,
    Failed,
}

impl Stage {
    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BodyGenerated => "body-generated",
            Self::Assembled => "assembled",
            Self::Parsed => "parsed",
            Self::Canonicalized => "canonicalized",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The stage that follows on success, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::BodyGenerated),
            Self::BodyGenerated => Some(Self::Assembled),
            Self::Assembled => Some(Self::Parsed),
            Self::Parsed => Some(Self::Canonicalized),
            Self::Canonicalized => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }
}

/// Observer notified on every stage transition.
///
/// # Example
///
/// ```ignore
/// struct Progress;
///
/// impl StageHook for Progress {
///     fn name(&self) -> &'static str { "progress" }
///
///     fn on_stage(&self, file: &str, stage: Stage) -> Result<()> {
///         if stage == Stage::Done {
///             eprintln!("generated {file}");
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait StageHook: Send + Sync {
    /// The name of this hook (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called after `file` entered `stage`.
    ///
    /// # Errors
    ///
    /// Return an error to abort the file. Errors returned while the file is
    /// already failing are logged and dropped.
    #[allow(unused_variables)]
    fn on_stage(&self, file: &str, stage: Stage) -> Result<()> {
        Ok(())
    }
}

//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur when finalizing recorded drawing.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// `save()` and `restore()` calls were not balanced.
    #[error("unbalanced save/restore: depth {0} at end of recording")]
    UnbalancedState(i32),

    /// `clip_rect()` and `restore_clip()` calls were not balanced.
    #[error("unbalanced clip stack: depth {0} at end of recording")]
    UnbalancedClip(i32),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

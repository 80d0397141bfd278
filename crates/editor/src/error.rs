use genscape_core::CoreError;

use crate::store::StoreError;

/// Errors surfaced by [`EditorSession`](crate::EditorSession).
///
/// Validation failures are not errors; they come back as
/// [`SaveOutcome::Blocked`](crate::SaveOutcome::Blocked).
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A domain-level error from `genscape_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The persistence service failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for session results.
pub type EditorResult<T> = Result<T, EditorError>;

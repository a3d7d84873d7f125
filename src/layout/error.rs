//! Error types for layout persistence and editing.

use crate::layout::editor::EditSession;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the layout store and editor.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The storage backend rejected a read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The configuration could not be serialized.
    #[error("Failed to serialize layout: {0}")]
    Serialize(String),

    /// An editor operation referenced a position outside the working copy.
    #[error("Widget index {index} out of range (layout has {len} widgets)")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of widgets in the working copy.
        len: usize,
    },
}

/// A failed commit. Owns the session so the caller can retry without
/// re-entering edits.
#[derive(Debug, Error)]
#[error("Failed to save layout: {source}")]
pub struct CommitError {
    session: EditSession,
    #[source]
    source: LayoutError,
}

impl CommitError {
    pub(crate) fn new(session: EditSession, source: LayoutError) -> Self {
        Self { session, source }
    }

    /// The underlying save failure.
    pub fn error(&self) -> &LayoutError {
        &self.source
    }

    /// Recovers the session with its working copy intact.
    pub fn into_session(self) -> EditSession {
        self.session
    }
}

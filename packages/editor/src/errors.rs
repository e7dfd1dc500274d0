//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Mutation(#[from] crate::mutations::MutationError),

    #[error(transparent)]
    Validation(#[from] crate::validator::ValidationFailed),

    #[error("Persistence error: {0}")]
    Persist(#[from] crate::persistence::PersistError),
}

impl EditorError {
    /// Recoverable errors leave the tree untouched and only need a message
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EditorError::Mutation(_))
    }
}

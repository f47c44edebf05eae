//! Repository error handling
//!
//! Every repository returns [`RepositoryError`]; at the crate boundary it
//! converts into `CmsError`, with driver failures surfacing as
//! `CmsError::QueryExecution`.

use cms_core::error::{CmsError, ValidationErrors};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Corrupt nested set: {0}")]
    CorruptTree(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for CmsError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => CmsError::not_found(entity, id),
            RepositoryError::Database(e) => CmsError::QueryExecution(e.to_string()),
            RepositoryError::Validation(errors) => CmsError::Validation(errors),
            RepositoryError::CorruptTree(message) => CmsError::Internal(message),
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriviaError {
    /// A required key was absent from the request payload.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("not found")]
    NotFound,
    /// The store refused a write that passed application-level validation.
    #[error("failed to persist: {0}")]
    PersistenceFailure(#[source] sqlx::Error),
    #[error("failed to delete: {0}")]
    DeletionFailure(#[source] sqlx::Error),
    #[error("store query failed: {0}")]
    Store(#[from] sqlx::Error),
}

pub type TriviaResult<T> = Result<T, TriviaError>;

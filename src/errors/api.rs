use super::{StationError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Station error: {0}")]
    StationError(#[from] StationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

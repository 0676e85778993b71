use crate::funding::FundingError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Funding rejections surface to callers as `Forbidden`, keeping the
/// distinct reason in the message so clients can tell them apart.
impl From<FundingError> for CoreError {
    fn from(err: FundingError) -> Self {
        CoreError::Forbidden(err.to_string())
    }
}

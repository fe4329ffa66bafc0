use thiserror::Error;
use validator::ValidationErrors;

use crate::rpc::RpcError;

/// Result alias for coordinator service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the coordinator services, classified the way callers
/// must react to them.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend could not be reached or answered unintelligibly. The same
    /// logical action may be retried.
    #[error("scoring backend unavailable")]
    Unavailable(#[source] RpcError),
    /// The backend answered and refused the operation. The message is the
    /// server's own and is shown to the user verbatim.
    #[error("{0}")]
    Rejected(String),
    /// The caller lacks the rights for an operator-only action. Fatal to the
    /// action; never retried.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Input rejected before any backend call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// True when the failure is transient and the same logical action (same
    /// idempotency token) may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_))
    }
}

impl From<RpcError> for ServiceError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Rejected { message } => ServiceError::Rejected(message),
            RpcError::Unauthorized { message } => ServiceError::Unauthorized(message),
            other => ServiceError::Unavailable(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {err}"))
    }
}

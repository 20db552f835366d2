//! Domain errors shared by the order lifecycle. The API layer maps each
//! variant onto an HTTP status and a stable error code.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness rule was hit, e.g. a second response to the same order.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The actor is authenticated but lacks the relationship the action needs.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The action is not legal in the order's current status.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

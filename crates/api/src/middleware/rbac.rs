//! Role gates as extractors.
//!
//! Handlers that only one side of the marketplace may call take
//! [`RequireCustomer`] or [`RequireSpecialist`] instead of [`AuthUser`], so
//! the role check happens before the handler body runs (403 otherwise).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use proboard_core::error::CoreError;
use proboard_core::roles::ViewerRole;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: ViewerRole,
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        tracing::debug!(
            user_id = user.user_id,
            actual = ?user.role,
            required = ?role,
            "Role gate rejected request"
        );
        return Err(AppError::Core(CoreError::Forbidden(message.to_string())));
    }
    Ok(user)
}

/// Order owners: create, list responses, cancel, complete.
pub struct RequireCustomer(pub AuthUser);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ViewerRole::Customer, "Customer role required")
            .await
            .map(RequireCustomer)
    }
}

/// Specialists: offer and decline.
pub struct RequireSpecialist(pub AuthUser);

impl FromRequestParts<AppState> for RequireSpecialist {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ViewerRole::Specialist, "Specialist role required")
            .await
            .map(RequireSpecialist)
    }
}

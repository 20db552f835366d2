//! Actor extraction from the `Authorization: Bearer <jwt>` header.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use proboard_core::error::CoreError;
use proboard_core::roles::ViewerRole;
use proboard_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller.
///
/// `role` is already mapped from the claim; a token with a role the
/// marketplace does not know authenticates but acts as
/// [`ViewerRole::Anonymous`], which no order operation accepts.
///
/// ```ignore
/// async fn handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = ?user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `users.id`, from the `sub` claim.
    pub user_id: DbId,
    pub role: ViewerRole,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

/// The bearer token, `None` when no `Authorization` header was sent.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid ASCII"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;
    Ok(Some(token))
}

fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = validate_token(token, &state.config.jwt).map_err(|err| {
        tracing::debug!(error = %err, "Rejected access token");
        unauthorized("Invalid or expired token")
    })?;
    Ok(AuthUser {
        user_id: claims.sub,
        role: claims.viewer_role(),
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(parts)?.ok_or_else(|| unauthorized("Missing Authorization header"))?;
        authenticate(token, state)
    }
}

/// Optional authentication for reads that anonymous visitors may attempt.
///
/// `None` when no header is sent. A header that is present but malformed
/// or expired is still 401, so a client with a stale token is not quietly
/// downgraded to anonymous.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(MaybeAuthUser(Some(authenticate(token, state)?))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}

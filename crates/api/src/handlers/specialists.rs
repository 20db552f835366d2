//! Handlers for specialist profiles and their reviews.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use proboard_core::error::CoreError;
use proboard_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use proboard_core::types::DbId;
use proboard_db::repositories::{ProRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /api/v1/specialists/{id}
///
/// Public profile with the cached average rating and review count.
pub async fn get_profile(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(specialist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ProRepo::find_profile(&state.pool, specialist_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Specialist",
            id: specialist_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/specialists/{id}/reviews?limit=&offset=
///
/// Reviews the specialist received, newest first.
pub async fn list_reviews(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(specialist_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let pro = ProRepo::find_by_id(&state.pool, specialist_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Specialist",
            id: specialist_id,
        }))?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let reviews = ReviewRepo::list_for_specialist(&state.pool, pro.user_id, limit, offset).await?;
    Ok(Json(PagedResponse {
        data: reviews,
        limit,
        offset,
    }))
}

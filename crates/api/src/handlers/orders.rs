//! Handlers for orders and their responses.
//!
//! Thin wrappers over [`OrderLifecycle`](crate::lifecycle::OrderLifecycle):
//! extract the actor, call the operation, wrap the result in the
//! `{ "data": ... }` envelope.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use proboard_core::listing::OrderListType;
use proboard_core::types::DbId;

use crate::error::AppResult;
use crate::lifecycle::completion::CompleteRequest;
use crate::lifecycle::orders::CreateOrderRequest;
use crate::lifecycle::responses::OfferRequest;
use crate::lifecycle::transitions::AcceptRequest;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::{RequireCustomer, RequireSpecialist};
use crate::query::ListOrdersParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/orders
///
/// Create an order. With `target_specialist_id` the specialist is invited
/// rather than assigned.
pub async fn create_order(
    RequireCustomer(user): RequireCustomer,
    State(state): State<AppState>,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<impl IntoResponse> {
    let order = state.lifecycle.create_order(&user, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /api/v1/orders?type=at-work|suggestions|all
pub async fn list_orders(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListOrdersParams>,
) -> AppResult<impl IntoResponse> {
    let list_type = match params.list_type.as_deref() {
        Some(raw) => raw.parse::<OrderListType>()?,
        None => OrderListType::default(),
    };
    let orders = state.lifecycle.list_orders(&user, list_type).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
///
/// Anonymous requests are accepted and resolved as an anonymous viewer.
pub async fn get_order(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = state.lifecycle.get_order(user.as_ref(), order_id).await?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /api/v1/orders/{id}/responses
pub async fn offer(
    RequireSpecialist(user): RequireSpecialist,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    body: Option<Json<OfferRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let response = state.lifecycle.offer(&user, order_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// DELETE /api/v1/orders/{id}/responses
pub async fn decline(
    RequireSpecialist(user): RequireSpecialist,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.lifecycle.decline(&user, order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/orders/{id}/responses
pub async fn list_responses(
    RequireCustomer(user): RequireCustomer,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let responses = state.lifecycle.list_responses(&user, order_id).await?;
    Ok(Json(DataResponse { data: responses }))
}

/// POST /api/v1/orders/{id}/accept
///
/// The body is optional; a specialist accepting for themselves sends none.
pub async fn accept(
    user: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    body: Option<Json<AcceptRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let order = state.lifecycle.accept(&user, order_id, input).await?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /api/v1/orders/{id}/cancel
pub async fn cancel(
    RequireCustomer(user): RequireCustomer,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = state.lifecycle.cancel(&user, order_id).await?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /api/v1/orders/{id}/complete
pub async fn complete(
    RequireCustomer(user): RequireCustomer,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<CompleteRequest>,
) -> AppResult<impl IntoResponse> {
    let completion = state.lifecycle.complete(&user, order_id, input).await?;
    Ok(Json(DataResponse { data: completion }))
}

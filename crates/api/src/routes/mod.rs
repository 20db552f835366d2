pub mod health;
pub mod orders;
pub mod specialists;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /orders                          create, list (?type=at-work|suggestions|all)
/// /orders/{id}                     get (anonymous allowed)
/// /orders/{id}/responses           offer, decline, list
/// /orders/{id}/accept              accept
/// /orders/{id}/cancel              cancel
/// /orders/{id}/complete            complete with review
///
/// /specialists/{id}                profile
/// /specialists/{id}/reviews        reviews
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/orders", orders::router())
        .nest("/specialists", specialists::router())
}

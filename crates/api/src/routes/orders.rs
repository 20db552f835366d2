//! Route definitions for orders, nested under `/orders`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// ```text
/// POST   /                       create_order
/// GET    /                       list_orders (?type=)
/// GET    /{id}                   get_order
/// POST   /{id}/responses         offer
/// DELETE /{id}/responses         decline
/// GET    /{id}/responses         list_responses
/// POST   /{id}/accept            accept
/// POST   /{id}/cancel            cancel
/// POST   /{id}/complete          complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create_order).get(orders::list_orders))
        .route("/{id}", get(orders::get_order))
        .route(
            "/{id}/responses",
            post(orders::offer)
                .delete(orders::decline)
                .get(orders::list_responses),
        )
        .route("/{id}/accept", post(orders::accept))
        .route("/{id}/cancel", post(orders::cancel))
        .route("/{id}/complete", post(orders::complete))
}

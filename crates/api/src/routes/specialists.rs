//! Route definitions for specialist profiles, nested under `/specialists`.

use axum::routing::get;
use axum::Router;

use crate::handlers::specialists;
use crate::state::AppState;

/// ```text
/// GET    /{id}                   get_profile
/// GET    /{id}/reviews           list_reviews
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(specialists::get_profile))
        .route("/{id}/reviews", get(specialists::list_reviews))
}

//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped with `proboard_core::pagination` before use.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /orders` (`?type=at-work|suggestions|all`).
#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    #[serde(rename = "type")]
    pub list_type: Option<String>,
}

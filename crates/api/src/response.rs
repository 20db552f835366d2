//! Response envelopes.
//!
//! Single resources and unpaged lists go out as `{ "data": ... }`; paged
//! lists add the effective `limit` and `offset` after clamping so clients
//! can request the next page without guessing the server's bounds.

use serde::Serialize;

/// `{ "data": T }`
///
/// ```ignore
/// Ok(Json(DataResponse { data: order }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [T], "limit": n, "offset": n }`
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub limit: i64,
    pub offset: i64,
}

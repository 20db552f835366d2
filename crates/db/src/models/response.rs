//! Order response (offer / invitation) models.

use proboard_core::response::ResponseKind;
use proboard_core::types::{DbId, StatusId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `order_responses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderResponse {
    pub id: DbId,
    pub order_id: DbId,
    pub specialist_id: DbId,
    pub kind_id: StatusId,
    pub message: Option<String>,
    pub created_at: Timestamp,
}

impl OrderResponse {
    pub fn kind(&self) -> Option<ResponseKind> {
        ResponseKind::from_id(self.kind_id)
    }
}

/// A response joined with the responding specialist's public profile data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResponseWithSpecialist {
    pub id: DbId,
    pub order_id: DbId,
    pub specialist_id: DbId,
    pub kind_id: StatusId,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub average_rating: f64,
    pub review_count: i32,
}

/// DTO for inserting a response.
#[derive(Debug, Clone)]
pub struct CreateResponse {
    pub order_id: DbId,
    pub specialist_id: DbId,
    pub kind: ResponseKind,
    pub message: Option<String>,
}

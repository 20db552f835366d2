//! Review model and the completion DTO.

use proboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::order::Order;
use crate::models::user::Pro;

/// A row from the `reviews` table.
///
/// `reviewer_id` and `specialist_id` are user ids, not customer/pro ids.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub order_id: DbId,
    pub reviewer_id: DbId,
    pub specialist_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
    pub is_positive: bool,
    pub created_at: Timestamp,
}

/// Input for completing an order with a review.
#[derive(Debug, Clone)]
pub struct CompleteOrder {
    pub order_id: DbId,
    pub customer_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
}

/// Everything the completion transaction wrote.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub order: Order,
    pub review: Review,
    pub profile: Pro,
}

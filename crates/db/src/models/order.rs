//! Order entity model and DTOs.

use proboard_core::error::CoreError;
use proboard_core::listing::ListCandidate;
use proboard_core::order::OrderStatus;
use proboard_core::response::ResponseKind;
use proboard_core::types::{DbId, StatusId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `orders` table.
///
/// `description` holds the composed text including any private sections;
/// never serialize it to viewers without going through redaction.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub customer_id: DbId,
    pub specialist_id: Option<DbId>,
    pub category_id: DbId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub preferred_time: Option<String>,
    pub photo_urls: Vec<String>,
    pub status_id: StatusId,
    pub view_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Typed status, failing on ids missing from the `order_statuses` seed.
    pub fn status(&self) -> Result<OrderStatus, CoreError> {
        OrderStatus::from_id(self.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "Order {} has unknown status id {}",
                self.id, self.status_id
            ))
        })
    }

    /// The assigned specialist, failing if the status demands one and the
    /// row has none.
    pub fn assigned_specialist(&self) -> Result<Option<DbId>, CoreError> {
        let status = self.status()?;
        if status.requires_specialist() && self.specialist_id.is_none() {
            return Err(CoreError::Internal(format!(
                "Order {} is {status} but has no assigned specialist",
                self.id
            )));
        }
        Ok(self.specialist_id)
    }
}

/// An order plus the per-viewer relationship columns used by list queries.
#[derive(Debug, Clone, FromRow)]
pub struct OrderListRow {
    #[sqlx(flatten)]
    pub order: Order,
    /// Total responses on the order.
    pub response_count: i64,
    /// The listing specialist's own response kind, when listed for a specialist.
    pub viewer_response_kind: Option<StatusId>,
}

impl OrderListRow {
    /// Candidate facts for a customer listing their own orders.
    pub fn customer_candidate(&self, customer_id: DbId) -> Result<ListCandidate, CoreError> {
        Ok(ListCandidate {
            status: self.order.status()?,
            is_assigned_to_someone: self.order.specialist_id.is_some(),
            is_owner: self.order.customer_id == customer_id,
            is_assigned: false,
            has_responded: false,
            response_count: self.response_count,
        })
    }

    /// Candidate facts for a specialist listing orders they are involved in.
    pub fn specialist_candidate(&self, specialist_id: DbId) -> Result<ListCandidate, CoreError> {
        Ok(ListCandidate {
            status: self.order.status()?,
            is_assigned_to_someone: self.order.specialist_id.is_some(),
            is_owner: false,
            is_assigned: self.order.specialist_id == Some(specialist_id),
            has_responded: self.viewer_response_kind.is_some(),
            response_count: self.response_count,
        })
    }

    pub fn viewer_response_kind(&self) -> Option<ResponseKind> {
        self.viewer_response_kind.and_then(ResponseKind::from_id)
    }
}

/// DTO for inserting a new order. `description` is already composed.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub preferred_time: Option<String>,
    pub photo_urls: Vec<String>,
}

/// The customer's invitation issued together with a new order.
#[derive(Debug, Clone)]
pub struct CreateInvitation {
    pub specialist_id: DbId,
    pub message: Option<String>,
}

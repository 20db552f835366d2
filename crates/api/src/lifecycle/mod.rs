//! Order lifecycle service.
//!
//! [`OrderLifecycle`] runs every order operation against the repositories:
//! it resolves the acting customer/specialist, checks the relationship and
//! status rules from `proboard_core`, performs the conditional write and
//! shapes the result for the viewer. Held in [`AppState`](crate::state::AppState)
//! as an `Arc<OrderLifecycle>`.
//!
//! Operations are split by concern:
//! - [`orders`] -- create, get (with access resolution and view counting), list.
//! - [`responses`] -- offer, decline, list responses.
//! - [`transitions`] -- accept and cancel.
//! - [`completion`] -- complete with review and reputation refresh.

pub mod actor;
pub mod completion;
pub mod orders;
pub mod responses;
pub mod transitions;
pub mod views;

use proboard_core::error::CoreError;
use proboard_core::reputation::ReputationStrategy;
use proboard_core::types::DbId;
use proboard_db::models::order::Order;
use proboard_db::repositories::OrderRepo;
use sqlx::PgPool;

use crate::error::AppResult;

pub struct OrderLifecycle {
    pool: PgPool,
    view_throttle_hours: i64,
    reputation_strategy: ReputationStrategy,
}

impl OrderLifecycle {
    pub fn new(
        pool: PgPool,
        view_throttle_hours: i64,
        reputation_strategy: ReputationStrategy,
    ) -> Self {
        Self {
            pool,
            view_throttle_hours,
            reputation_strategy,
        }
    }

    /// Load an order or fail with `NotFound`.
    async fn load_order(&self, order_id: DbId) -> AppResult<Order> {
        let order = OrderRepo::find_by_id(&self.pool, order_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Order",
                id: order_id,
            })?;
        Ok(order)
    }
}

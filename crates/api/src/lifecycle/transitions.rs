//! Accept and cancel transitions.

use proboard_core::access::Viewer;
use proboard_core::error::CoreError;
use proboard_core::order::{ensure_action_allowed, lost_race, OrderAction};
use proboard_core::response::no_response;
use proboard_core::roles::ViewerRole;
use proboard_core::types::DbId;
use proboard_db::repositories::{OrderRepo, ProRepo, ResponseRepo};
use serde::Deserialize;

use super::actor::{customer_for, specialist_for};
use super::views::OrderView;
use super::OrderLifecycle;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// Request body for `POST /orders/{id}/accept`.
///
/// Customers name the specialist they assign; specialists accept for
/// themselves and may omit it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AcceptRequest {
    pub specialist_id: Option<DbId>,
}

impl OrderLifecycle {
    /// Assign a specialist to an OPEN order and move it to IN_PROGRESS.
    ///
    /// A specialist may accept only with a response on the order (an offer
    /// or the customer's invitation). The owning customer may assign any
    /// existing specialist directly. Of concurrent accepts exactly one wins;
    /// the others fail with `InvalidState`.
    pub async fn accept(
        &self,
        user: &AuthUser,
        order_id: DbId,
        input: AcceptRequest,
    ) -> AppResult<OrderView> {
        let order = self.load_order(order_id).await?;
        ensure_action_allowed(OrderAction::Accept, order.status()?)?;

        let (viewer, specialist_id) = match user.role {
            ViewerRole::Specialist => {
                let pro = specialist_for(&self.pool, user).await?;
                if input.specialist_id.is_some_and(|id| id != pro.id) {
                    return Err(CoreError::Forbidden(
                        "Specialists can only accept orders for themselves".to_string(),
                    )
                    .into());
                }
                if ResponseRepo::find_for(&self.pool, order_id, pro.id)
                    .await?
                    .is_none()
                {
                    return Err(no_response(order_id, pro.id).into());
                }
                (Viewer::specialist(user.user_id, pro.id), pro.id)
            }
            ViewerRole::Customer => {
                let customer = customer_for(&self.pool, user).await?;
                if order.customer_id != customer.id {
                    return Err(CoreError::Forbidden(format!(
                        "Only the owner can assign a specialist to order {order_id}"
                    ))
                    .into());
                }
                let specialist_id = input.specialist_id.ok_or_else(|| {
                    CoreError::Validation("specialist_id is required".to_string())
                })?;
                ProRepo::find_by_id(&self.pool, specialist_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Specialist",
                        id: specialist_id,
                    })?;
                (Viewer::customer(user.user_id, customer.id), specialist_id)
            }
            ViewerRole::Anonymous => {
                return Err(CoreError::Forbidden(
                    "Only customers and specialists can accept orders".to_string(),
                )
                .into());
            }
        };

        let Some(accepted) = OrderRepo::accept(&self.pool, order_id, specialist_id).await? else {
            tracing::warn!(order_id, specialist_id, "Accept lost race");
            return Err(lost_race(OrderAction::Accept, order_id).into());
        };

        tracing::info!(
            order_id,
            specialist_id,
            accepted_by = user.user_id,
            "Order accepted"
        );

        self.present(accepted, &viewer).await
    }

    /// Cancel the acting customer's IN_PROGRESS order without a review.
    ///
    /// The assigned specialist stays on the order.
    pub async fn cancel(&self, user: &AuthUser, order_id: DbId) -> AppResult<OrderView> {
        let customer = customer_for(&self.pool, user).await?;
        let order = self.load_order(order_id).await?;
        if order.customer_id != customer.id {
            return Err(CoreError::Forbidden(format!(
                "Only the owner can cancel order {order_id}"
            ))
            .into());
        }
        ensure_action_allowed(OrderAction::Cancel, order.status()?)?;

        let Some(cancelled) = OrderRepo::cancel(&self.pool, order_id, customer.id).await? else {
            tracing::warn!(order_id, customer_id = customer.id, "Cancel lost race");
            return Err(lost_race(OrderAction::Cancel, order_id).into());
        };

        tracing::info!(
            order_id,
            customer_id = customer.id,
            specialist_id = ?cancelled.specialist_id,
            "Order cancelled"
        );

        let viewer = Viewer::customer(user.user_id, customer.id);
        self.present(cancelled, &viewer).await
    }
}

//! Response ledger operations: offer, decline, list.

use proboard_core::error::CoreError;
use proboard_core::order::{ensure_action_allowed, lost_race, OrderAction};
use proboard_core::response::{
    already_responded, ensure_can_withdraw, no_response, validate_message, ResponseKind,
    UNIQUE_RESPONSE_CONSTRAINT,
};
use proboard_core::types::DbId;
use proboard_db::models::response::{CreateResponse, OrderResponse};
use proboard_db::repositories::ResponseRepo;
use serde::Deserialize;

use super::actor::{customer_for, specialist_for};
use super::views::ResponseView;
use super::OrderLifecycle;
use crate::error::{is_unique_violation, AppResult};
use crate::middleware::auth::AuthUser;

/// Request body for `POST /orders/{id}/responses`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OfferRequest {
    pub message: Option<String>,
}

impl OrderLifecycle {
    /// Record the acting specialist's offer on an OPEN order.
    ///
    /// A second offer from the same specialist is a `Conflict`; the store's
    /// unique constraint decides, so concurrent duplicates cannot both land.
    /// An order accepted between the status check and the insert fails with
    /// `InvalidState`.
    pub async fn offer(
        &self,
        user: &AuthUser,
        order_id: DbId,
        input: OfferRequest,
    ) -> AppResult<OrderResponse> {
        validate_message(input.message.as_deref())?;
        let pro = specialist_for(&self.pool, user).await?;
        let order = self.load_order(order_id).await?;
        ensure_action_allowed(OrderAction::Offer, order.status()?)?;

        let create = CreateResponse {
            order_id,
            specialist_id: pro.id,
            kind: ResponseKind::SpecialistOffer,
            message: input.message,
        };
        let response = match ResponseRepo::create(&self.pool, &create).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                tracing::warn!(order_id, specialist_id = pro.id, "Offer lost race");
                return Err(lost_race(OrderAction::Offer, order_id).into());
            }
            Err(err) if is_unique_violation(&err, UNIQUE_RESPONSE_CONSTRAINT) => {
                return Err(already_responded(order_id, pro.id).into());
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            order_id,
            specialist_id = pro.id,
            response_id = response.id,
            "Specialist responded to order"
        );

        Ok(response)
    }

    /// Withdraw the acting specialist's response. The order's status does
    /// not change.
    pub async fn decline(&self, user: &AuthUser, order_id: DbId) -> AppResult<()> {
        let pro = specialist_for(&self.pool, user).await?;
        let order = self.load_order(order_id).await?;
        ensure_can_withdraw(order_id, order.status()?, order.specialist_id, pro.id)?;

        let removed = ResponseRepo::delete(&self.pool, order_id, pro.id).await?;
        if !removed {
            return Err(no_response(order_id, pro.id).into());
        }

        tracing::info!(order_id, specialist_id = pro.id, "Specialist declined order");
        Ok(())
    }

    /// Every response on the acting customer's order.
    pub async fn list_responses(
        &self,
        user: &AuthUser,
        order_id: DbId,
    ) -> AppResult<Vec<ResponseView>> {
        let customer = customer_for(&self.pool, user).await?;
        let order = self.load_order(order_id).await?;
        if order.customer_id != customer.id {
            return Err(CoreError::Forbidden(format!(
                "Only the owner can list responses on order {order_id}"
            ))
            .into());
        }

        let responses = ResponseRepo::list_for_order(&self.pool, order_id).await?;
        Ok(responses.into_iter().map(ResponseView::from).collect())
    }
}

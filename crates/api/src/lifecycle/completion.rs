//! Completion with review and reputation refresh.

use proboard_core::access::Viewer;
use proboard_core::error::CoreError;
use proboard_core::order::{ensure_action_allowed, lost_race, OrderAction};
use proboard_core::reputation::{validate_comment, validate_rating};
use proboard_core::types::DbId;
use proboard_db::models::review::CompleteOrder;
use proboard_db::repositories::OrderRepo;
use serde::Deserialize;

use super::actor::customer_for;
use super::views::CompletionView;
use super::OrderLifecycle;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// Request body for `POST /orders/{id}/complete`.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

impl OrderLifecycle {
    /// Complete the acting customer's IN_PROGRESS order.
    ///
    /// The status change, the review and the specialist's reputation update
    /// commit together or not at all.
    pub async fn complete(
        &self,
        user: &AuthUser,
        order_id: DbId,
        input: CompleteRequest,
    ) -> AppResult<CompletionView> {
        validate_rating(input.rating)?;
        validate_comment(input.comment.as_deref())?;

        let customer = customer_for(&self.pool, user).await?;
        let order = self.load_order(order_id).await?;
        if order.customer_id != customer.id {
            return Err(CoreError::Forbidden(format!(
                "Only the owner can complete order {order_id}"
            ))
            .into());
        }
        ensure_action_allowed(OrderAction::Complete, order.status()?)?;

        let complete = CompleteOrder {
            order_id,
            customer_id: customer.id,
            rating: input.rating,
            comment: input.comment,
        };
        let Some(outcome) =
            OrderRepo::complete_with_review(&self.pool, &complete, self.reputation_strategy)
                .await?
        else {
            tracing::warn!(order_id, customer_id = customer.id, "Complete lost race");
            return Err(lost_race(OrderAction::Complete, order_id).into());
        };

        tracing::info!(
            order_id,
            customer_id = customer.id,
            specialist_id = outcome.profile.id,
            rating = outcome.review.rating,
            average_rating = outcome.profile.average_rating,
            review_count = outcome.profile.review_count,
            "Order completed with review"
        );

        let reputation = outcome.profile.reputation();
        let viewer = Viewer::customer(user.user_id, customer.id);
        let order = self.present(outcome.order, &viewer).await?;
        Ok(CompletionView {
            order,
            review: outcome.review,
            reputation,
        })
    }
}

//! Order creation, detail reads and lists.

use proboard_core::access::{AccessLevel, OrderFacts, Viewer};
use proboard_core::description::DescriptionSections;
use proboard_core::error::CoreError;
use proboard_core::listing::OrderListType;
use proboard_core::order::{
    validate_description, validate_photo_urls, validate_preferred_time, validate_title,
};
use proboard_core::response::validate_message;
use proboard_core::roles::ViewerRole;
use proboard_core::types::DbId;
use proboard_db::models::order::{CreateInvitation, CreateOrder, Order};
use proboard_db::models::user::User;
use proboard_db::repositories::{
    CategoryRepo, CustomerRepo, OrderRepo, ProRepo, ResponseRepo, UserRepo,
};
use serde::Deserialize;

use super::actor::{customer_for, specialist_for, viewer_for};
use super::views::{OrderSummary, OrderView};
use super::OrderLifecycle;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub category_id: DbId,
    pub title: String,
    pub description: String,
    pub confidential_info: Option<String>,
    pub contact_info: Option<String>,
    pub location: Option<String>,
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// Invite this specialist directly instead of waiting for offers.
    pub target_specialist_id: Option<DbId>,
    /// Optional note attached to the invitation.
    pub invitation_message: Option<String>,
}

impl OrderLifecycle {
    /// Create an OPEN order for the acting customer, inviting the target
    /// specialist when one is given.
    pub async fn create_order(
        &self,
        user: &AuthUser,
        input: CreateOrderRequest,
    ) -> AppResult<OrderView> {
        validate_title(&input.title)?;
        validate_description(&input.description)?;
        validate_preferred_time(input.preferred_time.as_deref())?;
        validate_photo_urls(&input.photo_urls)?;
        validate_message(input.invitation_message.as_deref())?;

        let sections = DescriptionSections::new(
            &input.description,
            input.confidential_info.as_deref(),
            input.contact_info.as_deref(),
        );
        sections.validate()?;

        let customer = customer_for(&self.pool, user).await?;

        CategoryRepo::find_by_id(&self.pool, input.category_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Category",
                id: input.category_id,
            })?;

        let invitation = match input.target_specialist_id {
            Some(specialist_id) => {
                ProRepo::find_by_id(&self.pool, specialist_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Specialist",
                        id: specialist_id,
                    })?;
                Some(CreateInvitation {
                    specialist_id,
                    message: input.invitation_message,
                })
            }
            None => None,
        };

        let create = CreateOrder {
            customer_id: customer.id,
            category_id: input.category_id,
            title: input.title.trim().to_string(),
            description: sections.compose(),
            location: input.location,
            preferred_time: input.preferred_time,
            photo_urls: input.photo_urls,
        };

        let order = OrderRepo::create(&self.pool, &create, invitation.as_ref()).await?;

        tracing::info!(
            order_id = order.id,
            customer_id = customer.id,
            category_id = order.category_id,
            invited_specialist_id = ?invitation.as_ref().map(|i| i.specialist_id),
            "Order created"
        );

        let viewer = Viewer::customer(user.user_id, customer.id);
        self.present(order, &viewer).await
    }

    /// Read one order as `user` (anonymous when `None`).
    ///
    /// Resolves the viewer's access level, refuses viewers without read
    /// access, counts the view when appropriate and redacts the payload.
    pub async fn get_order(&self, user: Option<&AuthUser>, order_id: DbId) -> AppResult<OrderView> {
        let mut order = self.load_order(order_id).await?;
        let viewer = viewer_for(&self.pool, user).await?;
        let access = self.access_for(&order, &viewer).await?;
        access.ensure_readable(order.id)?;

        if access.counts_view() {
            if let Some(viewer_id) = viewer.user_id {
                let counted = OrderRepo::record_view(
                    &self.pool,
                    order.id,
                    viewer_id,
                    self.view_throttle_hours,
                )
                .await?;
                if counted {
                    order.view_count += 1;
                    tracing::debug!(order_id = order.id, viewer_id, "Order view counted");
                }
            }
        }

        self.shape(order, access).await
    }

    /// Orders related to `user`, filtered by `list_type`.
    pub async fn list_orders(
        &self,
        user: &AuthUser,
        list_type: OrderListType,
    ) -> AppResult<Vec<OrderSummary>> {
        let role = user.role;
        let rows = match role {
            ViewerRole::Customer => {
                let customer = customer_for(&self.pool, user).await?;
                let rows = OrderRepo::list_for_customer(&self.pool, customer.id).await?;
                let mut kept = Vec::with_capacity(rows.len());
                for row in rows {
                    if list_type.includes(role, &row.customer_candidate(customer.id)?) {
                        kept.push(row);
                    }
                }
                kept
            }
            ViewerRole::Specialist => {
                let pro = specialist_for(&self.pool, user).await?;
                let rows = OrderRepo::list_for_specialist(&self.pool, pro.id).await?;
                let mut kept = Vec::with_capacity(rows.len());
                for row in rows {
                    if list_type.includes(role, &row.specialist_candidate(pro.id)?) {
                        kept.push(row);
                    }
                }
                kept
            }
            ViewerRole::Anonymous => {
                return Err(CoreError::Forbidden(
                    "Only customers and specialists can list orders".to_string(),
                )
                .into());
            }
        };

        rows.into_iter().map(OrderSummary::build).collect()
    }

    /// Resolve `viewer`'s access level on `order`.
    pub(super) async fn access_for(&self, order: &Order, viewer: &Viewer) -> AppResult<AccessLevel> {
        let viewer_response = match viewer.specialist_id {
            Some(specialist_id) => ResponseRepo::find_for(&self.pool, order.id, specialist_id)
                .await?
                .and_then(|r| r.kind()),
            None => None,
        };
        let facts = OrderFacts {
            order_id: order.id,
            customer_id: order.customer_id,
            specialist_id: order.assigned_specialist()?,
            status: order.status()?,
        };
        Ok(AccessLevel::resolve(&facts, viewer, viewer_response))
    }

    /// Resolve access for `viewer` and shape the order for them.
    pub(super) async fn present(&self, order: Order, viewer: &Viewer) -> AppResult<OrderView> {
        let access = self.access_for(&order, viewer).await?;
        self.shape(order, access).await
    }

    async fn shape(&self, order: Order, access: AccessLevel) -> AppResult<OrderView> {
        let customer = self.customer_user(order.customer_id).await?;
        OrderView::build(order, &customer, access)
    }

    async fn customer_user(&self, customer_id: DbId) -> AppResult<User> {
        let customer = CustomerRepo::find_by_id(&self.pool, customer_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Order references missing customer {customer_id}"))
            })?;
        let user = UserRepo::find_by_id(&self.pool, customer.user_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Customer {customer_id} references missing user {}",
                    customer.user_id
                ))
            })?;
        Ok(user)
    }
}

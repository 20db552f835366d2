//! Viewer-shaped payloads returned by the lifecycle operations.
//!
//! Stored orders carry their private description sections inline; these
//! types are the only way an order leaves the service, so redaction happens
//! in one place.

use proboard_core::access::{AccessLevel, REDACTED_CUSTOMER_NAME};
use proboard_core::description::DescriptionSections;
use proboard_core::order::{order_number, OrderStatus};
use proboard_core::reputation::ReputationAggregate;
use proboard_core::response::ResponseKind;
use proboard_core::types::{DbId, Timestamp};
use proboard_db::models::order::{Order, OrderListRow};
use proboard_db::models::response::ResponseWithSpecialist;
use proboard_db::models::review::Review;
use proboard_db::models::user::User;
use serde::Serialize;

use crate::error::AppResult;

/// Customer display data, or the generic placeholder when redacted.
#[derive(Debug, Serialize)]
pub struct CustomerCard {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl CustomerCard {
    fn redacted() -> Self {
        Self {
            display_name: REDACTED_CUSTOMER_NAME.to_string(),
            avatar_url: None,
        }
    }
}

/// Order detail as seen by one viewer.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: DbId,
    pub order_number: String,
    pub status: OrderStatus,
    pub title: String,
    pub description: String,
    pub confidential_info: Option<String>,
    pub contact_info: Option<String>,
    pub location: Option<String>,
    pub preferred_time: Option<String>,
    pub photo_urls: Vec<String>,
    pub category_id: DbId,
    pub specialist_id: Option<DbId>,
    pub view_count: i32,
    pub customer: CustomerCard,
    pub access: AccessLevel,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderView {
    /// Shape `order` for a viewer with `access`, redacting the private
    /// sections and customer identity unless full details are allowed.
    pub fn build(order: Order, customer: &User, access: AccessLevel) -> AppResult<Self> {
        let status = order.status()?;
        let sections = DescriptionSections::parse(&order.description);
        let (sections, customer) = if access.show_full_details {
            (
                sections,
                CustomerCard {
                    display_name: customer.display_name.clone(),
                    avatar_url: customer.avatar_url.clone(),
                },
            )
        } else {
            (sections.redacted(), CustomerCard::redacted())
        };

        Ok(Self {
            id: order.id,
            order_number: order_number(order.id),
            status,
            title: order.title,
            description: sections.body,
            confidential_info: sections.confidential,
            contact_info: sections.contact,
            location: order.location,
            preferred_time: order.preferred_time,
            photo_urls: order.photo_urls,
            category_id: order.category_id,
            specialist_id: order.specialist_id,
            view_count: order.view_count,
            customer,
            access,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

/// One row of an order list. Never carries the private sections.
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub id: DbId,
    pub order_number: String,
    pub status: OrderStatus,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub preferred_time: Option<String>,
    pub category_id: DbId,
    pub specialist_id: Option<DbId>,
    pub view_count: i32,
    pub response_count: i64,
    pub is_direct_offer: bool,
    pub created_at: Timestamp,
}

impl OrderSummary {
    pub fn build(row: OrderListRow) -> AppResult<Self> {
        let status = row.order.status()?;
        let is_direct_offer = row.viewer_response_kind() == Some(ResponseKind::CustomerInvitation);
        let order = row.order;
        Ok(Self {
            id: order.id,
            order_number: order_number(order.id),
            status,
            title: order.title,
            description: DescriptionSections::parse(&order.description).body,
            location: order.location,
            preferred_time: order.preferred_time,
            category_id: order.category_id,
            specialist_id: order.specialist_id,
            view_count: order.view_count,
            response_count: row.response_count,
            is_direct_offer,
            created_at: order.created_at,
        })
    }
}

/// A response on an order with its kind spelled out.
#[derive(Debug, Serialize)]
pub struct ResponseView {
    #[serde(flatten)]
    pub response: ResponseWithSpecialist,
    pub kind: Option<ResponseKind>,
}

impl From<ResponseWithSpecialist> for ResponseView {
    fn from(response: ResponseWithSpecialist) -> Self {
        let kind = ResponseKind::from_id(response.kind_id);
        Self { response, kind }
    }
}

/// Result of completing an order.
#[derive(Debug, Serialize)]
pub struct CompletionView {
    pub order: OrderView,
    pub review: Review,
    pub reputation: ReputationAggregate,
}

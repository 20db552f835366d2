//! Per-viewer access level resolution for orders.
//!
//! Every read path (order detail, lists, the action buttons a client shows)
//! derives its visibility and permitted actions from one [`AccessLevel`]
//! computed here, instead of branching on role flags at each call site.

use serde::Serialize;

use crate::error::CoreError;
use crate::order::OrderStatus;
use crate::response::ResponseKind;
use crate::roles::ViewerRole;
use crate::types::DbId;

/// Default lifetime of a view marker; repeat views inside it are not counted.
pub const DEFAULT_VIEW_THROTTLE_HOURS: i64 = 24;

/// Placeholder name shown instead of the customer's name when redacted.
pub const REDACTED_CUSTOMER_NAME: &str = "Customer";

/// The identity an order is being looked at by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub role: ViewerRole,
    pub user_id: Option<DbId>,
    /// The viewer's `customers.id`, when acting as a customer.
    pub customer_id: Option<DbId>,
    /// The viewer's `pros.id`, when acting as a specialist.
    pub specialist_id: Option<DbId>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self {
            role: ViewerRole::Anonymous,
            user_id: None,
            customer_id: None,
            specialist_id: None,
        }
    }

    pub fn customer(user_id: DbId, customer_id: DbId) -> Self {
        Self {
            role: ViewerRole::Customer,
            user_id: Some(user_id),
            customer_id: Some(customer_id),
            specialist_id: None,
        }
    }

    pub fn specialist(user_id: DbId, specialist_id: DbId) -> Self {
        Self {
            role: ViewerRole::Specialist,
            user_id: Some(user_id),
            customer_id: None,
            specialist_id: Some(specialist_id),
        }
    }
}

/// The parts of an order the resolver needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFacts {
    pub order_id: DbId,
    pub customer_id: DbId,
    pub specialist_id: Option<DbId>,
    pub status: OrderStatus,
}

/// Visibility and action descriptor for one viewer on one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessLevel {
    pub is_owner: bool,
    pub is_assigned: bool,
    pub has_responded: bool,
    pub can_respond: bool,
    pub show_full_details: bool,
    pub is_direct_offer: bool,
    #[serde(skip)]
    can_read: bool,
    #[serde(skip)]
    counts_view: bool,
}

impl AccessLevel {
    /// Compute the descriptor.
    ///
    /// `viewer_response` is the kind of the viewer's own response on this
    /// order, if any; it is ignored unless the viewer is a specialist.
    pub fn resolve(
        order: &OrderFacts,
        viewer: &Viewer,
        viewer_response: Option<ResponseKind>,
    ) -> Self {
        let is_customer = viewer.role == ViewerRole::Customer;
        let is_specialist = viewer.role == ViewerRole::Specialist;

        let is_owner = is_customer && viewer.customer_id == Some(order.customer_id);
        let is_assigned = is_specialist
            && order.specialist_id.is_some()
            && viewer.specialist_id == order.specialist_id;
        let response = if is_specialist { viewer_response } else { None };
        let has_responded = response.is_some();
        let can_respond =
            is_specialist && order.status == OrderStatus::Open && !is_assigned && !has_responded;
        let show_full_details = is_owner || is_assigned || has_responded;
        let is_direct_offer = response == Some(ResponseKind::CustomerInvitation);

        let browsing_open = is_specialist && order.status == OrderStatus::Open;
        let can_read = show_full_details || browsing_open;
        let counts_view = is_specialist && !is_owner && !is_assigned && !has_responded;

        Self {
            is_owner,
            is_assigned,
            has_responded,
            can_respond,
            show_full_details,
            is_direct_offer,
            can_read,
            counts_view,
        }
    }

    /// Whether the viewer may read the order at all.
    ///
    /// Participants always can; other specialists only while it is open.
    pub fn can_read(&self) -> bool {
        self.can_read
    }

    pub fn ensure_readable(&self, order_id: DbId) -> Result<(), CoreError> {
        if self.can_read {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Order {order_id} is only visible to its participants"
            )))
        }
    }

    /// Whether a read by this viewer should bump the view counter.
    ///
    /// Only specialists browsing someone else's order count. Callers still
    /// apply the per-viewer time-boxed throttle; the counter is an
    /// approximation, not a unique-visitor count.
    pub fn counts_view(&self) -> bool {
        self.counts_view
    }
}

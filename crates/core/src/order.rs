//! Order status state machine, action guards and field validation.
//!
//! An order moves `Open -> InProgress -> {Completed, Cancelled}` and never
//! leaves a terminal state. The repository layer turns each guard into a
//! conditional `UPDATE ... WHERE status_id = <required>` so that the rule is
//! re-checked atomically by the store; the functions here decide which
//! status is required and produce the error callers surface.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, StatusId};

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length of an order title (characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of the public description body (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Maximum length of the free-form preferred time window.
pub const MAX_PREFERRED_TIME_LENGTH: usize = 100;

/// Maximum number of photo URLs attached to one order.
pub const MAX_PHOTO_URLS: usize = 10;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Order lifecycle status. Discriminants match the `order_statuses` seed data.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open = 1,
    InProgress = 2,
    Completed = 3,
    Cancelled = 4,
}

impl OrderStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a database status ID, `None` for unknown ids.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(OrderStatus::Open),
            2 => Some(OrderStatus::InProgress),
            3 => Some(OrderStatus::Completed),
            4 => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether an order in this status must carry an assigned specialist.
    pub fn requires_specialist(self) -> bool {
        matches!(self, OrderStatus::InProgress | OrderStatus::Completed)
    }
}

impl From<OrderStatus> for StatusId {
    fn from(value: OrderStatus) -> Self {
        value as StatusId
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the statuses reachable from `from`. Terminal states return an
/// empty slice.
pub fn valid_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Open => &[OrderStatus::InProgress],
        OrderStatus::InProgress => &[OrderStatus::Completed, OrderStatus::Cancelled],
        OrderStatus::Completed | OrderStatus::Cancelled => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a status transition, returning `InvalidState` for illegal ones.
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Cannot move order from {from} to {to}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Action guards
// ---------------------------------------------------------------------------

/// Every operation that is gated on the order's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Offer,
    Accept,
    Cancel,
    Complete,
}

impl OrderAction {
    pub fn name(self) -> &'static str {
        match self {
            OrderAction::Offer => "offer",
            OrderAction::Accept => "accept",
            OrderAction::Cancel => "cancel",
            OrderAction::Complete => "complete",
        }
    }

    /// The status the order must be in for this action to be legal.
    pub fn required_status(self) -> OrderStatus {
        match self {
            OrderAction::Offer | OrderAction::Accept => OrderStatus::Open,
            OrderAction::Cancel | OrderAction::Complete => OrderStatus::InProgress,
        }
    }

    /// The status the order moves to, `None` when the action leaves it as is.
    pub fn target_status(self) -> Option<OrderStatus> {
        match self {
            OrderAction::Offer => None,
            OrderAction::Accept => Some(OrderStatus::InProgress),
            OrderAction::Cancel => Some(OrderStatus::Cancelled),
            OrderAction::Complete => Some(OrderStatus::Completed),
        }
    }
}

/// Check that `action` is legal for an order currently in `current`.
pub fn ensure_action_allowed(action: OrderAction, current: OrderStatus) -> Result<(), CoreError> {
    let required = action.required_status();
    if current != required {
        return Err(CoreError::InvalidState(format!(
            "Cannot {} an order that is {current}; it must be {required}",
            action.name()
        )));
    }
    if let Some(target) = action.target_status() {
        validate_transition(current, target)?;
    }
    Ok(())
}

/// Error returned when a conditional update matched no row because another
/// request changed the order first.
pub fn lost_race(action: OrderAction, order_id: DbId) -> CoreError {
    CoreError::InvalidState(format!(
        "Order {order_id} changed before it could be {}; re-fetch it before retrying",
        past_tense(action)
    ))
}

fn past_tense(action: OrderAction) -> &'static str {
    match action {
        OrderAction::Offer => "offered on",
        OrderAction::Accept => "accepted",
        OrderAction::Cancel => "cancelled",
        OrderAction::Complete => "completed",
    }
}

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Human-readable order number derived from the id, e.g. `ORD-000042`.
pub fn order_number(id: DbId) -> String {
    format!("ORD-{id:06}")
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Description must not be empty".to_string(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_preferred_time(window: Option<&str>) -> Result<(), CoreError> {
    match window {
        Some(w) if w.chars().count() > MAX_PREFERRED_TIME_LENGTH => {
            Err(CoreError::Validation(format!(
                "Preferred time window exceeds maximum length of {MAX_PREFERRED_TIME_LENGTH} characters"
            )))
        }
        _ => Ok(()),
    }
}

/// Photo URLs come from the storage service and must be absolute http(s) URLs.
pub fn validate_photo_urls(urls: &[String]) -> Result<(), CoreError> {
    if urls.len() > MAX_PHOTO_URLS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_PHOTO_URLS} photos may be attached to an order"
        )));
    }
    for url in urls {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            Some(host_and_path) if !host_and_path.is_empty() => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Invalid photo URL '{url}'. Must be an absolute http(s) URL"
                )))
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

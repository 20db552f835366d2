//! Response kinds and response validation.
//!
//! A response links one specialist to one order. It is either an offer the
//! specialist made while browsing, or an invitation the customer issued when
//! creating the order for a specific specialist. The kind is stored as its
//! own column; the message is optional free text in both cases.

use serde::Serialize;

use crate::error::CoreError;
use crate::order::OrderStatus;
use crate::types::{DbId, StatusId};

/// Maximum length of a response message (characters).
pub const MAX_MESSAGE_LENGTH: usize = 2_000;

/// Name of the store constraint enforcing one response per (order, specialist).
pub const UNIQUE_RESPONSE_CONSTRAINT: &str = "uq_order_responses_order_specialist";

/// Who initiated a response. Discriminants match the `response_kinds` seed data.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    SpecialistOffer = 1,
    CustomerInvitation = 2,
}

impl ResponseKind {
    /// Return the database kind ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(ResponseKind::SpecialistOffer),
            2 => Some(ResponseKind::CustomerInvitation),
            _ => None,
        }
    }
}

pub fn validate_message(message: Option<&str>) -> Result<(), CoreError> {
    match message {
        Some(m) if m.chars().count() > MAX_MESSAGE_LENGTH => Err(CoreError::Validation(format!(
            "Message exceeds maximum length of {MAX_MESSAGE_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

/// The conflict a second response for the same pair produces.
pub fn already_responded(order_id: DbId, specialist_id: DbId) -> CoreError {
    CoreError::Conflict(format!(
        "Specialist {specialist_id} has already responded to order {order_id}"
    ))
}

/// The refusal for removing or relying on a response that does not exist.
pub fn no_response(order_id: DbId, specialist_id: DbId) -> CoreError {
    CoreError::Forbidden(format!(
        "Specialist {specialist_id} has no response on order {order_id}"
    ))
}

/// Check that `specialist_id` may withdraw its response.
///
/// Responders who were not chosen can withdraw at any time. The specialist
/// working an IN_PROGRESS order cannot; the customer cancels instead.
pub fn ensure_can_withdraw(
    order_id: DbId,
    status: OrderStatus,
    assigned: Option<DbId>,
    specialist_id: DbId,
) -> Result<(), CoreError> {
    if status == OrderStatus::InProgress && assigned == Some(specialist_id) {
        return Err(CoreError::InvalidState(format!(
            "Specialist {specialist_id} is working order {order_id} and cannot withdraw"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn kind_ids_match_seed_data() {
        assert_eq!(ResponseKind::SpecialistOffer.id(), 1);
        assert_eq!(ResponseKind::CustomerInvitation.id(), 2);
        assert_eq!(ResponseKind::from_id(2), Some(ResponseKind::CustomerInvitation));
        assert_eq!(ResponseKind::from_id(3), None);
    }

    #[test]
    fn message_is_optional() {
        assert!(validate_message(None).is_ok());
        assert!(validate_message(Some("I can come tomorrow")).is_ok());
    }

    #[test]
    fn overlong_message_rejected() {
        let long = "m".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_matches!(validate_message(Some(&long)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn already_responded_is_conflict_not_forbidden() {
        assert_matches!(already_responded(1, 2), CoreError::Conflict(msg) if msg.contains("already responded"));
        assert_matches!(no_response(1, 2), CoreError::Forbidden(_));
    }

    #[test]
    fn unchosen_responder_can_withdraw_after_assignment() {
        assert!(ensure_can_withdraw(1, OrderStatus::Open, None, 5).is_ok());
        assert!(ensure_can_withdraw(1, OrderStatus::InProgress, Some(9), 5).is_ok());
        assert!(ensure_can_withdraw(1, OrderStatus::Completed, Some(9), 5).is_ok());
    }

    #[test]
    fn working_specialist_cannot_withdraw() {
        assert_matches!(
            ensure_can_withdraw(1, OrderStatus::InProgress, Some(5), 5),
            Err(CoreError::InvalidState(_))
        );
        assert!(ensure_can_withdraw(1, OrderStatus::Cancelled, Some(5), 5).is_ok());
    }
}

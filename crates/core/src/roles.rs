//! Well-known role name constants.
//!
//! These are the values the identity provider places in the `role` claim.

use serde::Serialize;

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_SPECIALIST: &str = "specialist";

/// The role a viewer acts under when reading or mutating an order.
///
/// `Anonymous` covers requests without a token as well as tokens whose role
/// is not one the marketplace knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Customer,
    Specialist,
    Anonymous,
}

impl ViewerRole {
    /// Map a role claim to a viewer role.
    pub fn from_claim(role: &str) -> Self {
        match role {
            ROLE_CUSTOMER => ViewerRole::Customer,
            ROLE_SPECIALIST => ViewerRole::Specialist,
            _ => ViewerRole::Anonymous,
        }
    }
}

//! Order list types and the predicate each one applies.
//!
//! The repository loads every order the viewer has a relationship with
//! (owned, assigned, or responded to); [`OrderListType::includes`] then
//! decides which of those belong in the requested list.

use std::str::FromStr;

use crate::error::CoreError;
use crate::order::OrderStatus;
use crate::roles::ViewerRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderListType {
    /// In-progress orders the viewer owns or is assigned to.
    AtWork,
    /// Open, unassigned orders with responses relevant to the viewer.
    Suggestions,
    /// Every order the viewer has any relationship to.
    #[default]
    All,
}

/// What the list predicate needs to know about one candidate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCandidate {
    pub status: OrderStatus,
    pub is_assigned_to_someone: bool,
    /// The viewer owns the order (customer view).
    pub is_owner: bool,
    /// The viewer is the assigned specialist (specialist view).
    pub is_assigned: bool,
    /// The viewer has a response on the order (specialist view).
    pub has_responded: bool,
    /// Total responses on the order (customer view).
    pub response_count: i64,
}

impl OrderListType {
    pub fn includes(self, role: ViewerRole, row: &ListCandidate) -> bool {
        let related = match role {
            ViewerRole::Customer => row.is_owner,
            ViewerRole::Specialist => row.is_assigned || row.has_responded,
            ViewerRole::Anonymous => false,
        };
        if !related {
            return false;
        }

        match self {
            OrderListType::AtWork => {
                row.status == OrderStatus::InProgress
                    && match role {
                        ViewerRole::Customer => row.is_owner,
                        _ => row.is_assigned,
                    }
            }
            OrderListType::Suggestions => {
                row.status == OrderStatus::Open
                    && match role {
                        ViewerRole::Customer => row.response_count > 0,
                        _ => !row.is_assigned_to_someone && row.has_responded,
                    }
            }
            OrderListType::All => true,
        }
    }
}

impl FromStr for OrderListType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "at-work" => Ok(OrderListType::AtWork),
            "suggestions" => Ok(OrderListType::Suggestions),
            "all" => Ok(OrderListType::All),
            other => Err(CoreError::Validation(format!(
                "Unknown list type '{other}'. Must be one of: at-work, suggestions, all"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: OrderStatus) -> ListCandidate {
        ListCandidate {
            status,
            is_assigned_to_someone: false,
            is_owner: false,
            is_assigned: false,
            has_responded: false,
            response_count: 0,
        }
    }

    #[test]
    fn at_work_for_assigned_specialist() {
        let candidate = ListCandidate {
            is_assigned: true,
            is_assigned_to_someone: true,
            has_responded: true,
            ..row(OrderStatus::InProgress)
        };
        assert!(OrderListType::AtWork.includes(ViewerRole::Specialist, &candidate));
    }

    #[test]
    fn at_work_excludes_responders_not_chosen() {
        let candidate = ListCandidate {
            is_assigned_to_someone: true,
            has_responded: true,
            ..row(OrderStatus::InProgress)
        };
        assert!(!OrderListType::AtWork.includes(ViewerRole::Specialist, &candidate));
        assert!(OrderListType::All.includes(ViewerRole::Specialist, &candidate));
    }

    #[test]
    fn at_work_for_owner() {
        let candidate = ListCandidate {
            is_owner: true,
            is_assigned_to_someone: true,
            ..row(OrderStatus::InProgress)
        };
        assert!(OrderListType::AtWork.includes(ViewerRole::Customer, &candidate));
        let done = ListCandidate {
            status: OrderStatus::Completed,
            ..candidate
        };
        assert!(!OrderListType::AtWork.includes(ViewerRole::Customer, &done));
    }

    #[test]
    fn suggestions_for_specialist_need_response_on_open_unassigned() {
        let candidate = ListCandidate {
            has_responded: true,
            ..row(OrderStatus::Open)
        };
        assert!(OrderListType::Suggestions.includes(ViewerRole::Specialist, &candidate));

        let not_open = ListCandidate {
            status: OrderStatus::InProgress,
            is_assigned_to_someone: true,
            ..candidate
        };
        assert!(!OrderListType::Suggestions.includes(ViewerRole::Specialist, &not_open));
    }

    #[test]
    fn suggestions_for_customer_need_any_response() {
        let owned = ListCandidate {
            is_owner: true,
            ..row(OrderStatus::Open)
        };
        assert!(!OrderListType::Suggestions.includes(ViewerRole::Customer, &owned));
        let answered = ListCandidate {
            response_count: 2,
            ..owned
        };
        assert!(OrderListType::Suggestions.includes(ViewerRole::Customer, &answered));
    }

    #[test]
    fn unrelated_rows_never_listed() {
        for list in [OrderListType::AtWork, OrderListType::Suggestions, OrderListType::All] {
            assert!(!list.includes(ViewerRole::Customer, &row(OrderStatus::Open)));
            assert!(!list.includes(ViewerRole::Specialist, &row(OrderStatus::Open)));
            assert!(!list.includes(ViewerRole::Anonymous, &row(OrderStatus::Open)));
        }
    }

    #[test]
    fn list_type_parses() {
        assert_eq!("at-work".parse::<OrderListType>().unwrap(), OrderListType::AtWork);
        assert_eq!(
            "suggestions".parse::<OrderListType>().unwrap(),
            OrderListType::Suggestions
        );
        assert_eq!("all".parse::<OrderListType>().unwrap(), OrderListType::All);
        assert!("mine".parse::<OrderListType>().is_err());
    }
}

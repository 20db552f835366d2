//! User, customer and specialist identity models.
//!
//! Identity itself is issued by an external provider; `users` caches display
//! data while `customers` and `pros` hold the role-specific records orders
//! reference.

use proboard_core::reputation::ReputationAggregate;
use proboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// A row from the `pros` table: the specialist record and its cached
/// reputation aggregate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pro {
    pub id: DbId,
    pub user_id: DbId,
    pub bio: Option<String>,
    pub average_rating: f64,
    pub review_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Pro {
    pub fn reputation(&self) -> ReputationAggregate {
        ReputationAggregate {
            average_rating: self.average_rating,
            review_count: self.review_count,
        }
    }
}

/// Public specialist profile joined with the user's display data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub average_rating: f64,
    pub review_count: i32,
}

/// DTO for caching a user's display data.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

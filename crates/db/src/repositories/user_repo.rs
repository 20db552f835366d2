//! Repositories for the `users`, `customers` and `pros` tables.

use proboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, Customer, Pro, ProProfile, User};

/// Column list for users queries.
const USER_COLUMNS: &str = "id, display_name, avatar_url, created_at, updated_at";

/// Column list for customers queries.
const CUSTOMER_COLUMNS: &str = "id, user_id, created_at";

/// Column list for pros queries.
pub(crate) const PRO_COLUMNS: &str =
    "id, user_id, bio, average_rating, review_count, created_at, updated_at";

/// Provides access to cached user display data.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (display_name, avatar_url) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.display_name)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a user by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Provides access to customer records.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Register a user as a customer.
    pub async fn create(pool: &PgPool, user_id: DbId) -> Result<Customer, sqlx::Error> {
        let query =
            format!("INSERT INTO customers (user_id) VALUES ($1) RETURNING {CUSTOMER_COLUMNS}");
        sqlx::query_as::<_, Customer>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a customer record by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the customer record belonging to a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE user_id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}

/// Provides access to specialist records and their cached reputation.
pub struct ProRepo;

impl ProRepo {
    /// Register a user as a specialist with an empty reputation.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        bio: Option<&str>,
    ) -> Result<Pro, sqlx::Error> {
        let query =
            format!("INSERT INTO pros (user_id, bio) VALUES ($1, $2) RETURNING {PRO_COLUMNS}");
        sqlx::query_as::<_, Pro>(&query)
            .bind(user_id)
            .bind(bio)
            .fetch_one(pool)
            .await
    }

    /// Find a specialist record by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pro>, sqlx::Error> {
        let query = format!("SELECT {PRO_COLUMNS} FROM pros WHERE id = $1");
        sqlx::query_as::<_, Pro>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the specialist record belonging to a user.
    pub async fn find_by_user_id(pool: &PgPool, user_id: DbId) -> Result<Option<Pro>, sqlx::Error> {
        let query = format!("SELECT {PRO_COLUMNS} FROM pros WHERE user_id = $1");
        sqlx::query_as::<_, Pro>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Public profile of a specialist, joined with the user's display data.
    pub async fn find_profile(pool: &PgPool, id: DbId) -> Result<Option<ProProfile>, sqlx::Error> {
        sqlx::query_as::<_, ProProfile>(
            "SELECT p.id, p.user_id, u.display_name, u.avatar_url, p.bio, \
                    p.average_rating, p.review_count \
             FROM pros p \
             JOIN users u ON u.id = p.user_id \
             WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

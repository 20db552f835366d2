//! Repository for the `categories` table.

use proboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::Category;

/// Column list for categories queries.
const COLUMNS: &str = "id, name, created_at";

/// Read access to the category references orders point at.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}

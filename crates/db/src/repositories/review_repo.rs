//! Repository for the `reviews` table.

use proboard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::review::Review;

/// Column list for reviews queries.
pub(crate) const COLUMNS: &str =
    "id, order_id, reviewer_id, specialist_id, rating, comment, is_positive, created_at";

/// Provides read access to reviews. Reviews are written only by the
/// completion transaction in [`crate::repositories::OrderRepo`].
pub struct ReviewRepo;

impl ReviewRepo {
    /// Every rating a specialist (by user id) has received.
    pub async fn ratings_for_specialist(
        conn: &mut PgConnection,
        specialist_user_id: DbId,
    ) -> Result<Vec<i16>, sqlx::Error> {
        sqlx::query_scalar("SELECT rating FROM reviews WHERE specialist_id = $1 ORDER BY id")
            .bind(specialist_user_id)
            .fetch_all(conn)
            .await
    }

    /// Reviews for a specialist (by user id), newest first.
    pub async fn list_for_specialist(
        pool: &PgPool,
        specialist_user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE specialist_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(specialist_user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The review left on an order, if it has been completed.
    pub async fn find_by_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE order_id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(order_id)
            .fetch_optional(pool)
            .await
    }
}

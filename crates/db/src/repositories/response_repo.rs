//! Repository for the `order_responses` table.

use proboard_core::order::OrderStatus;
use proboard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::response::{CreateResponse, OrderResponse, ResponseWithSpecialist};

/// Column list for order_responses queries.
const COLUMNS: &str = "id, order_id, specialist_id, kind_id, message, created_at";

/// Provides CRUD operations for order responses.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Insert a specialist's response on an OPEN order.
    ///
    /// Returns `None` when the order is no longer OPEN. The status check
    /// share-locks the order row, so an accept running at the same time
    /// either lands first (and this returns `None`) or waits for the insert.
    /// A second response from the same specialist on the same order fails
    /// with a unique violation on `uq_order_responses_order_specialist`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateResponse,
    ) -> Result<Option<OrderResponse>, sqlx::Error> {
        let query = format!(
            "INSERT INTO order_responses (order_id, specialist_id, kind_id, message) \
             SELECT $1, $2, $3, $4 \
             WHERE EXISTS ( \
                 SELECT 1 FROM orders WHERE id = $1 AND status_id = $5 FOR SHARE \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderResponse>(&query)
            .bind(input.order_id)
            .bind(input.specialist_id)
            .bind(input.kind.id())
            .bind(&input.message)
            .bind(OrderStatus::Open.id())
            .fetch_optional(pool)
            .await
    }

    /// Insert a response on an existing connection or transaction, with no
    /// status check. Used for the invitation written alongside a new order.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateResponse,
    ) -> Result<OrderResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO order_responses (order_id, specialist_id, kind_id, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderResponse>(&query)
            .bind(input.order_id)
            .bind(input.specialist_id)
            .bind(input.kind.id())
            .bind(&input.message)
            .fetch_one(conn)
            .await
    }

    /// The response a specialist holds on an order, if any.
    pub async fn find_for(
        pool: &PgPool,
        order_id: DbId,
        specialist_id: DbId,
    ) -> Result<Option<OrderResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM order_responses WHERE order_id = $1 AND specialist_id = $2"
        );
        sqlx::query_as::<_, OrderResponse>(&query)
            .bind(order_id)
            .bind(specialist_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a specialist's response. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        order_id: DbId,
        specialist_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM order_responses WHERE order_id = $1 AND specialist_id = $2")
                .bind(order_id)
                .bind(specialist_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All responses on an order, oldest first, with the responders' profile data.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<ResponseWithSpecialist>, sqlx::Error> {
        sqlx::query_as::<_, ResponseWithSpecialist>(
            "SELECT r.id, r.order_id, r.specialist_id, r.kind_id, r.message, r.created_at, \
                    u.display_name, u.avatar_url, p.average_rating, p.review_count \
             FROM order_responses r \
             JOIN pros p ON p.id = r.specialist_id \
             JOIN users u ON u.id = p.user_id \
             WHERE r.order_id = $1 \
             ORDER BY r.created_at ASC, r.id ASC",
        )
        .bind(order_id)
        .fetch_all(pool)
        .await
    }

    /// Number of responses on an order.
    pub async fn count_for_order(pool: &PgPool, order_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM order_responses WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(pool)
            .await
    }
}

//! Repository for the `orders` table and the lifecycle transitions on it.
//!
//! Every status change is a conditional `UPDATE ... WHERE status_id = $n`.
//! A `None` result means the row was not in the expected state when the
//! statement ran; callers turn that into an invalid-state error.

use proboard_core::order::OrderStatus;
use proboard_core::reputation::{is_positive, ReputationAggregate, ReputationStrategy};
use proboard_core::response::ResponseKind;
use proboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::{CreateInvitation, CreateOrder, Order, OrderListRow};
use crate::models::response::CreateResponse;
use crate::models::review::{CompleteOrder, CompletionOutcome, Review};
use crate::models::user::Pro;
use crate::repositories::response_repo::ResponseRepo;
use crate::repositories::review_repo::{self, ReviewRepo};
use crate::repositories::user_repo::PRO_COLUMNS;

/// Column list for orders queries.
const COLUMNS: &str = "id, customer_id, specialist_id, category_id, title, description, \
     location, preferred_time, photo_urls, status_id, view_count, created_at, updated_at";

/// Same columns qualified with the `o` alias, for joined list queries.
const O_COLUMNS: &str = "o.id, o.customer_id, o.specialist_id, o.category_id, o.title, \
     o.description, o.location, o.preferred_time, o.photo_urls, o.status_id, o.view_count, \
     o.created_at, o.updated_at";

/// Provides CRUD and lifecycle operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new OPEN order. When `invitation` is given, the customer's
    /// invitation response is written in the same transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrder,
        invitation: Option<&CreateInvitation>,
    ) -> Result<Order, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO orders \
                (customer_id, category_id, title, description, location, preferred_time, \
                 photo_urls, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(input.customer_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.preferred_time)
            .bind(&input.photo_urls)
            .bind(OrderStatus::Open.id())
            .fetch_one(&mut *tx)
            .await?;

        if let Some(invitation) = invitation {
            let response = CreateResponse {
                order_id: order.id,
                specialist_id: invitation.specialist_id,
                kind: ResponseKind::CustomerInvitation,
                message: invitation.message.clone(),
            };
            ResponseRepo::insert(&mut *tx, &response).await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    /// Find an order by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Assign a specialist and move OPEN -> IN_PROGRESS.
    ///
    /// Of several concurrent accepts exactly one returns `Some`.
    pub async fn accept(
        pool: &PgPool,
        order_id: DbId,
        specialist_id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET specialist_id = $2, status_id = $3 \
             WHERE id = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(specialist_id)
            .bind(OrderStatus::InProgress.id())
            .bind(OrderStatus::Open.id())
            .fetch_optional(pool)
            .await
    }

    /// Move the customer's IN_PROGRESS order to CANCELLED.
    pub async fn cancel(
        pool: &PgPool,
        order_id: DbId,
        customer_id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status_id = $3 \
             WHERE id = $1 AND customer_id = $2 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(customer_id)
            .bind(OrderStatus::Cancelled.id())
            .bind(OrderStatus::InProgress.id())
            .fetch_optional(pool)
            .await
    }

    /// Complete an order, record the review and refresh the assigned
    /// specialist's reputation in one transaction.
    ///
    /// Steps:
    /// 1. Conditionally move IN_PROGRESS -> COMPLETED (returns `None` if lost).
    /// 2. Lock the specialist's `pros` row.
    /// 3. Insert the review.
    /// 4. Recompute the aggregate per `strategy` and write it back.
    ///
    /// Any failure rolls back all four steps.
    pub async fn complete_with_review(
        pool: &PgPool,
        input: &CompleteOrder,
        strategy: ReputationStrategy,
    ) -> Result<Option<CompletionOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE orders SET status_id = $3 \
             WHERE id = $1 AND customer_id = $2 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        let Some(order) = sqlx::query_as::<_, Order>(&query)
            .bind(input.order_id)
            .bind(input.customer_id)
            .bind(OrderStatus::Completed.id())
            .bind(OrderStatus::InProgress.id())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        // ck_orders_assignment guarantees a specialist on completed rows.
        let pro_id = match order.assigned_specialist() {
            Ok(Some(pro_id)) => pro_id,
            Ok(None) => {
                return Err(sqlx::Error::Protocol(format!(
                    "Completed order {} has no assigned specialist",
                    order.id
                )))
            }
            Err(err) => return Err(sqlx::Error::Protocol(err.to_string())),
        };

        // Serializes concurrent reputation updates for the same specialist.
        let lock_query = format!("SELECT {PRO_COLUMNS} FROM pros WHERE id = $1 FOR UPDATE");
        let pro = sqlx::query_as::<_, Pro>(&lock_query)
            .bind(pro_id)
            .fetch_one(&mut *tx)
            .await?;

        let reviewer_id: DbId = sqlx::query_scalar("SELECT user_id FROM customers WHERE id = $1")
            .bind(order.customer_id)
            .fetch_one(&mut *tx)
            .await?;

        let review_query = format!(
            "INSERT INTO reviews \
                (order_id, reviewer_id, specialist_id, rating, comment, is_positive) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            review_repo::COLUMNS
        );
        let review = sqlx::query_as::<_, Review>(&review_query)
            .bind(order.id)
            .bind(reviewer_id)
            .bind(pro.user_id)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(is_positive(input.rating))
            .fetch_one(&mut *tx)
            .await?;

        let aggregate = match strategy {
            ReputationStrategy::FullRecompute => {
                let ratings = ReviewRepo::ratings_for_specialist(&mut *tx, pro.user_id).await?;
                ReputationAggregate::recompute(&ratings)
            }
            ReputationStrategy::Incremental => pro.reputation().with_rating(input.rating),
        };

        let update_query = format!(
            "UPDATE pros SET average_rating = $2, review_count = $3 \
             WHERE id = $1 \
             RETURNING {PRO_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Pro>(&update_query)
            .bind(pro.id)
            .bind(aggregate.average_rating)
            .bind(aggregate.review_count)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(CompletionOutcome {
            order,
            review,
            profile,
        }))
    }

    /// Every order a customer owns, newest first, with response counts.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<OrderListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {O_COLUMNS}, \
                (SELECT COUNT(*) FROM order_responses r WHERE r.order_id = o.id) \
                    AS response_count, \
                NULL::SMALLINT AS viewer_response_kind \
             FROM orders o \
             WHERE o.customer_id = $1 \
             ORDER BY o.created_at DESC, o.id DESC"
        );
        sqlx::query_as::<_, OrderListRow>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Every order a specialist is assigned to or holds a response on,
    /// newest first.
    pub async fn list_for_specialist(
        pool: &PgPool,
        specialist_id: DbId,
    ) -> Result<Vec<OrderListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {O_COLUMNS}, \
                (SELECT COUNT(*) FROM order_responses r WHERE r.order_id = o.id) \
                    AS response_count, \
                mine.kind_id AS viewer_response_kind \
             FROM orders o \
             LEFT JOIN order_responses mine \
                ON mine.order_id = o.id AND mine.specialist_id = $1 \
             WHERE o.specialist_id = $1 OR mine.id IS NOT NULL \
             ORDER BY o.created_at DESC, o.id DESC"
        );
        sqlx::query_as::<_, OrderListRow>(&query)
            .bind(specialist_id)
            .fetch_all(pool)
            .await
    }

    /// Record that `viewer_id` (a user id) viewed the order and bump
    /// `view_count` unless the same viewer already counted within the last
    /// `throttle_hours`. Returns `true` if the count was incremented.
    pub async fn record_view(
        pool: &PgPool,
        order_id: DbId,
        viewer_id: DbId,
        throttle_hours: i64,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let counted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO order_views (order_id, viewer_id) VALUES ($1, $2) \
             ON CONFLICT (order_id, viewer_id) DO UPDATE SET viewed_at = NOW() \
             WHERE order_views.viewed_at < NOW() - make_interval(hours => $3::INT) \
             RETURNING order_id",
        )
        .bind(order_id)
        .bind(viewer_id)
        .bind(throttle_hours)
        .fetch_optional(&mut *tx)
        .await?;

        if counted.is_none() {
            tx.commit().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE orders SET view_count = view_count + 1 WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

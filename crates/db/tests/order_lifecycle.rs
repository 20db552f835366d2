mod common;

use proboard_core::order::OrderStatus;
use proboard_core::response::{ResponseKind, UNIQUE_RESPONSE_CONSTRAINT};
use proboard_db::models::order::CreateInvitation;
use proboard_db::models::response::CreateResponse;
use proboard_db::repositories::{OrderRepo, ResponseRepo};
use sqlx::PgPool;

use common::{new_order, open_order, plumbing, seed_customer, seed_pro};

fn offer(order_id: i64, specialist_id: i64) -> CreateResponse {
    CreateResponse {
        order_id,
        specialist_id,
        kind: ResponseKind::SpecialistOffer,
        message: Some("Can come tomorrow".to_string()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_order_starts_open(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    assert_eq!(order.status().unwrap(), OrderStatus::Open);
    assert_eq!(order.specialist_id, None);
    assert_eq!(order.view_count, 0);
    assert_eq!(order.photo_urls.len(), 1);

    let found = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Fix sink");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_invitation_writes_response(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let pro = seed_pro(&pool, "Sam").await;
    let category_id = plumbing(&pool).await;

    let invitation = CreateInvitation {
        specialist_id: pro.id,
        message: None,
    };
    let order = OrderRepo::create(
        &pool,
        &new_order(customer.id, category_id, "Fix sink"),
        Some(&invitation),
    )
    .await
    .unwrap();

    assert_eq!(order.status().unwrap(), OrderStatus::Open);
    let response = ResponseRepo::find_for(&pool, order.id, pro.id)
        .await
        .unwrap()
        .expect("invitation response");
    assert_eq!(response.kind(), Some(ResponseKind::CustomerInvitation));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invitation_to_unknown_specialist_rolls_back(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let category_id = plumbing(&pool).await;

    let invitation = CreateInvitation {
        specialist_id: 999_999,
        message: None,
    };
    let result = OrderRepo::create(
        &pool,
        &new_order(customer.id, category_id, "Fix sink"),
        Some(&invitation),
    )
    .await;
    assert!(result.is_err());

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "order insert must roll back with the invitation");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_offer_hits_unique_constraint(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let pro = seed_pro(&pool, "Sam").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    ResponseRepo::create(&pool, &offer(order.id, pro.id))
        .await
        .unwrap()
        .expect("order is open");
    let err = ResponseRepo::create(&pool, &offer(order.id, pro.id))
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some(UNIQUE_RESPONSE_CONSTRAINT));

    let count = ResponseRepo::count_for_order(&pool, order.id).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_duplicate_offers_keep_one(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let pro = seed_pro(&pool, "Sam").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    let input = offer(order.id, pro.id);
    let (a, b) = tokio::join!(
        ResponseRepo::create(&pool, &input),
        ResponseRepo::create(&pool, &input),
    );

    let results = [a, b];
    let created = results
        .iter()
        .filter(|r| matches!(r, Ok(Some(_))))
        .count();
    let duplicates = results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .filter(|err| {
            err.as_database_error()
                .and_then(|db_err| db_err.constraint())
                == Some(UNIQUE_RESPONSE_CONSTRAINT)
        })
        .count();
    assert_eq!(created, 1);
    assert_eq!(duplicates, 1);

    let count = ResponseRepo::count_for_order(&pool, order.id).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_offer_on_accepted_order_is_not_written(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let sam = seed_pro(&pool, "Sam").await;
    let pat = seed_pro(&pool, "Pat").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    OrderRepo::accept(&pool, order.id, sam.id)
        .await
        .unwrap()
        .unwrap();

    let late = ResponseRepo::create(&pool, &offer(order.id, pat.id))
        .await
        .unwrap();
    assert!(late.is_none());
    assert!(ResponseRepo::find_for(&pool, order.id, pat.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_response(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let pro = seed_pro(&pool, "Sam").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    ResponseRepo::create(&pool, &offer(order.id, pro.id))
        .await
        .unwrap();
    assert!(ResponseRepo::delete(&pool, order.id, pro.id).await.unwrap());
    assert!(!ResponseRepo::delete(&pool, order.id, pro.id).await.unwrap());
    assert!(ResponseRepo::find_for(&pool, order.id, pro.id)
        .await
        .unwrap()
        .is_none());

    // A specialist may respond again after withdrawing.
    ResponseRepo::create(&pool, &offer(order.id, pro.id))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_responses_joins_profile(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let sam = seed_pro(&pool, "Sam").await;
    let pat = seed_pro(&pool, "Pat").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    ResponseRepo::create(&pool, &offer(order.id, sam.id))
        .await
        .unwrap();
    ResponseRepo::create(&pool, &offer(order.id, pat.id))
        .await
        .unwrap();

    let responses = ResponseRepo::list_for_order(&pool, order.id).await.unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].display_name, "Sam");
    assert_eq!(responses[1].display_name, "Pat");
    assert_eq!(responses[0].review_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_assigns_once(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let sam = seed_pro(&pool, "Sam").await;
    let pat = seed_pro(&pool, "Pat").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    let accepted = OrderRepo::accept(&pool, order.id, sam.id)
        .await
        .unwrap()
        .expect("first accept wins");
    assert_eq!(accepted.status().unwrap(), OrderStatus::InProgress);
    assert_eq!(accepted.specialist_id, Some(sam.id));

    let second = OrderRepo::accept(&pool, order.id, pat.id).await.unwrap();
    assert!(second.is_none());

    let found = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(found.specialist_id, Some(sam.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_accepts_have_one_winner(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let sam = seed_pro(&pool, "Sam").await;
    let pat = seed_pro(&pool, "Pat").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    let (a, b) = tokio::join!(
        OrderRepo::accept(&pool, order.id, sam.id),
        OrderRepo::accept(&pool, order.id, pat.id),
    );
    let winners = [a.unwrap(), b.unwrap()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    assert_eq!(winners.len(), 1);

    let found = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(found.specialist_id, winners[0].specialist_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancel_requires_owner_and_in_progress(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let other = seed_customer(&pool, "Oscar").await;
    let sam = seed_pro(&pool, "Sam").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    // OPEN orders cannot be cancelled.
    assert!(OrderRepo::cancel(&pool, order.id, customer.id)
        .await
        .unwrap()
        .is_none());

    OrderRepo::accept(&pool, order.id, sam.id)
        .await
        .unwrap()
        .unwrap();

    assert!(OrderRepo::cancel(&pool, order.id, other.id)
        .await
        .unwrap()
        .is_none());

    let cancelled = OrderRepo::cancel(&pool, order.id, customer.id)
        .await
        .unwrap()
        .expect("owner cancels in-progress order");
    assert_eq!(cancelled.status().unwrap(), OrderStatus::Cancelled);
    assert_eq!(cancelled.specialist_id, Some(sam.id));

    // Terminal: neither accept nor cancel can move it again.
    assert!(OrderRepo::accept(&pool, order.id, sam.id)
        .await
        .unwrap()
        .is_none());
    assert!(OrderRepo::cancel(&pool, order.id, customer.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignment_check_constraint(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    let err = sqlx::query("UPDATE orders SET status_id = $2 WHERE id = $1")
        .bind(order.id)
        .bind(OrderStatus::InProgress.id())
        .execute(&pool)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("ck_orders_assignment"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_customer_and_specialist(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let sam = seed_pro(&pool, "Sam").await;
    let pat = seed_pro(&pool, "Pat").await;

    let first = open_order(&pool, &customer, "Fix sink").await;
    let second = open_order(&pool, &customer, "Paint fence").await;
    ResponseRepo::create(&pool, &offer(first.id, sam.id))
        .await
        .unwrap();
    ResponseRepo::create(&pool, &offer(first.id, pat.id))
        .await
        .unwrap();

    let rows = OrderRepo::list_for_customer(&pool, customer.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].order.id, second.id, "newest first");
    assert_eq!(rows[0].response_count, 0);
    assert_eq!(rows[1].response_count, 2);
    assert!(rows[1].viewer_response_kind().is_none());

    let sam_rows = OrderRepo::list_for_specialist(&pool, sam.id).await.unwrap();
    assert_eq!(sam_rows.len(), 1);
    assert_eq!(sam_rows[0].order.id, first.id);
    assert_eq!(
        sam_rows[0].viewer_response_kind(),
        Some(ResponseKind::SpecialistOffer)
    );

    // Assignment without a response still lists the order.
    OrderRepo::accept(&pool, second.id, pat.id)
        .await
        .unwrap()
        .unwrap();
    let pat_rows = OrderRepo::list_for_specialist(&pool, pat.id).await.unwrap();
    assert_eq!(pat_rows.len(), 2);
    let candidate = pat_rows[0].specialist_candidate(pat.id).unwrap();
    assert!(candidate.is_assigned);
    assert!(!candidate.has_responded);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_view_throttles_per_viewer(pool: PgPool) {
    let customer = seed_customer(&pool, "Carol").await;
    let sam = seed_pro(&pool, "Sam").await;
    let pat = seed_pro(&pool, "Pat").await;
    let order = open_order(&pool, &customer, "Fix sink").await;

    assert!(OrderRepo::record_view(&pool, order.id, sam.user_id, 24)
        .await
        .unwrap());
    assert!(!OrderRepo::record_view(&pool, order.id, sam.user_id, 24)
        .await
        .unwrap());
    assert!(OrderRepo::record_view(&pool, order.id, pat.user_id, 24)
        .await
        .unwrap());

    let found = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(found.view_count, 2);

    // Once the marker is older than the window the viewer counts again.
    sqlx::query("UPDATE order_views SET viewed_at = NOW() - INTERVAL '25 hours' WHERE viewer_id = $1")
        .bind(sam.user_id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(OrderRepo::record_view(&pool, order.id, sam.user_id, 24)
        .await
        .unwrap());
    let found = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(found.view_count, 3);
}

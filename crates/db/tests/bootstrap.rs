use proboard_core::order::OrderStatus;
use proboard_core::response::ResponseKind;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    proboard_db::health_check(&pool).await.unwrap();

    for table in ["order_statuses", "response_kinds", "categories"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

/// Lookup ids in the database must line up with the enum discriminants.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_ids_match_enums(pool: PgPool) {
    let statuses: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM order_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(statuses.len(), 4);
    for (id, name) in statuses {
        let status = OrderStatus::from_id(id).expect("known status id");
        assert_eq!(status.name(), name.to_uppercase());
    }

    let kinds: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM response_kinds ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        kinds,
        vec![
            (ResponseKind::SpecialistOffer.id(), "specialist_offer".to_string()),
            (
                ResponseKind::CustomerInvitation.id(),
                "customer_invitation".to_string()
            ),
        ]
    );
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use proboard_api::auth::jwt::{generate_access_token, JwtConfig};
use proboard_api::config::ServerConfig;
use proboard_api::router::build_app_router;
use proboard_api::state::AppState;
use proboard_core::reputation::ReputationStrategy;
use proboard_core::roles::{ROLE_CUSTOMER, ROLE_SPECIALIST};
use proboard_core::types::DbId;
use proboard_db::models::user::CreateUser;
use proboard_db::repositories::{CategoryRepo, CustomerRepo, ProRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        view_throttle_hours: 24,
        reputation_strategy: ReputationStrategy::FullRecompute,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            issuer: None,
        },
    }
}

/// Build the full application router, with every middleware layer, on `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// A seeded actor: the user id plus the customer or pro id, and a token.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: DbId,
    /// `customers.id` for customers, `pros.id` for specialists.
    pub id: DbId,
    pub token: String,
}

fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

async fn seed_user(pool: &PgPool, name: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: name.to_string(),
            avatar_url: Some(format!("https://cdn.example.com/{name}.png")),
        },
    )
    .await
    .expect("user creation")
    .id
}

pub async fn customer(pool: &PgPool, name: &str) -> Actor {
    let user_id = seed_user(pool, name).await;
    let customer = CustomerRepo::create(pool, user_id)
        .await
        .expect("customer creation");
    Actor {
        user_id,
        id: customer.id,
        token: token_for(user_id, ROLE_CUSTOMER),
    }
}

pub async fn specialist(pool: &PgPool, name: &str) -> Actor {
    let user_id = seed_user(pool, name).await;
    let pro = ProRepo::create(pool, user_id, None)
        .await
        .expect("pro creation");
    Actor {
        user_id,
        id: pro.id,
        token: token_for(user_id, ROLE_SPECIALIST),
    }
}

pub async fn category_id(pool: &PgPool) -> DbId {
    CategoryRepo::find_by_name(pool, "Plumbing")
        .await
        .unwrap()
        .expect("seeded category")
        .id
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an order as `owner` and return its id.
pub async fn create_order(
    app: Router,
    pool: &PgPool,
    owner: &Actor,
    target: Option<&Actor>,
) -> DbId {
    let body = serde_json::json!({
        "category_id": category_id(pool).await,
        "title": "Fix sink",
        "description": "Kitchen sink drains slowly",
        "confidential_info": "Gate code 4411",
        "contact_info": "+1 555 0100",
        "location": "12 Elm Street",
        "target_specialist_id": target.map(|t| t.id),
    });
    let response = post_json_auth(app, "/api/v1/orders", &owner.token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

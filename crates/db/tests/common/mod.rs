#![allow(dead_code)]

use proboard_core::types::DbId;
use proboard_db::models::order::{CreateOrder, Order};
use proboard_db::models::user::{CreateUser, Customer, Pro};
use proboard_db::repositories::{CategoryRepo, CustomerRepo, OrderRepo, ProRepo, UserRepo};
use sqlx::PgPool;

pub async fn seed_customer(pool: &PgPool, name: &str) -> Customer {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            display_name: name.to_string(),
            avatar_url: None,
        },
    )
    .await
    .unwrap();
    CustomerRepo::create(pool, user.id).await.unwrap()
}

pub async fn seed_pro(pool: &PgPool, name: &str) -> Pro {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            display_name: name.to_string(),
            avatar_url: Some(format!("https://cdn.example.com/{name}.png")),
        },
    )
    .await
    .unwrap();
    ProRepo::create(pool, user.id, Some("Licensed and insured"))
        .await
        .unwrap()
}

pub async fn plumbing(pool: &PgPool) -> DbId {
    CategoryRepo::find_by_name(pool, "Plumbing")
        .await
        .unwrap()
        .expect("seeded category")
        .id
}

pub fn new_order(customer_id: DbId, category_id: DbId, title: &str) -> CreateOrder {
    CreateOrder {
        customer_id,
        category_id,
        title: title.to_string(),
        description: "Kitchen sink drains slowly".to_string(),
        location: Some("12 Elm Street".to_string()),
        preferred_time: Some("weekday mornings".to_string()),
        photo_urls: vec!["https://cdn.example.com/sink.jpg".to_string()],
    }
}

pub async fn open_order(pool: &PgPool, customer: &Customer, title: &str) -> Order {
    let category_id = plumbing(pool).await;
    OrderRepo::create(pool, &new_order(customer.id, category_id, title), None)
        .await
        .unwrap()
}

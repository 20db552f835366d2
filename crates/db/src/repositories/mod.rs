//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open transaction) as the first argument and
//! return `sqlx::Error`; business-rule errors are decided by callers.

pub mod category_repo;
pub mod order_repo;
pub mod response_repo;
pub mod review_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use order_repo::OrderRepo;
pub use response_repo::ResponseRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::{CustomerRepo, ProRepo, UserRepo};

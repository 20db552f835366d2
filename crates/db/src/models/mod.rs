//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize`-free create DTO the service layer fills in for inserts

pub mod category;
pub mod order;
pub mod response;
pub mod review;
pub mod user;

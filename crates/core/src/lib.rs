//! Domain logic for the proboard order marketplace.
//!
//! This crate has no internal dependencies so it can be shared by the
//! repository layer, the HTTP service and any future tooling. Everything
//! here is a pure function over plain values; persistence lives in
//! `proboard-db`.

pub mod access;
pub mod description;
pub mod error;
pub mod listing;
pub mod order;
pub mod pagination;
pub mod reputation;
pub mod response;
pub mod roles;
pub mod types;

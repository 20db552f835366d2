//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but yields `None` when no token is sent.
//! - [`rbac::RequireCustomer`] -- Requires the `customer` role.
//! - [`rbac::RequireSpecialist`] -- Requires the `specialist` role.

pub mod auth;
pub mod rbac;

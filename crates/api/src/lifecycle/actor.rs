//! Resolution of an authenticated user to the customer or specialist record
//! they act through.

use proboard_core::access::Viewer;
use proboard_core::error::CoreError;
use proboard_core::roles::ViewerRole;
use proboard_db::models::user::{Customer, Pro};
use proboard_db::repositories::{CustomerRepo, ProRepo};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// The customer record behind `user`, `Forbidden` if there is none.
pub async fn customer_for(pool: &PgPool, user: &AuthUser) -> AppResult<Customer> {
    let customer = CustomerRepo::find_by_user_id(pool, user.user_id)
        .await?
        .ok_or_else(|| {
            CoreError::Forbidden(format!(
                "User {} has no customer profile",
                user.user_id
            ))
        })?;
    Ok(customer)
}

/// The specialist record behind `user`, `Forbidden` if there is none.
pub async fn specialist_for(pool: &PgPool, user: &AuthUser) -> AppResult<Pro> {
    let pro = ProRepo::find_by_user_id(pool, user.user_id)
        .await?
        .ok_or_else(|| {
            CoreError::Forbidden(format!(
                "User {} has no specialist profile",
                user.user_id
            ))
        })?;
    Ok(pro)
}

/// Build the [`Viewer`] for an optional authenticated user.
///
/// No token, or a role claim the marketplace does not know, yields an
/// anonymous viewer.
pub async fn viewer_for(pool: &PgPool, user: Option<&AuthUser>) -> AppResult<Viewer> {
    let Some(user) = user else {
        return Ok(Viewer::anonymous());
    };
    match user.role {
        ViewerRole::Customer => {
            let customer = customer_for(pool, user).await?;
            Ok(Viewer::customer(user.user_id, customer.id))
        }
        ViewerRole::Specialist => {
            let pro = specialist_for(pool, user).await?;
            Ok(Viewer::specialist(user.user_id, pro.id))
        }
        ViewerRole::Anonymous => Ok(Viewer::anonymous()),
    }
}

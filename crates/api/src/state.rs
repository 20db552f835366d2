use std::sync::Arc;

use crate::config::ServerConfig;
use crate::lifecycle::OrderLifecycle;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: proboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Order lifecycle service.
    pub lifecycle: Arc<OrderLifecycle>,
}

impl AppState {
    pub fn new(pool: proboard_db::DbPool, config: ServerConfig) -> Self {
        let lifecycle = OrderLifecycle::new(
            pool.clone(),
            config.view_throttle_hours,
            config.reputation_strategy,
        );
        Self {
            pool,
            config: Arc::new(config),
            lifecycle: Arc::new(lifecycle),
        }
    }
}

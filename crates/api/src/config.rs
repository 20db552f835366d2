//! Server configuration from environment variables.
//!
//! Everything except `JWT_SECRET` has a local-development default. Bad
//! values panic at startup rather than surfacing on the first request.

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use proboard_core::access::DEFAULT_VIEW_THROTTLE_HOURS;
use proboard_core::reputation::ReputationStrategy;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origins for CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Window in which repeat views of an order by the same specialist are
    /// not counted again.
    pub view_throttle_hours: i64,
    /// How completion refreshes a specialist's cached rating.
    pub reputation_strategy: ReputationStrategy,
    pub jwt: JwtConfig,
}

/// Read `key`, falling back to `default`, and parse it.
///
/// # Panics
///
/// Panics with the variable name if the value does not parse.
fn env_or<T>(key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .unwrap_or_else(|e| panic!("{key} is invalid ('{raw}'): {e}"))
}

impl ServerConfig {
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `VIEW_THROTTLE_HOURS`  | `24`                       |
    /// | `REPUTATION_STRATEGY`  | `full` (or `incremental`)  |
    ///
    /// plus the `JWT_*` variables read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host: String = env_or("HOST", "0.0.0.0");
        let port: u16 = env_or("PORT", "3000");

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30");

        let view_throttle_hours: i64 = env_or(
            "VIEW_THROTTLE_HOURS",
            &DEFAULT_VIEW_THROTTLE_HOURS.to_string(),
        );
        assert!(
            view_throttle_hours >= 0,
            "VIEW_THROTTLE_HOURS must not be negative"
        );

        let reputation_strategy: ReputationStrategy = env_or("REPUTATION_STRATEGY", "full");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            view_throttle_hours,
            reputation_strategy,
            jwt: JwtConfig::from_env(),
        }
    }

    /// The socket address to listen on.
    ///
    /// # Panics
    ///
    /// Panics if `host` is not an IP address.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip: IpAddr = self
            .host
            .parse()
            .unwrap_or_else(|e| panic!("HOST '{}' is not an IP address: {e}", self.host));
        SocketAddr::new(ip, self.port)
    }
}

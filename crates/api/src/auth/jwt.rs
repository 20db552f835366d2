//! Access tokens issued by the external identity provider.
//!
//! The marketplace never signs users in itself. The provider signs HS256
//! tokens with a secret shared with this service; every token names the
//! user (`sub`) and the marketplace role they act in (`role`). When
//! `JWT_ISSUER` is configured the `iss` claim must match it.
//!
//! [`generate_access_token`] mints tokens with the same secret for local
//! tooling and integration tests.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use proboard_core::roles::ViewerRole;
use proboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id in `users`.
    pub sub: DbId,
    /// `"customer"` or `"specialist"`. Anything else is treated as anonymous.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    pub fn viewer_role(&self) -> ViewerRole {
        ViewerRole::from_claim(&self.role)
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Lifetime of tokens minted by [`generate_access_token`].
    pub access_token_expiry_mins: i64,
    /// Required `iss` claim, if any.
    pub issuer: Option<String>,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Load from the environment.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_ISSUER`               | no       | unset   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let issuer = std::env::var("JWT_ISSUER")
            .ok()
            .filter(|iss| !iss.trim().is_empty());

        Self {
            secret,
            access_token_expiry_mins,
            issuer,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
            validation.set_required_spec_claims(&["exp", "iss"]);
        }
        validation
    }
}

/// Mint a token for `user_id` acting as `role`, stamped with the configured
/// issuer.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        iss: config.issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry and (when configured) issuer.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proboard_core::roles::{ROLE_CUSTOMER, ROLE_SPECIALIST};

    fn config(issuer: Option<&str>) -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            issuer: issuer.map(str::to_string),
        }
    }

    fn sign(claims: &Claims, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn specialist_token_round_trips() {
        let config = config(None);
        let token = generate_access_token(42, ROLE_SPECIALIST, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.viewer_role(), ViewerRole::Specialist);
        assert!(claims.exp > claims.iat);
        assert!(claims.iss.is_none());
    }

    #[test]
    fn unknown_role_decodes_as_anonymous() {
        let config = config(None);
        let token = generate_access_token(7, "admin", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.viewer_role(), ViewerRole::Anonymous);
    }

    #[test]
    fn expired_token_fails() {
        let config = config(None);
        // Well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: ROLE_CUSTOMER.to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
            iss: None,
        };

        assert!(validate_token(&sign(&claims, &config), &config).is_err());
    }

    #[test]
    fn foreign_secret_fails() {
        let issued = config(None);
        let verifying = JwtConfig {
            secret: "another-secret".to_string(),
            ..config(None)
        };

        let token = generate_access_token(1, ROLE_CUSTOMER, &issued).unwrap();
        assert!(validate_token(&token, &verifying).is_err());
    }

    #[test]
    fn issuer_is_enforced_when_configured() {
        let strict = config(Some("https://id.proboard.test"));

        let token = generate_access_token(1, ROLE_CUSTOMER, &strict).unwrap();
        let claims = validate_token(&token, &strict).unwrap();
        assert_eq!(claims.iss.as_deref(), Some("https://id.proboard.test"));

        let unstamped = generate_access_token(1, ROLE_CUSTOMER, &config(None)).unwrap();
        assert!(validate_token(&unstamped, &strict).is_err());

        let other = generate_access_token(1, ROLE_CUSTOMER, &config(Some("https://evil.test")))
            .unwrap();
        assert!(validate_token(&other, &strict).is_err());
    }
}

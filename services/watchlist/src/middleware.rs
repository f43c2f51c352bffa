//! Authentication middleware for JWT token validation

use anyhow::{Context, Result};
use axum::{
    extract::{FromRequestParts, State},
    http::{Request, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, env, sync::Arc};
use tracing::{debug, warn};

use crate::error::ApiError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user ID
    pub sub: String,
    /// Expiration time
    pub exp: u64,
}

/// Authenticated user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

/// JWT verification settings
#[derive(Clone)]
pub struct JwtConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_PUBLIC_KEY`: RSA public key PEM, or a path to it (RS256)
    /// - `JWT_SECRET`: shared secret (HS256), used when no public key is set
    pub fn from_env() -> Result<Self> {
        if let Ok(public_key) = env::var("JWT_PUBLIC_KEY") {
            let public_key = if public_key.starts_with("-----BEGIN") {
                public_key
            } else {
                std::fs::read_to_string(&public_key)
                    .with_context(|| format!("Failed to read public key file {}", public_key))?
                    .trim()
                    .to_string()
            };
            return Self::rsa_pem(&public_key);
        }

        let secret = env::var("JWT_SECRET")
            .context("Neither JWT_PUBLIC_KEY nor JWT_SECRET environment variable is set")?;
        Ok(Self::hmac_secret(secret.as_bytes()))
    }

    /// Verify RS256 tokens against a PEM public key
    pub fn rsa_pem(pem: &str) -> Result<Self> {
        let decoding_key =
            DecodingKey::from_rsa_pem(pem.as_bytes()).context("Failed to create decoding key")?;
        Ok(Self::with_key(decoding_key, Algorithm::RS256))
    }

    /// Verify HS256 tokens against a shared secret
    pub fn hmac_secret(secret: &[u8]) -> Self {
        Self::with_key(DecodingKey::from_secret(secret), Algorithm::HS256)
    }

    fn with_key(decoding_key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        Self {
            decoding_key,
            validation,
        }
    }

    /// Validate a token and return the user it was issued to
    pub fn verify(&self, token: &str) -> Result<AuthUser> {
        let token_data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        let id = token_data
            .claims
            .sub
            .parse::<i64>()
            .with_context(|| format!("Subject {:?} is not a user id", token_data.claims.sub))?;

        Ok(AuthUser { id })
    }
}

/// Authentication middleware
///
/// Requests without a valid bearer token pass through unauthenticated; the
/// handlers decide whether that is an error.
pub async fn auth_middleware(
    State(jwt): State<Arc<JwtConfig>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let bearer = req.headers().typed_get::<Authorization<Bearer>>();

    if let Some(bearer) = bearer {
        match jwt.verify(bearer.token()) {
            Ok(user) => {
                debug!("Authenticated user {}", user.id);
                req.extensions_mut().insert(user);
            }
            Err(e) => warn!("Failed to validate token: {}", e),
        }
    }

    next.run(req).await
}

/// Identity of the caller, resolved by [`auth_middleware`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthContext {
    user: Option<AuthUser>,
}

impl AuthContext {
    #[cfg(test)]
    pub fn authenticated(user_id: i64) -> Self {
        Self {
            user: Some(AuthUser { id: user_id }),
        }
    }

    #[cfg(test)]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Current user id, or `Unauthorized`
    pub fn require_user(&self) -> Result<i64, ApiError> {
        self.user.map(|user| user.id).ok_or(ApiError::Unauthorized)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            user: parts.extensions.get::<AuthUser>().copied(),
        })
    }
}

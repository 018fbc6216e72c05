//! Request principal. Token issuance lives elsewhere; this module only verifies bearer
//! tokens and exposes the stable user identifier (`sub`) to handlers.

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

pub trait TokenVerifier: Send + Sync {
    /// Returns the principal identifier for a valid token, `None` otherwise.
    fn verify(&self, token: &str) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Verifies HMAC-signed JWTs. `exp` is required and checked.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(algorithm),
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Option<String> {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) if !data.claims.sub.trim().is_empty() => Some(data.claims.sub),
            Ok(_) => {
                debug!("Rejected token with empty subject");
                None
            }
            Err(e) => {
                debug!("Rejected token: {e}");
                None
            }
        }
    }
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let user_id = state.verifier.verify(token).ok_or(AppError::Unauthorized)?;
        Ok(AuthUser { user_id })
    }
}

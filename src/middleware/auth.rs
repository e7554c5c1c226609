use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
};

/// Claims carried by access tokens. Tokens are issued by another service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub exp: usize,
}

/// Validates HS256 bearer tokens against the shared secret
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Returns the user id of a valid token
    pub fn validate(&self, token: &str) -> AppResult<i64> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized(format!("Invalid token: {}", e))
        })?;
        Ok(data.claims.sub)
    }
}

/// Authenticated caller, extracted from `Authorization: Bearer <jwt>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("Malformed authorization header".to_string()))?;

        let token = bearer_token(header)?;
        state.tokens.validate(token).map(AuthUser)
    }
}

fn bearer_token(header: &str) -> AppResult<&str> {
    match header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(AppError::Unauthorized(
            "Malformed authorization header".to_string(),
        )),
    }
}

use chrono::Utc;
use http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use taskhive_core::UserId;
use thiserror::Error;

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error")]
    UnexpectedError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user id, as a uuid string.
    pub sub: String,
    pub exp: usize,
}

/// Pull the bearer token out of the `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| TokenAuthError::InvalidToken)?;
    value
        .strip_prefix("Bearer ")
        .ok_or(TokenAuthError::InvalidToken)
}

// Create a JWT bearer token carrying the user id
pub fn generate_auth_token(user_id: UserId, config: &JwtConfig) -> Result<String, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create auth token duration".to_string()),
    )?;

    // Create JWT expiration time
    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    // Cast exp to a usize, which is what Claims expects
    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
    )
    .map_err(TokenAuthError::TokenError)
}

// Check that a bearer token is valid by decoding it using the JWT secret
pub fn validate_auth_token(token: &str, config: &JwtConfig) -> Result<UserId, TokenAuthError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenAuthError::TokenError)?;

    claims
        .sub
        .parse::<UserId>()
        .map_err(|_| TokenAuthError::InvalidToken)
}

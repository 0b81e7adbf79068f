use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskhive_core::{User, UserStoreError};

use crate::auth::jwt::{TokenAuthError, extract_bearer_token, validate_auth_token};

use super::{error::ApiError, state::AppState};

/// The access gate: resolves the `Authorization: Bearer` header to a
/// live user. Missing/invalid/badly signed tokens are unauthorized; a
/// token whose user no longer resolves is not found.
pub struct AuthenticatedUser(pub User);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers).map_err(unauthorized)?;
        let user_id = validate_auth_token(token, &state.jwt).map_err(unauthorized)?;

        let user = match state.user_store.get_user(user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return Err(ApiError::NotFound("User not found.".into()));
            }
            Err(error) => return Err(ApiError::Unexpected(error.to_string())),
        };

        Ok(Self(user))
    }
}

fn unauthorized(error: TokenAuthError) -> ApiError {
    match error {
        TokenAuthError::MissingToken => ApiError::Unauthorized("Missing token".into()),
        TokenAuthError::InvalidToken | TokenAuthError::TokenError(_) => {
            ApiError::Unauthorized("Invalid token".into())
        }
        TokenAuthError::UnexpectedError(detail) => ApiError::Unexpected(detail),
    }
}

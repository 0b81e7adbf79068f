use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::UserId;

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
}

/// The six-digit code mailed to a user for account verification and
/// password resets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenCode(String);

impl TokenCode {
    pub fn generate() -> Self {
        let code = rand::rng().random_range(100_000..1_000_000);
        Self(code.to_string())
    }

    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let trimmed = raw.trim();
        if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(TokenError::Invalid)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TokenCode {
    type Error = TokenError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<TokenCode> for String {
    fn from(code: TokenCode) -> Self {
        code.0
    }
}

/// A single-use verification token tied to one user. Tokens past their TTL
/// are treated as absent by every store lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationToken {
    pub code: TokenCode,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn issue(user_id: UserId) -> Self {
        Self {
            code: TokenCode::generate(),
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.created_at > ttl
    }
}

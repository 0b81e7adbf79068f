use std::sync::Arc;

use redis::{Commands, Connection};
use taskhive_core::{TokenCode, TokenStore, TokenStoreError, VerificationToken};
use tokio::sync::Mutex;

/// Verification tokens in Redis. The TTL is enforced server-side with
/// `SET … EX`, so expired codes disappear without any cleanup pass.
#[derive(Clone)]
pub struct RedisTokenStore {
    conn: Arc<Mutex<Connection>>,
    token_ttl: u64,
}

impl RedisTokenStore {
    pub fn new(conn: Arc<Mutex<Connection>>, token_ttl: u64) -> Self {
        Self { conn, token_ttl }
    }
}

#[async_trait::async_trait]
impl TokenStore for RedisTokenStore {
    async fn store_token(&self, token: VerificationToken) -> Result<(), TokenStoreError> {
        let key = get_key(&token.code);
        let value = serde_json::to_string(&token)
            .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        let mut conn = self.conn.lock().await;
        conn.set_ex::<_, _, ()>(key, value, self.token_ttl)
            .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))
    }

    async fn find_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError> {
        let key = get_key(code);
        let mut conn = self.conn.lock().await;
        let value: Option<String> = conn
            .get(&key)
            .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        let value = value.ok_or(TokenStoreError::TokenNotFound)?;
        serde_json::from_str(&value).map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))
    }

    async fn consume_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError> {
        let key = get_key(code);
        let mut conn = self.conn.lock().await;
        let value: Option<String> = conn
            .get(&key)
            .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        let value = value.ok_or(TokenStoreError::TokenNotFound)?;
        conn.del::<_, ()>(&key)
            .map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))?;

        serde_json::from_str(&value).map_err(|e| TokenStoreError::UnexpectedError(e.to_string()))
    }
}

// We are using a key prefix to prevent collisions and organize data!
const TOKEN_KEY_PREFIX: &str = "verification_token:";

fn get_key(code: &TokenCode) -> String {
    format!("{}{}", TOKEN_KEY_PREFIX, code.as_str())
}

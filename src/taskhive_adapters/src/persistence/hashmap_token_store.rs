use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use taskhive_core::{TokenCode, TokenStore, TokenStoreError, VerificationToken};
use tokio::sync::RwLock;

/// In-memory verification token store. Expiry is enforced on lookup:
/// a token older than the TTL behaves exactly like one that never
/// existed.
#[derive(Clone)]
pub struct HashMapTokenStore {
    tokens: Arc<RwLock<HashMap<TokenCode, VerificationToken>>>,
    ttl: Duration,
}

impl HashMapTokenStore {
    pub fn new(ttl_in_seconds: i64) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(ttl_in_seconds),
        }
    }
}

#[async_trait::async_trait]
impl TokenStore for HashMapTokenStore {
    async fn store_token(&self, token: VerificationToken) -> Result<(), TokenStoreError> {
        self.tokens.write().await.insert(token.code.clone(), token);
        Ok(())
    }

    async fn find_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError> {
        let tokens = self.tokens.read().await;
        let token = tokens.get(code).ok_or(TokenStoreError::TokenNotFound)?;
        if token.is_expired(self.ttl) {
            return Err(TokenStoreError::TokenNotFound);
        }
        Ok(token.clone())
    }

    async fn consume_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError> {
        let mut tokens = self.tokens.write().await;
        let token = tokens.remove(code).ok_or(TokenStoreError::TokenNotFound)?;
        if token.is_expired(self.ttl) {
            return Err(TokenStoreError::TokenNotFound);
        }
        Ok(token)
    }
}

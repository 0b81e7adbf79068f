use taskhive_core::{TokenCode, TokenStore, TokenStoreError, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum VerifyAccountError {
    #[error("Token store error: {0}")]
    TokenStoreError(#[from] TokenStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Account verification: consume the mailed code and mark the account
/// confirmed. The token is single use; a second attempt with the same
/// code fails as unknown.
pub struct VerifyAccountUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
{
    user_store: &'a U,
    token_store: &'a T,
}

impl<'a, U, T> VerifyAccountUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
{
    pub fn new(user_store: &'a U, token_store: &'a T) -> Self {
        Self {
            user_store,
            token_store,
        }
    }

    #[tracing::instrument(name = "VerifyAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, code: TokenCode) -> Result<(), VerifyAccountError> {
        let token = self.token_store.consume_token(&code).await?;
        self.user_store.confirm_user(token.user_id).await?;
        Ok(())
    }
}

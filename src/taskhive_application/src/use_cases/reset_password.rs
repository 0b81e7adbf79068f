use taskhive_core::{
    Password, TokenCode, TokenStore, TokenStoreError, UserStore, UserStoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Token store error: {0}")]
    TokenStoreError(#[from] TokenStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Finish a password reset: consume the mailed code and set the new
/// password on the token's owner.
pub struct ResetPasswordUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
{
    user_store: &'a U,
    token_store: &'a T,
}

impl<'a, U, T> ResetPasswordUseCase<'a, U, T>
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

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, new_password))]
    pub async fn execute(
        &self,
        code: TokenCode,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let token = self.token_store.consume_token(&code).await?;
        self.user_store
            .set_new_password(token.user_id, new_password)
            .await?;
        Ok(())
    }
}

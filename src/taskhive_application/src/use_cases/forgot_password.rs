use taskhive_core::{
    AccountNotifier, Email, TokenStore, TokenStoreError, UserStore, UserStoreError,
    VerificationToken,
};

#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token store error: {0}")]
    TokenStoreError(#[from] TokenStoreError),
}

/// Start a password reset: store a single-use code and mail it. Unlike
/// registration, the token write is load-bearing here (the reset cannot
/// proceed without it), so its failure is surfaced.
pub struct ForgotPasswordUseCase<'a, U, T, N>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
    N: AccountNotifier + ?Sized,
{
    user_store: &'a U,
    token_store: &'a T,
    notifier: &'a N,
}

impl<'a, U, T, N> ForgotPasswordUseCase<'a, U, T, N>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
    N: AccountNotifier + ?Sized,
{
    pub fn new(user_store: &'a U, token_store: &'a T, notifier: &'a N) -> Self {
        Self {
            user_store,
            token_store,
            notifier,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        let token = VerificationToken::issue(user.id());
        self.token_store.store_token(token.clone()).await?;

        if let Err(error) = self
            .notifier
            .send_password_reset_email(user.email(), user.name(), &token.code)
            .await
        {
            tracing::warn!(user_id = %user.id(), %error, "failed to send password reset email");
        }

        Ok(())
    }
}

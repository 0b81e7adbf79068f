use taskhive_core::{
    AccountNotifier, Email, TokenStore, UserStore, UserStoreError, VerificationToken,
};

#[derive(Debug, thiserror::Error)]
pub enum RequestCodeError {
    #[error("User has already been verified.")]
    AlreadyConfirmed,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Re-send a confirmation code to an account that never verified. The
/// token write and the e-mail are best effort, like registration.
pub struct RequestCodeUseCase<'a, U, T, N>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
    N: AccountNotifier + ?Sized,
{
    user_store: &'a U,
    token_store: &'a T,
    notifier: &'a N,
}

impl<'a, U, T, N> RequestCodeUseCase<'a, U, T, N>
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

    #[tracing::instrument(name = "RequestCodeUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), RequestCodeError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        if user.is_confirmed() {
            return Err(RequestCodeError::AlreadyConfirmed);
        }

        let token = VerificationToken::issue(user.id());
        if let Err(error) = self.token_store.store_token(token.clone()).await {
            tracing::warn!(user_id = %user.id(), %error, "failed to store verification token");
        }
        if let Err(error) = self
            .notifier
            .send_confirmation_email(user.email(), user.name(), &token.code)
            .await
        {
            tracing::warn!(user_id = %user.id(), %error, "failed to send confirmation email");
        }

        Ok(())
    }
}

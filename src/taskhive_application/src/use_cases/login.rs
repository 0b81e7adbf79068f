use taskhive_core::{
    AccountNotifier, Email, Password, TokenStore, TokenStoreError, User, UserStore,
    UserStoreError, VerificationToken,
};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User not found.")]
    UserNotFound,
    /// The account exists but was never verified. A fresh code has
    /// already been issued and mailed by the time this is returned.
    #[error("The user's account has not been confirmed. We sent a confirmation e-mail.")]
    AccountNotConfirmed,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Token store error: {0}")]
    TokenStoreError(#[from] TokenStoreError),
}

/// Login: resolve the account, re-issue a confirmation code on the
/// unconfirmed path, then check the password. Issuing the actual bearer
/// credential is left to the HTTP layer.
pub struct LoginUseCase<'a, U, T, N>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
    N: AccountNotifier + ?Sized,
{
    user_store: &'a U,
    token_store: &'a T,
    notifier: &'a N,
}

impl<'a, U, T, N> LoginUseCase<'a, U, T, N>
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

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<User, LoginError> {
        let user = match self.user_store.get_user_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => return Err(LoginError::UserNotFound),
            Err(error) => return Err(LoginError::UserStoreError(error)),
        };

        if !user.is_confirmed() {
            let token = VerificationToken::issue(user.id());
            self.token_store.store_token(token.clone()).await?;
            if let Err(error) = self
                .notifier
                .send_confirmation_email(user.email(), user.name(), &token.code)
                .await
            {
                tracing::warn!(user_id = %user.id(), %error, "failed to send confirmation email");
            }
            return Err(LoginError::AccountNotConfirmed);
        }

        match self.user_store.verify_password(user.id(), &password).await {
            Ok(()) => Ok(user),
            Err(UserStoreError::IncorrectPassword) => Err(LoginError::IncorrectPassword),
            Err(error) => Err(LoginError::UserStoreError(error)),
        }
    }
}

use taskhive_core::{
    AccountNotifier, Email, NewUser, Password, TokenStore, User, UserName, UserStore,
    UserStoreError, VerificationToken,
};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Registration: create an unconfirmed account, issue a verification
/// token, and mail the code. The token write and the e-mail are best
/// effort; only the account insert itself can fail the operation.
pub struct RegisterUseCase<'a, U, T, N>
where
    U: UserStore + ?Sized,
    T: TokenStore + ?Sized,
    N: AccountNotifier + ?Sized,
{
    user_store: &'a U,
    token_store: &'a T,
    notifier: &'a N,
}

impl<'a, U, T, N> RegisterUseCase<'a, U, T, N>
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

    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        name: UserName,
        email: Email,
        password: Password,
    ) -> Result<User, RegisterError> {
        let user = self
            .user_store
            .add_user(NewUser::new(name, email, password))
            .await?;

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

        Ok(user)
    }
}

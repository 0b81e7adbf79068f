use taskhive_core::{Password, UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum CheckPasswordError {
    #[error("Password is incorrect.")]
    IncorrectPassword,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Verify the authenticated user's password without changing anything;
/// the front end asks for this before destructive actions.
pub struct CheckPasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> CheckPasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "CheckPasswordUseCase::execute", skip(self, password))]
    pub async fn execute(&self, user_id: UserId, password: Password) -> Result<(), CheckPasswordError> {
        match self.user_store.verify_password(user_id, &password).await {
            Ok(()) => Ok(()),
            Err(UserStoreError::IncorrectPassword) => Err(CheckPasswordError::IncorrectPassword),
            Err(error) => Err(CheckPasswordError::UserStoreError(error)),
        }
    }
}

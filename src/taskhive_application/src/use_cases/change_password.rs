use taskhive_core::{Password, UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Current password is incorrect.")]
    IncorrectCurrentPassword,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Change the authenticated user's password after re-checking the
/// current one.
pub struct ChangePasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> ChangePasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, current_password, new_password)
    )]
    pub async fn execute(
        &self,
        user_id: UserId,
        current_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        match self
            .user_store
            .verify_password(user_id, &current_password)
            .await
        {
            Ok(()) => {}
            Err(UserStoreError::IncorrectPassword) => {
                return Err(ChangePasswordError::IncorrectCurrentPassword);
            }
            Err(error) => return Err(ChangePasswordError::UserStoreError(error)),
        }

        self.user_store
            .set_new_password(user_id, new_password)
            .await
            .map_err(ChangePasswordError::UserStoreError)?;

        Ok(())
    }
}

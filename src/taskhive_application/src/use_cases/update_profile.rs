use taskhive_core::{Email, User, UserId, UserName, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Profile update for the authenticated user. The store re-checks e-mail
/// uniqueness, excluding the caller's own record.
pub struct UpdateProfileUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> UpdateProfileUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
        name: UserName,
        email: Email,
    ) -> Result<User, UpdateProfileError> {
        let user = self.user_store.update_profile(user_id, name, email).await?;
        Ok(user)
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::Secret;
use taskhive_core::{
    Email, NewUser, Password, User, UserId, UserName, UserStore, UserStoreError,
};
use tokio::sync::RwLock;

use super::password_hash::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
struct StoredUser {
    user: User,
    password_hash: Secret<String>,
}

/// In-memory user store used by the test suites and local runs. Passwords
/// are hashed exactly like the Postgres adapter's; the e-mail uniqueness
/// check happens under the single write lock, so concurrent registrations
/// cannot both win.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        // Hash outside the lock; the uniqueness check stays atomic below.
        let password_hash = compute_password_hash(new_user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if users
            .values()
            .any(|stored| stored.user.email() == &new_user.email)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let user = User::new(new_user.id, new_user.name, new_user.email, false);
        users.insert(
            user.id(),
            StoredUser {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(&id)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|stored| stored.user.email() == email)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn verify_password(
        &self,
        id: UserId,
        candidate: &Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = {
            let users = self.users.read().await;
            users
                .get(&id)
                .map(|stored| stored.password_hash.clone())
                .ok_or(UserStoreError::UserNotFound)?
        };

        verify_password_hash(password_hash, candidate.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.password_hash = password_hash;
        Ok(())
    }

    async fn confirm_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user = User::new(
            stored.user.id(),
            stored.user.name().clone(),
            stored.user.email().clone(),
            true,
        );
        Ok(())
    }

    async fn update_profile(
        &self,
        id: UserId,
        name: UserName,
        email: Email,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|stored| stored.user.email() == &email && stored.user.id() != id)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user = User::new(id, name, email, stored.user.is_confirmed());
        Ok(stored.user.clone())
    }
}

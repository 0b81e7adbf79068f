use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres};
use taskhive_core::{
    Email, NewUser, Password, User, UserId, UserName, UserStore, UserStoreError,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    confirmed: bool,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let name = UserName::parse(&row.name)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let email = Email::parse(&row.email)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        Ok(User::new(UserId::from(row.id), name, email, row.confirmed))
    }
}

fn map_insert_error(error: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.constraint().is_some() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    UserStoreError::UnexpectedError(error.to_string())
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let user = User::new(new_user.id, new_user.name, new_user.email, false);

        sqlx::query(
            r#"
                INSERT INTO users (id, name, email, password_hash, confirmed)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name().as_str())
        .bind(user.email().as_str())
        .bind(password_hash.expose_secret())
        .bind(user.is_confirmed())
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(user)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, confirmed
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving user by e-mail from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, confirmed
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn verify_password(
        &self,
        id: UserId,
        candidate: &Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = sqlx::query_scalar::<_, String>(
            r#"
                SELECT password_hash
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
        .ok_or(UserStoreError::UserNotFound)?;

        verify_password_hash(Secret::from(password_hash), candidate.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1
                WHERE id = $2
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Confirming user in PostgreSQL", skip_all)]
    async fn confirm_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET confirmed = TRUE
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: UserId,
        name: UserName,
        email: Email,
    ) -> Result<User, UserStoreError> {
        // The unique index on email is the real uniqueness check; a
        // violation surfaces as UserAlreadyExists.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                UPDATE users
                SET name = $1, email = $2
                WHERE id = $3
                RETURNING id, name, email, confirmed
            "#,
        )
        .bind(name.as_str())
        .bind(email.as_str())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_insert_error)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }
}

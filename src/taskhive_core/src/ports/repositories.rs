use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    note::{Note, NoteId},
    password::Password,
    project::{Project, ProjectId},
    task::{Task, TaskId},
    token::{TokenCode, VerificationToken},
    user::{NewUser, User, UserId, UserName},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Accounts and their credentials. Hashing and verification of passwords
/// happen behind this port; e-mail uniqueness is enforced here as well so
/// concurrent registrations cannot both succeed.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn verify_password(&self, id: UserId, candidate: &Password)
    -> Result<(), UserStoreError>;
    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
    async fn confirm_user(&self, id: UserId) -> Result<(), UserStoreError>;
    async fn update_profile(
        &self,
        id: UserId,
        name: UserName,
        email: Email,
    ) -> Result<User, UserStoreError>;
}

// TokenStore port trait and errors
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Invalid token")]
    TokenNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TokenNotFound, Self::TokenNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Single-use verification tokens. Expired tokens are reported as absent.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn store_token(&self, token: VerificationToken) -> Result<(), TokenStoreError>;
    /// Look a token up without consuming it.
    async fn find_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError>;
    /// Take a token out of the store; a second consume of the same code
    /// fails with `TokenNotFound`.
    async fn consume_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError>;
}

// ProjectStore port trait and errors
#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Task not found")]
    TaskNotFound,
    #[error("Note not found")]
    NoteNotFound,
    #[error("User is already assigned to this project")]
    AlreadyTeamMember,
    #[error("User not found in this project")]
    NotTeamMember,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectNotFound, Self::ProjectNotFound)
                | (Self::TaskNotFound, Self::TaskNotFound)
                | (Self::NoteNotFound, Self::NoteNotFound)
                | (Self::AlreadyTeamMember, Self::AlreadyTeamMember)
                | (Self::NotTeamMember, Self::NotTeamMember)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// The project aggregate: projects with their team lists, tasks, and
/// notes. Tasks are always addressed through their owning project, and
/// deleting a project removes its tasks and their notes.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, project: Project) -> Result<Project, ProjectStoreError>;
    async fn get_project(&self, id: ProjectId) -> Result<Project, ProjectStoreError>;
    /// Projects the user owns or is a team member of.
    async fn list_projects_for(&self, user: UserId) -> Result<Vec<Project>, ProjectStoreError>;
    async fn update_project(&self, project: Project) -> Result<Project, ProjectStoreError>;
    async fn delete_project(&self, id: ProjectId) -> Result<(), ProjectStoreError>;

    async fn add_team_member(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> Result<(), ProjectStoreError>;
    async fn remove_team_member(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> Result<(), ProjectStoreError>;

    async fn create_task(&self, task: Task) -> Result<Task, ProjectStoreError>;
    /// Fails with `TaskNotFound` when the task is absent or belongs to a
    /// different project.
    async fn get_task(&self, project: ProjectId, task: TaskId) -> Result<Task, ProjectStoreError>;
    async fn list_tasks(&self, project: ProjectId) -> Result<Vec<Task>, ProjectStoreError>;
    async fn update_task(&self, task: Task) -> Result<Task, ProjectStoreError>;
    async fn delete_task(&self, project: ProjectId, task: TaskId)
    -> Result<(), ProjectStoreError>;

    async fn add_note(&self, note: Note) -> Result<Note, ProjectStoreError>;
    async fn list_notes(&self, task: TaskId) -> Result<Vec<Note>, ProjectStoreError>;
    async fn get_note(&self, task: TaskId, note: NoteId) -> Result<Note, ProjectStoreError>;
    async fn delete_note(&self, task: TaskId, note: NoteId) -> Result<(), ProjectStoreError>;
}

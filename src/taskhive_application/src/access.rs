use taskhive_core::{Project, ProjectId, ProjectStore, ProjectStoreError, UserId};
use thiserror::Error;

/// How much access a project-scoped operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Owner or team member.
    Member,
    /// Owner only.
    Owner,
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Invalid action")]
    Forbidden,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<ProjectStoreError> for AccessError {
    fn from(error: ProjectStoreError) -> Self {
        match error {
            ProjectStoreError::ProjectNotFound => AccessError::ProjectNotFound,
            other => AccessError::UnexpectedError(other.to_string()),
        }
    }
}

/// Resolve a project by id and check the requester against the required
/// access level. Every project-scoped use case funnels through here.
pub async fn resolve_project<P>(
    project_store: &P,
    project_id: ProjectId,
    requester: UserId,
    level: AccessLevel,
) -> Result<Project, AccessError>
where
    P: ProjectStore + ?Sized,
{
    let project = project_store.get_project(project_id).await?;

    let allowed = match level {
        AccessLevel::Member => project.is_member(requester),
        AccessLevel::Owner => project.is_owner(requester),
    };
    if !allowed {
        return Err(AccessError::Forbidden);
    }

    Ok(project)
}

use chrono::Utc;
use taskhive_core::{Project, ProjectId, ProjectStore, ProjectStoreError, UserId};

use crate::access::{AccessError, AccessLevel, resolve_project};

#[derive(Debug, thiserror::Error)]
pub enum ProjectsError {
    #[error("{0}")]
    Access(#[from] AccessError),
    #[error("Project store error: {0}")]
    Store(#[from] ProjectStoreError),
}

/// Project CRUD. Reads are open to the owner and team; updates and
/// deletes are owner only.
pub struct ProjectsUseCase<'a, P>
where
    P: ProjectStore + ?Sized,
{
    project_store: &'a P,
}

impl<'a, P> ProjectsUseCase<'a, P>
where
    P: ProjectStore + ?Sized,
{
    pub fn new(project_store: &'a P) -> Self {
        Self { project_store }
    }

    #[tracing::instrument(name = "ProjectsUseCase::create", skip(self, description))]
    pub async fn create(
        &self,
        owner: UserId,
        project_name: String,
        client_name: String,
        description: String,
    ) -> Result<Project, ProjectsError> {
        let project = Project::new(project_name, client_name, description, owner);
        Ok(self.project_store.create_project(project).await?)
    }

    #[tracing::instrument(name = "ProjectsUseCase::list", skip(self))]
    pub async fn list(&self, requester: UserId) -> Result<Vec<Project>, ProjectsError> {
        Ok(self.project_store.list_projects_for(requester).await?)
    }

    #[tracing::instrument(name = "ProjectsUseCase::get", skip(self))]
    pub async fn get(
        &self,
        requester: UserId,
        project_id: ProjectId,
    ) -> Result<Project, ProjectsError> {
        let project = resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;
        Ok(project)
    }

    #[tracing::instrument(name = "ProjectsUseCase::update", skip(self, description))]
    pub async fn update(
        &self,
        requester: UserId,
        project_id: ProjectId,
        project_name: String,
        client_name: String,
        description: String,
    ) -> Result<Project, ProjectsError> {
        let mut project = resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Owner,
        )
        .await?;

        project.project_name = project_name;
        project.client_name = client_name;
        project.description = description;
        project.updated_at = Utc::now();

        Ok(self.project_store.update_project(project).await?)
    }

    #[tracing::instrument(name = "ProjectsUseCase::delete", skip(self))]
    pub async fn delete(
        &self,
        requester: UserId,
        project_id: ProjectId,
    ) -> Result<(), ProjectsError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Owner,
        )
        .await?;
        Ok(self.project_store.delete_project(project_id).await?)
    }
}

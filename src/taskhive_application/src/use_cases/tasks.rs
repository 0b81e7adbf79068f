use chrono::Utc;
use taskhive_core::{ProjectId, ProjectStore, ProjectStoreError, Task, TaskId, TaskStatus, UserId};

use crate::access::{AccessError, AccessLevel, resolve_project};

#[derive(Debug, thiserror::Error)]
pub enum TasksError {
    #[error("{0}")]
    Access(#[from] AccessError),
    #[error("Project store error: {0}")]
    Store(#[from] ProjectStoreError),
}

/// Task CRUD inside a project. Creating, editing, and deleting tasks is
/// owner only; reading and moving the status is open to the whole team.
pub struct TasksUseCase<'a, P>
where
    P: ProjectStore + ?Sized,
{
    project_store: &'a P,
}

impl<'a, P> TasksUseCase<'a, P>
where
    P: ProjectStore + ?Sized,
{
    pub fn new(project_store: &'a P) -> Self {
        Self { project_store }
    }

    #[tracing::instrument(name = "TasksUseCase::create", skip(self, description))]
    pub async fn create(
        &self,
        requester: UserId,
        project_id: ProjectId,
        name: String,
        description: String,
    ) -> Result<Task, TasksError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Owner,
        )
        .await?;

        let task = Task::new(project_id, name, description);
        Ok(self.project_store.create_task(task).await?)
    }

    #[tracing::instrument(name = "TasksUseCase::list", skip(self))]
    pub async fn list(
        &self,
        requester: UserId,
        project_id: ProjectId,
    ) -> Result<Vec<Task>, TasksError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;
        Ok(self.project_store.list_tasks(project_id).await?)
    }

    #[tracing::instrument(name = "TasksUseCase::get", skip(self))]
    pub async fn get(
        &self,
        requester: UserId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<Task, TasksError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;
        Ok(self.project_store.get_task(project_id, task_id).await?)
    }

    #[tracing::instrument(name = "TasksUseCase::update", skip(self, description))]
    pub async fn update(
        &self,
        requester: UserId,
        project_id: ProjectId,
        task_id: TaskId,
        name: String,
        description: String,
    ) -> Result<Task, TasksError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Owner,
        )
        .await?;

        let mut task = self.project_store.get_task(project_id, task_id).await?;
        task.name = name;
        task.description = description;
        task.updated_at = Utc::now();

        Ok(self.project_store.update_task(task).await?)
    }

    /// Bare assignment: any status may move to any other. Appends a
    /// history entry recording the acting user.
    #[tracing::instrument(name = "TasksUseCase::update_status", skip(self))]
    pub async fn update_status(
        &self,
        requester: UserId,
        project_id: ProjectId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<Task, TasksError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;

        let mut task = self.project_store.get_task(project_id, task_id).await?;
        task.set_status(status, requester);

        Ok(self.project_store.update_task(task).await?)
    }

    #[tracing::instrument(name = "TasksUseCase::delete", skip(self))]
    pub async fn delete(
        &self,
        requester: UserId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<(), TasksError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Owner,
        )
        .await?;
        Ok(self.project_store.delete_task(project_id, task_id).await?)
    }
}

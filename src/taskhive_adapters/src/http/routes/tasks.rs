use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use taskhive_application::TasksUseCase;
use taskhive_core::{ProjectId, TaskId, TaskStatus};
use uuid::Uuid;

use super::super::{
    error::ApiError, extract::AuthenticatedUser, responses::TaskResponse, state::AppState,
};

#[derive(Deserialize)]
pub struct TaskRequest {
    pub name: String,
    pub description: String,
}

impl TaskRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("Task name is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::InvalidInput("Task description is required".into()));
        }
        Ok(())
    }
}

#[tracing::instrument(name = "Create task", skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
    Json(request): Json<TaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let use_case = TasksUseCase::new(state.project_store.as_ref());
    use_case
        .create(
            user.id(),
            ProjectId::from(project_id),
            request.name,
            request.description,
        )
        .await?;

    Ok((StatusCode::CREATED, String::from("Task created successfully")))
}

#[tracing::instrument(name = "List tasks", skip_all)]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let use_case = TasksUseCase::new(state.project_store.as_ref());
    let tasks = use_case.list(user.id(), ProjectId::from(project_id)).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

#[tracing::instrument(name = "Get task", skip_all)]
pub async fn get_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TaskResponse>, ApiError> {
    let use_case = TasksUseCase::new(state.project_store.as_ref());
    let task = use_case
        .get(
            user.id(),
            ProjectId::from(project_id),
            TaskId::from(task_id),
        )
        .await?;

    Ok(Json(TaskResponse::from(task)))
}

#[tracing::instrument(name = "Update task", skip_all)]
pub async fn update_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<TaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let use_case = TasksUseCase::new(state.project_store.as_ref());
    use_case
        .update(
            user.id(),
            ProjectId::from(project_id),
            TaskId::from(task_id),
            request.name,
            request.description,
        )
        .await?;

    Ok(String::from("Task updated successfully"))
}

#[derive(Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

#[tracing::instrument(name = "Update task status", skip_all)]
pub async fn update_task_status(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateTaskStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = TasksUseCase::new(state.project_store.as_ref());
    use_case
        .update_status(
            user.id(),
            ProjectId::from(project_id),
            TaskId::from(task_id),
            request.status,
        )
        .await?;

    Ok(String::from("Task status updated successfully"))
}

#[tracing::instrument(name = "Delete task", skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = TasksUseCase::new(state.project_store.as_ref());
    use_case
        .delete(
            user.id(),
            ProjectId::from(project_id),
            TaskId::from(task_id),
        )
        .await?;

    Ok(String::from("Task deleted successfully"))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use taskhive_application::ProjectsUseCase;
use taskhive_core::ProjectId;
use uuid::Uuid;

use super::super::{
    error::ApiError, extract::AuthenticatedUser, responses::ProjectResponse, state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub project_name: String,
    pub client_name: String,
    pub description: String,
}

impl ProjectRequest {
    fn validate(&self) -> Result<(), ApiError> {
        for (value, message) in [
            (&self.project_name, "Project Name is required"),
            (&self.client_name, "Client Name is required"),
            (&self.description, "Description is required"),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::InvalidInput(message.into()));
            }
        }
        Ok(())
    }
}

#[tracing::instrument(name = "Create project", skip_all)]
pub async fn create_project(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(request): Json<ProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let use_case = ProjectsUseCase::new(state.project_store.as_ref());
    use_case
        .create(
            user.id(),
            request.project_name,
            request.client_name,
            request.description,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        String::from("Project created successfully"),
    ))
}

#[tracing::instrument(name = "List projects", skip_all)]
pub async fn list_projects(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let use_case = ProjectsUseCase::new(state.project_store.as_ref());
    let projects = use_case.list(user.id()).await?;

    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

#[tracing::instrument(name = "Get project", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let use_case = ProjectsUseCase::new(state.project_store.as_ref());
    let project = use_case
        .get(user.id(), ProjectId::from(project_id))
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

#[tracing::instrument(name = "Update project", skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
    Json(request): Json<ProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let use_case = ProjectsUseCase::new(state.project_store.as_ref());
    use_case
        .update(
            user.id(),
            ProjectId::from(project_id),
            request.project_name,
            request.client_name,
            request.description,
        )
        .await?;

    Ok(String::from("Project updated successfully"))
}

#[tracing::instrument(name = "Delete project", skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = ProjectsUseCase::new(state.project_store.as_ref());
    use_case
        .delete(user.id(), ProjectId::from(project_id))
        .await?;

    Ok(String::from("Project deleted successfully"))
}

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use taskhive_application::TeamUseCase;
use taskhive_core::{Email, ProjectId, UserId};
use uuid::Uuid;

use super::super::{
    error::ApiError, extract::AuthenticatedUser, responses::UserResponse, state::AppState,
};

#[derive(Deserialize)]
pub struct FindMemberRequest {
    pub email: String,
}

#[tracing::instrument(name = "Find team member by email", skip_all)]
pub async fn find_member_by_email(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
    Json(request): Json<FindMemberRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let email = Email::parse(&request.email)?;

    let use_case = TeamUseCase::new(state.project_store.as_ref(), state.user_store.as_ref());
    let found = use_case
        .find_member_by_email(user.id(), ProjectId::from(project_id), email)
        .await?;

    Ok(Json(UserResponse::from(&found)))
}

#[tracing::instrument(name = "List project team", skip_all)]
pub async fn list_team(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let use_case = TeamUseCase::new(state.project_store.as_ref(), state.user_store.as_ref());
    let team = use_case
        .list_team(user.id(), ProjectId::from(project_id))
        .await?;

    Ok(Json(team.iter().map(UserResponse::from).collect()))
}

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub id: Uuid,
}

#[tracing::instrument(name = "Add team member", skip_all)]
pub async fn add_member(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = TeamUseCase::new(state.project_store.as_ref(), state.user_store.as_ref());
    use_case
        .add_member(
            user.id(),
            ProjectId::from(project_id),
            UserId::from(request.id),
        )
        .await?;

    Ok(String::from("User added correctly"))
}

#[tracing::instrument(name = "Remove team member", skip_all)]
pub async fn remove_member(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = TeamUseCase::new(state.project_store.as_ref(), state.user_store.as_ref());
    use_case
        .remove_member(
            user.id(),
            ProjectId::from(project_id),
            UserId::from(user_id),
        )
        .await?;

    Ok(String::from("User removed correctly"))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use taskhive_application::NotesUseCase;
use taskhive_core::{NoteId, ProjectId, TaskId};
use uuid::Uuid;

use super::super::{
    error::ApiError, extract::AuthenticatedUser, responses::NoteResponse, state::AppState,
};

#[derive(Deserialize)]
pub struct CreateNoteRequest {
    pub content: String,
}

#[tracing::instrument(name = "Create note", skip_all)]
pub async fn create_note(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::InvalidInput("Note content is required".into()));
    }

    let use_case = NotesUseCase::new(state.project_store.as_ref());
    use_case
        .create(
            user.id(),
            ProjectId::from(project_id),
            TaskId::from(task_id),
            request.content,
        )
        .await?;

    Ok((StatusCode::CREATED, String::from("Note created successfully")))
}

#[tracing::instrument(name = "List notes", skip_all)]
pub async fn list_notes(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let use_case = NotesUseCase::new(state.project_store.as_ref());
    let notes = use_case
        .list(
            user.id(),
            ProjectId::from(project_id),
            TaskId::from(task_id),
        )
        .await?;

    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[tracing::instrument(name = "Delete note", skip_all)]
pub async fn delete_note(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((project_id, task_id, note_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = NotesUseCase::new(state.project_store.as_ref());
    use_case
        .delete(
            user.id(),
            ProjectId::from(project_id),
            TaskId::from(task_id),
            NoteId::from(note_id),
        )
        .await?;

    Ok(String::from("Note deleted successfully"))
}

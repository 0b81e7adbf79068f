pub mod auth;
pub mod notes;
pub mod projects;
pub mod tasks;
pub mod team;

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use super::state::AppState;

/// `/auth` routes: the public account lifecycle plus the profile and
/// password endpoints behind the access gate.
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/create-account", post(auth::create_account))
        .route("/verify-account", post(auth::verify_account))
        .route("/login", post(auth::login))
        .route("/request-code", post(auth::request_code))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/validate-token", post(auth::validate_token))
        .route(
            "/update-password/{token}",
            patch(auth::update_password_with_token),
        )
        .route("/getMe", get(auth::get_me))
        .route("/profile", put(auth::update_profile))
        .route("/update-password", post(auth::update_password))
        .route("/check-password", post(auth::check_password))
}

/// `/projects` routes: project CRUD with nested task, team, and note
/// resources, all behind the access gate.
pub fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects))
        .route("/", post(projects::create_project))
        .route("/{project_id}", get(projects::get_project))
        .route("/{project_id}", put(projects::update_project))
        .route("/{project_id}", delete(projects::delete_project))
        .route("/{project_id}/tasks", get(tasks::list_tasks))
        .route("/{project_id}/tasks", post(tasks::create_task))
        .route("/{project_id}/tasks/{task_id}", get(tasks::get_task))
        .route("/{project_id}/tasks/{task_id}", put(tasks::update_task))
        .route("/{project_id}/tasks/{task_id}", delete(tasks::delete_task))
        .route(
            "/{project_id}/tasks/{task_id}/status",
            patch(tasks::update_task_status),
        )
        .route("/{project_id}/team", get(team::list_team))
        .route("/{project_id}/team", post(team::add_member))
        .route("/{project_id}/team/find", post(team::find_member_by_email))
        .route("/{project_id}/team/{user_id}", delete(team::remove_member))
        .route("/{project_id}/tasks/{task_id}/notes", get(notes::list_notes))
        .route(
            "/{project_id}/tasks/{task_id}/notes",
            post(notes::create_note),
        )
        .route(
            "/{project_id}/tasks/{task_id}/notes/{note_id}",
            delete(notes::delete_note),
        )
}

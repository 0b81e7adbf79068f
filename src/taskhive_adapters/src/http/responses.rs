use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhive_core::{
    Note, NoteId, Project, ProjectId, StatusChange, Task, TaskId, TaskStatus, User, UserId,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub project_name: String,
    pub client_name: String,
    pub description: String,
    pub owner: UserId,
    pub team: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            project_name: project.project_name,
            client_name: project.client_name,
            description: project.description,
            owner: project.owner,
            team: project.team,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    pub changed_by: UserId,
    pub status: TaskStatus,
    pub changed_at: DateTime<Utc>,
}

impl From<StatusChange> for StatusChangeResponse {
    fn from(change: StatusChange) -> Self {
        Self {
            changed_by: change.changed_by,
            status: change.status,
            changed_at: change.changed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub status_history: Vec<StatusChangeResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            name: task.name,
            description: task.description,
            status: task.status,
            status_history: task
                .status_history
                .into_iter()
                .map(StatusChangeResponse::from)
                .collect(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: NoteId,
    pub task_id: TaskId,
    pub content: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            task_id: note.task_id,
            content: note.content,
            created_by: note.created_by,
            created_at: note.created_at,
        }
    }
}

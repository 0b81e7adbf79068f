use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{project::ProjectId, user::UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TaskId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(raw)?))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown task status")]
pub struct UnknownTaskStatus;

/// Workflow state of a task. Any status may move to any other; there is no
/// transition validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    OnHold,
    InProgress,
    UnderReview,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::OnHold => "onHold",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::UnderReview => "underReview",
            TaskStatus::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownTaskStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(TaskStatus::Pending),
            "onHold" => Ok(TaskStatus::OnHold),
            "inProgress" => Ok(TaskStatus::InProgress),
            "underReview" => Ok(TaskStatus::UnderReview),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(UnknownTaskStatus),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a task's status history: who moved it, to what, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub changed_by: UserId,
    pub status: TaskStatus,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub status_history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(project_id: ProjectId, name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            project_id,
            name,
            description,
            status: TaskStatus::default(),
            status_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bare status assignment plus a history entry recording the actor.
    pub fn set_status(&mut self, status: TaskStatus, changed_by: UserId) {
        let now = Utc::now();
        self.status = status;
        self.status_history.push(StatusChange {
            changed_by,
            status,
            changed_at: now,
        });
        self.updated_at = now;
    }
}

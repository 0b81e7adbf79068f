use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use taskhive_core::{
    Note, NoteId, Project, ProjectId, ProjectStore, ProjectStoreError, StatusChange, Task, TaskId,
    TaskStatus, UserId,
};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresProjectStore { pool }
    }

    async fn load_team(&self, project_id: ProjectId) -> Result<Vec<UserId>, ProjectStoreError> {
        let members = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
                SELECT user_id
                FROM project_members
                WHERE project_id = $1
                ORDER BY added_at
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(members.into_iter().map(UserId::from).collect())
    }

    async fn load_history(&self, task_id: TaskId) -> Result<Vec<StatusChange>, ProjectStoreError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
                SELECT changed_by, status, changed_at
                FROM task_status_history
                WHERE task_id = $1
                ORDER BY changed_at
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter().map(HistoryRow::try_into).collect()
    }

    async fn task_from_row(&self, row: TaskRow) -> Result<Task, ProjectStoreError> {
        let history = self.load_history(TaskId::from(row.id)).await?;
        row.into_task(history)
    }
}

fn unexpected(error: sqlx::Error) -> ProjectStoreError {
    ProjectStoreError::UnexpectedError(error.to_string())
}

fn parse_status(raw: &str) -> Result<TaskStatus, ProjectStoreError> {
    raw.parse()
        .map_err(|_| ProjectStoreError::UnexpectedError(format!("unknown task status {raw:?}")))
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: uuid::Uuid,
    project_name: String,
    client_name: String,
    description: String,
    owner_id: uuid::Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self, team: Vec<UserId>) -> Project {
        Project {
            id: ProjectId::from(self.id),
            project_name: self.project_name,
            client_name: self.client_name,
            description: self.description,
            owner: UserId::from(self.owner_id),
            team,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: uuid::Uuid,
    project_id: uuid::Uuid,
    name: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self, status_history: Vec<StatusChange>) -> Result<Task, ProjectStoreError> {
        Ok(Task {
            id: TaskId::from(self.id),
            project_id: ProjectId::from(self.project_id),
            name: self.name,
            description: self.description,
            status: parse_status(&self.status)?,
            status_history,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    changed_by: uuid::Uuid,
    status: String,
    changed_at: DateTime<Utc>,
}

impl TryFrom<HistoryRow> for StatusChange {
    type Error = ProjectStoreError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(StatusChange {
            changed_by: UserId::from(row.changed_by),
            status: parse_status(&row.status)?,
            changed_at: row.changed_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: uuid::Uuid,
    task_id: uuid::Uuid,
    content: String,
    created_by: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: NoteId::from(row.id),
            task_id: TaskId::from(row.task_id),
            content: row.content,
            created_by: UserId::from(row.created_by),
            created_at: row.created_at,
        }
    }
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Creating project in PostgreSQL", skip_all)]
    async fn create_project(&self, project: Project) -> Result<Project, ProjectStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query(
            r#"
                INSERT INTO projects
                    (id, project_name, client_name, description, owner_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(&project.project_name)
        .bind(&project.client_name)
        .bind(&project.description)
        .bind(project.owner.as_uuid())
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        for member in &project.team {
            sqlx::query(
                r#"
                    INSERT INTO project_members (project_id, user_id)
                    VALUES ($1, $2)
                "#,
            )
            .bind(project.id.as_uuid())
            .bind(member.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;
        }

        tx.commit().await.map_err(unexpected)?;
        Ok(project)
    }

    #[tracing::instrument(name = "Retrieving project from PostgreSQL", skip_all)]
    async fn get_project(&self, id: ProjectId) -> Result<Project, ProjectStoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
                SELECT id, project_name, client_name, description, owner_id, created_at, updated_at
                FROM projects
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(ProjectStoreError::ProjectNotFound)?;

        let team = self.load_team(id).await?;
        Ok(row.into_project(team))
    }

    #[tracing::instrument(name = "Listing projects from PostgreSQL", skip_all)]
    async fn list_projects_for(&self, user: UserId) -> Result<Vec<Project>, ProjectStoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
                SELECT id, project_name, client_name, description, owner_id, created_at, updated_at
                FROM projects p
                WHERE p.owner_id = $1
                   OR EXISTS (
                        SELECT 1 FROM project_members m
                        WHERE m.project_id = p.id AND m.user_id = $1
                   )
                ORDER BY p.created_at
            "#,
        )
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            let team = self.load_team(ProjectId::from(row.id)).await?;
            projects.push(row.into_project(team));
        }
        Ok(projects)
    }

    #[tracing::instrument(name = "Updating project in PostgreSQL", skip_all)]
    async fn update_project(&self, project: Project) -> Result<Project, ProjectStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE projects
                SET project_name = $1, client_name = $2, description = $3, updated_at = $4
                WHERE id = $5
            "#,
        )
        .bind(&project.project_name)
        .bind(&project.client_name)
        .bind(&project.description)
        .bind(project.updated_at)
        .bind(project.id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        Ok(project)
    }

    #[tracing::instrument(name = "Deleting project from PostgreSQL", skip_all)]
    async fn delete_project(&self, id: ProjectId) -> Result<(), ProjectStoreError> {
        // Tasks, history, and notes go with it through the foreign keys.
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Adding team member in PostgreSQL", skip_all)]
    async fn add_team_member(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> Result<(), ProjectStoreError> {
        let existing = self.get_project(project).await?;
        if existing.is_member(user) {
            return Err(ProjectStoreError::AlreadyTeamMember);
        }

        sqlx::query(
            r#"
                INSERT INTO project_members (project_id, user_id)
                VALUES ($1, $2)
            "#,
        )
        .bind(project.as_uuid())
        .bind(user.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // A lost race on the primary key still reads as a duplicate.
            if e.as_database_error()
                .is_some_and(|db| db.constraint().is_some())
            {
                ProjectStoreError::AlreadyTeamMember
            } else {
                unexpected(e)
            }
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Removing team member in PostgreSQL", skip_all)]
    async fn remove_team_member(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> Result<(), ProjectStoreError> {
        self.get_project(project).await?;

        let result = sqlx::query(
            r#"
                DELETE FROM project_members
                WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project.as_uuid())
        .bind(user.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::NotTeamMember);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Creating task in PostgreSQL", skip_all)]
    async fn create_task(&self, task: Task) -> Result<Task, ProjectStoreError> {
        let result = sqlx::query(
            r#"
                INSERT INTO tasks (id, project_id, name, description, status, created_at, updated_at)
                SELECT $1, id, $3, $4, $5, $6, $7
                FROM projects
                WHERE id = $2
            "#,
        )
        .bind(task.id.as_uuid())
        .bind(task.project_id.as_uuid())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        Ok(task)
    }

    #[tracing::instrument(name = "Retrieving task from PostgreSQL", skip_all)]
    async fn get_task(&self, project: ProjectId, task: TaskId) -> Result<Task, ProjectStoreError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
                SELECT id, project_id, name, description, status, created_at, updated_at
                FROM tasks
                WHERE id = $1 AND project_id = $2
            "#,
        )
        .bind(task.as_uuid())
        .bind(project.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(ProjectStoreError::TaskNotFound)?;

        self.task_from_row(row).await
    }

    #[tracing::instrument(name = "Listing tasks from PostgreSQL", skip_all)]
    async fn list_tasks(&self, project: ProjectId) -> Result<Vec<Task>, ProjectStoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
                SELECT id, project_id, name, description, status, created_at, updated_at
                FROM tasks
                WHERE project_id = $1
                ORDER BY created_at
            "#,
        )
        .bind(project.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in rows {
            tasks.push(self.task_from_row(row).await?);
        }
        Ok(tasks)
    }

    #[tracing::instrument(name = "Updating task in PostgreSQL", skip_all)]
    async fn update_task(&self, task: Task) -> Result<Task, ProjectStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let result = sqlx::query(
            r#"
                UPDATE tasks
                SET name = $1, description = $2, status = $3, updated_at = $4
                WHERE id = $5
            "#,
        )
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.updated_at)
        .bind(task.id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::TaskNotFound);
        }

        // The history is append-only from the caller's side; rewriting it
        // wholesale keeps the store oblivious to which entries are new.
        sqlx::query("DELETE FROM task_status_history WHERE task_id = $1")
            .bind(task.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        for change in &task.status_history {
            sqlx::query(
                r#"
                    INSERT INTO task_status_history (task_id, changed_by, status, changed_at)
                    VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(task.id.as_uuid())
            .bind(change.changed_by.as_uuid())
            .bind(change.status.as_str())
            .bind(change.changed_at)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;
        }

        tx.commit().await.map_err(unexpected)?;
        Ok(task)
    }

    #[tracing::instrument(name = "Deleting task from PostgreSQL", skip_all)]
    async fn delete_task(
        &self,
        project: ProjectId,
        task: TaskId,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(task.as_uuid())
            .bind(project.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::TaskNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Adding note in PostgreSQL", skip_all)]
    async fn add_note(&self, note: Note) -> Result<Note, ProjectStoreError> {
        let result = sqlx::query(
            r#"
                INSERT INTO notes (id, task_id, content, created_by, created_at)
                SELECT $1, id, $3, $4, $5
                FROM tasks
                WHERE id = $2
            "#,
        )
        .bind(note.id.as_uuid())
        .bind(note.task_id.as_uuid())
        .bind(&note.content)
        .bind(note.created_by.as_uuid())
        .bind(note.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::TaskNotFound);
        }
        Ok(note)
    }

    #[tracing::instrument(name = "Listing notes from PostgreSQL", skip_all)]
    async fn list_notes(&self, task: TaskId) -> Result<Vec<Note>, ProjectStoreError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
                SELECT id, task_id, content, created_by, created_at
                FROM notes
                WHERE task_id = $1
                ORDER BY created_at
            "#,
        )
        .bind(task.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    #[tracing::instrument(name = "Retrieving note from PostgreSQL", skip_all)]
    async fn get_note(&self, task: TaskId, note: NoteId) -> Result<Note, ProjectStoreError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
                SELECT id, task_id, content, created_by, created_at
                FROM notes
                WHERE id = $1 AND task_id = $2
            "#,
        )
        .bind(note.as_uuid())
        .bind(task.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(ProjectStoreError::NoteNotFound)?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Deleting note from PostgreSQL", skip_all)]
    async fn delete_note(&self, task: TaskId, note: NoteId) -> Result<(), ProjectStoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND task_id = $2")
            .bind(note.as_uuid())
            .bind(task.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::NoteNotFound);
        }
        Ok(())
    }
}

use taskhive_core::{
    Note, NoteId, ProjectId, ProjectStore, ProjectStoreError, TaskId, UserId,
};

use crate::access::{AccessError, AccessLevel, resolve_project};

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    #[error("{0}")]
    Access(#[from] AccessError),
    /// Only the note's author may delete it.
    #[error("Invalid action")]
    NotNoteAuthor,
    #[error("Project store error: {0}")]
    Store(#[from] ProjectStoreError),
}

/// Notes on a task. Any team member may write and read them; deletion is
/// reserved for the note's author.
pub struct NotesUseCase<'a, P>
where
    P: ProjectStore + ?Sized,
{
    project_store: &'a P,
}

impl<'a, P> NotesUseCase<'a, P>
where
    P: ProjectStore + ?Sized,
{
    pub fn new(project_store: &'a P) -> Self {
        Self { project_store }
    }

    #[tracing::instrument(name = "NotesUseCase::create", skip(self, content))]
    pub async fn create(
        &self,
        requester: UserId,
        project_id: ProjectId,
        task_id: TaskId,
        content: String,
    ) -> Result<Note, NotesError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;
        // Validates the task belongs to this project.
        self.project_store.get_task(project_id, task_id).await?;

        let note = Note::new(task_id, content, requester);
        Ok(self.project_store.add_note(note).await?)
    }

    #[tracing::instrument(name = "NotesUseCase::list", skip(self))]
    pub async fn list(
        &self,
        requester: UserId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<Vec<Note>, NotesError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;
        self.project_store.get_task(project_id, task_id).await?;

        Ok(self.project_store.list_notes(task_id).await?)
    }

    #[tracing::instrument(name = "NotesUseCase::delete", skip(self))]
    pub async fn delete(
        &self,
        requester: UserId,
        project_id: ProjectId,
        task_id: TaskId,
        note_id: NoteId,
    ) -> Result<(), NotesError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;
        self.project_store.get_task(project_id, task_id).await?;

        let note = self.project_store.get_note(task_id, note_id).await?;
        if note.created_by != requester {
            return Err(NotesError::NotNoteAuthor);
        }

        Ok(self.project_store.delete_note(task_id, note_id).await?)
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use taskhive_core::{
    Note, NoteId, Project, ProjectId, ProjectStore, ProjectStoreError, Task, TaskId, UserId,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct Aggregate {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    notes: HashMap<NoteId, Note>,
}

/// In-memory project aggregate store: projects with their team lists,
/// tasks addressed through their owning project, and notes per task.
/// Deleting a project cascades to its tasks and their notes.
#[derive(Default, Clone)]
pub struct HashMapProjectStore {
    state: Arc<RwLock<Aggregate>>,
}

impl HashMapProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProjectStore for HashMapProjectStore {
    async fn create_project(&self, project: Project) -> Result<Project, ProjectStoreError> {
        let mut state = self.state.write().await;
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, ProjectStoreError> {
        self.state
            .read()
            .await
            .projects
            .get(&id)
            .cloned()
            .ok_or(ProjectStoreError::ProjectNotFound)
    }

    async fn list_projects_for(&self, user: UserId) -> Result<Vec<Project>, ProjectStoreError> {
        let state = self.state.read().await;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.is_member(user))
            .cloned()
            .collect();
        projects.sort_by_key(|project| project.created_at);
        Ok(projects)
    }

    async fn update_project(&self, project: Project) -> Result<Project, ProjectStoreError> {
        let mut state = self.state.write().await;
        if !state.projects.contains_key(&project.id) {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), ProjectStoreError> {
        let mut state = self.state.write().await;
        state
            .projects
            .remove(&id)
            .ok_or(ProjectStoreError::ProjectNotFound)?;

        let task_ids: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|task| task.project_id == id)
            .map(|task| task.id)
            .collect();
        for task_id in task_ids {
            state.tasks.remove(&task_id);
            state.notes.retain(|_, note| note.task_id != task_id);
        }
        Ok(())
    }

    async fn add_team_member(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> Result<(), ProjectStoreError> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(&project)
            .ok_or(ProjectStoreError::ProjectNotFound)?;
        // The owner also counts: the team list never contains the owner.
        if project.is_member(user) {
            return Err(ProjectStoreError::AlreadyTeamMember);
        }
        project.team.push(user);
        Ok(())
    }

    async fn remove_team_member(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> Result<(), ProjectStoreError> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(&project)
            .ok_or(ProjectStoreError::ProjectNotFound)?;
        if !project.team.contains(&user) {
            return Err(ProjectStoreError::NotTeamMember);
        }
        project.team.retain(|member| *member != user);
        Ok(())
    }

    async fn create_task(&self, task: Task) -> Result<Task, ProjectStoreError> {
        let mut state = self.state.write().await;
        if !state.projects.contains_key(&task.project_id) {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, project: ProjectId, task: TaskId) -> Result<Task, ProjectStoreError> {
        self.state
            .read()
            .await
            .tasks
            .get(&task)
            .filter(|t| t.project_id == project)
            .cloned()
            .ok_or(ProjectStoreError::TaskNotFound)
    }

    async fn list_tasks(&self, project: ProjectId) -> Result<Vec<Task>, ProjectStoreError> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.project_id == project)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.created_at);
        Ok(tasks)
    }

    async fn update_task(&self, task: Task) -> Result<Task, ProjectStoreError> {
        let mut state = self.state.write().await;
        if !state.tasks.contains_key(&task.id) {
            return Err(ProjectStoreError::TaskNotFound);
        }
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete_task(
        &self,
        project: ProjectId,
        task: TaskId,
    ) -> Result<(), ProjectStoreError> {
        let mut state = self.state.write().await;
        match state.tasks.get(&task) {
            Some(t) if t.project_id == project => {}
            _ => return Err(ProjectStoreError::TaskNotFound),
        }
        state.tasks.remove(&task);
        state.notes.retain(|_, note| note.task_id != task);
        Ok(())
    }

    async fn add_note(&self, note: Note) -> Result<Note, ProjectStoreError> {
        let mut state = self.state.write().await;
        if !state.tasks.contains_key(&note.task_id) {
            return Err(ProjectStoreError::TaskNotFound);
        }
        state.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_notes(&self, task: TaskId) -> Result<Vec<Note>, ProjectStoreError> {
        let state = self.state.read().await;
        let mut notes: Vec<Note> = state
            .notes
            .values()
            .filter(|note| note.task_id == task)
            .cloned()
            .collect();
        notes.sort_by_key(|note| note.created_at);
        Ok(notes)
    }

    async fn get_note(&self, task: TaskId, note: NoteId) -> Result<Note, ProjectStoreError> {
        self.state
            .read()
            .await
            .notes
            .get(&note)
            .filter(|n| n.task_id == task)
            .cloned()
            .ok_or(ProjectStoreError::NoteNotFound)
    }

    async fn delete_note(&self, task: TaskId, note: NoteId) -> Result<(), ProjectStoreError> {
        let mut state = self.state.write().await;
        match state.notes.get(&note) {
            Some(n) if n.task_id == task => {}
            _ => return Err(ProjectStoreError::NoteNotFound),
        }
        state.notes.remove(&note);
        Ok(())
    }
}

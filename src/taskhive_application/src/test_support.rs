//! Hand-written in-memory fakes for the port traits, shared by the
//! use-case unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use taskhive_core::{
    AccountNotifier, Email, NewUser, Note, NoteId, Password, Project, ProjectId, ProjectStore,
    ProjectStoreError, Task, TaskId, TokenCode, TokenStore, TokenStoreError, User, UserId,
    UserName, UserStore, UserStoreError, VerificationToken,
};
use tokio::sync::RwLock;

/// User store keeping plaintext passwords; verification is a string
/// compare, which is all the use-case tests need.
#[derive(Default, Clone)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, (User, String)>>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a confirmed or unconfirmed user directly, bypassing
    /// registration.
    pub async fn seed(&self, name: &str, email: &str, password: &str, confirmed: bool) -> User {
        let user = User::new(
            UserId::new(),
            UserName::parse(name).unwrap(),
            Email::parse(email).unwrap(),
            confirmed,
        );
        self.users
            .write()
            .await
            .insert(user.id(), (user.clone(), password.to_string()));
        user
    }

    pub async fn stored_password(&self, id: UserId) -> Option<String> {
        self.users.read().await.get(&id).map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|(u, _)| u.email() == &new_user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let user = User::new(new_user.id, new_user.name, new_user.email, false);
        let password = new_user.password.as_ref().expose_secret().clone();
        users.insert(user.id(), (user.clone(), password));
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|(u, _)| u.email() == email)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn verify_password(
        &self,
        id: UserId,
        candidate: &Password,
    ) -> Result<(), UserStoreError> {
        let users = self.users.read().await;
        let (_, stored) = users.get(&id).ok_or(UserStoreError::UserNotFound)?;
        if stored != candidate.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(())
    }

    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (_, stored) = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        *stored = new_password.as_ref().expose_secret().clone();
        Ok(())
    }

    async fn confirm_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (user, _) = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        *user = User::new(user.id(), user.name().clone(), user.email().clone(), true);
        Ok(())
    }

    async fn update_profile(
        &self,
        id: UserId,
        name: UserName,
        email: Email,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|(u, _)| u.email() == &email && u.id() != id)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let (user, _) = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        *user = User::new(id, name, email, user.is_confirmed());
        Ok(user.clone())
    }
}

#[derive(Default, Clone)]
pub struct MockTokenStore {
    tokens: Arc<RwLock<HashMap<TokenCode, VerificationToken>>>,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest_token_for(&self, user: UserId) -> Option<VerificationToken> {
        self.tokens
            .read()
            .await
            .values()
            .filter(|t| t.user_id == user)
            .max_by_key(|t| t.created_at)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn store_token(&self, token: VerificationToken) -> Result<(), TokenStoreError> {
        self.tokens.write().await.insert(token.code.clone(), token);
        Ok(())
    }

    async fn find_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError> {
        self.tokens
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or(TokenStoreError::TokenNotFound)
    }

    async fn consume_token(&self, code: &TokenCode) -> Result<VerificationToken, TokenStoreError> {
        self.tokens
            .write()
            .await
            .remove(code)
            .ok_or(TokenStoreError::TokenNotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Confirmation { email: Email, code: TokenCode },
    PasswordReset { email: Email, code: TokenCode },
}

/// Notifier that records every message instead of sending it.
#[derive(Default, Clone)]
pub struct MockNotifier {
    pub sent: Arc<RwLock<Vec<SentMessage>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl AccountNotifier for MockNotifier {
    async fn send_confirmation_email(
        &self,
        recipient: &Email,
        _name: &UserName,
        code: &TokenCode,
    ) -> Result<(), String> {
        if self.fail {
            return Err("email transport unavailable".to_string());
        }
        self.sent.write().await.push(SentMessage::Confirmation {
            email: recipient.clone(),
            code: code.clone(),
        });
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        _name: &UserName,
        code: &TokenCode,
    ) -> Result<(), String> {
        if self.fail {
            return Err("email transport unavailable".to_string());
        }
        self.sent.write().await.push(SentMessage::PasswordReset {
            email: recipient.clone(),
            code: code.clone(),
        });
        Ok(())
    }
}

#[derive(Default)]
struct ProjectState {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    notes: HashMap<NoteId, Note>,
}

/// Project aggregate store with the same semantics as the production
/// adapters: tasks addressed through their project, cascading delete,
/// duplicate/absence checks on the team list.
#[derive(Default, Clone)]
pub struct MockProjectStore {
    state: Arc<RwLock<ProjectState>>,
}

impl MockProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MockProjectStore {
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
        Ok(self
            .state
            .read()
            .await
            .projects
            .values()
            .filter(|p| p.is_member(user))
            .cloned()
            .collect())
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
            .filter(|t| t.project_id == id)
            .map(|t| t.id)
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
        Ok(self
            .state
            .read()
            .await
            .tasks
            .values()
            .filter(|t| t.project_id == project)
            .cloned()
            .collect())
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
        Ok(self
            .state
            .read()
            .await
            .notes
            .values()
            .filter(|n| n.task_id == task)
            .cloned()
            .collect())
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

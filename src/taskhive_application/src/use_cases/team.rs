use taskhive_core::{
    Email, ProjectId, ProjectStore, ProjectStoreError, User, UserId, UserStore, UserStoreError,
};

use crate::access::{AccessError, AccessLevel, resolve_project};

#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("{0}")]
    Access(#[from] AccessError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Project store error: {0}")]
    Store(#[from] ProjectStoreError),
}

/// Team membership on a project: find candidates by e-mail, list the
/// current team, add and remove members. Membership changes are owner
/// only.
pub struct TeamUseCase<'a, P, U>
where
    P: ProjectStore + ?Sized,
    U: UserStore + ?Sized,
{
    project_store: &'a P,
    user_store: &'a U,
}

impl<'a, P, U> TeamUseCase<'a, P, U>
where
    P: ProjectStore + ?Sized,
    U: UserStore + ?Sized,
{
    pub fn new(project_store: &'a P, user_store: &'a U) -> Self {
        Self {
            project_store,
            user_store,
        }
    }

    #[tracing::instrument(name = "TeamUseCase::find_member_by_email", skip(self))]
    pub async fn find_member_by_email(
        &self,
        requester: UserId,
        project_id: ProjectId,
        email: Email,
    ) -> Result<User, TeamError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;
        Ok(self.user_store.get_user_by_email(&email).await?)
    }

    #[tracing::instrument(name = "TeamUseCase::list_team", skip(self))]
    pub async fn list_team(
        &self,
        requester: UserId,
        project_id: ProjectId,
    ) -> Result<Vec<User>, TeamError> {
        let project = resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Member,
        )
        .await?;

        let mut team = Vec::with_capacity(project.team.len());
        for member_id in project.team {
            match self.user_store.get_user(member_id).await {
                Ok(user) => team.push(user),
                // A dangling reference only drops that entry from the
                // listing; the membership itself stays intact.
                Err(UserStoreError::UserNotFound) => {
                    tracing::warn!(%member_id, "team member no longer resolves to a user");
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(team)
    }

    #[tracing::instrument(name = "TeamUseCase::add_member", skip(self))]
    pub async fn add_member(
        &self,
        requester: UserId,
        project_id: ProjectId,
        member_id: UserId,
    ) -> Result<(), TeamError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Owner,
        )
        .await?;

        // The candidate must be a real account before touching the list.
        self.user_store.get_user(member_id).await?;

        Ok(self
            .project_store
            .add_team_member(project_id, member_id)
            .await?)
    }

    #[tracing::instrument(name = "TeamUseCase::remove_member", skip(self))]
    pub async fn remove_member(
        &self,
        requester: UserId,
        project_id: ProjectId,
        member_id: UserId,
    ) -> Result<(), TeamError> {
        resolve_project(
            self.project_store,
            project_id,
            requester,
            AccessLevel::Owner,
        )
        .await?;

        Ok(self
            .project_store
            .remove_team_member(project_id, member_id)
            .await?)
    }
}

use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::{
        media::{MediaForm, MediaKind},
        team_member::{NewTeamMember, TeamMember, TeamMemberChanges},
    },
    errors::AppError,
    repositories::team::TeamRepository,
    use_cases::media::MediaLifecycle,
};

pub struct TeamHandler<R>
where
    R: TeamRepository,
{
    pub team_repo: R,
    pub media: MediaLifecycle,
}

impl<R> TeamHandler<R>
where
    R: TeamRepository,
{
    pub fn new(team_repo: R, media: MediaLifecycle) -> Self {
        TeamHandler { team_repo, media }
    }

    pub async fn list(&self) -> Result<Vec<TeamMember>, AppError> {
        self.team_repo.list_members().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<TeamMember, AppError> {
        self.team_repo.get_member_by_id(id).await
    }

    #[instrument(skip(self, form))]
    pub async fn create(&self, form: MediaForm) -> Result<TeamMember, AppError> {
        let member = NewTeamMember::from_form(&form.fields)?;
        let staged = self.media.stage_new(MediaKind::Team, form.image).await?;

        let written = self.team_repo.create_member(&member, staged.value().unwrap_or_default()).await;
        let created = self.media.complete(&staged, written).await?;

        tracing::info!(member_id = %created.id, "Team member created");
        Ok(created)
    }

    #[instrument(skip(self, form))]
    pub async fn update(&self, id: &Uuid, form: MediaForm) -> Result<TeamMember, AppError> {
        // Unknown ids fail here, before anything is uploaded.
        self.team_repo.get_member_by_id(id).await?;
        let changes = TeamMemberChanges::from_form(&form.fields)?;
        let staged = self.media.stage_replacement(MediaKind::Team, form.image).await?;

        let written = self.team_repo.update_member(id, &changes, staged.value()).await;
        self.media.complete_replacement(&staged, written).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let removed = self.team_repo.delete_member(id).await?;
        self.media.release(&removed.image).await;

        tracing::info!(member_id = %removed.id, "Team member deleted");
        Ok(())
    }
}

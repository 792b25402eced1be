use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::membership::{Membership, NewMembership, SubmissionResponse, UpdateMembership},
    errors::AppError,
    repositories::membership::MembershipRepository,
};

pub struct MembershipHandler<R>
where
    R: MembershipRepository,
{
    pub membership_repo: R,
}

impl<R> MembershipHandler<R>
where
    R: MembershipRepository,
{
    pub fn new(membership_repo: R) -> Self {
        MembershipHandler { membership_repo }
    }

    /// Stores a public application with status `pending`.
    pub async fn submit(&self, request: NewMembership) -> Result<SubmissionResponse, AppError> {
        let application = request.sanitized();
        application.validate()?;

        let created = self.membership_repo.create_membership(&application).await?;
        tracing::info!(membership_id = %created.id, "Membership application received");

        Ok(SubmissionResponse {
            id: created.id,
            message: "Membership application submitted successfully".to_string(),
        })
    }

    pub async fn list(&self) -> Result<Vec<Membership>, AppError> {
        self.membership_repo.list_memberships().await
    }

    pub async fn update(&self, id: &Uuid, changes: UpdateMembership) -> Result<Membership, AppError> {
        changes.validate()?;
        self.membership_repo.update_membership(id, &changes).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.membership_repo.delete_membership(id).await
    }
}

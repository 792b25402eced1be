use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        contact::{ContactMessage, NewContactMessage, UpdateContactMessage},
        membership::SubmissionResponse,
    },
    errors::AppError,
    repositories::contact::ContactRepository,
};

pub struct ContactHandler<R>
where
    R: ContactRepository,
{
    pub contact_repo: R,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository,
{
    pub fn new(contact_repo: R) -> Self {
        ContactHandler { contact_repo }
    }

    pub async fn submit(&self, request: NewContactMessage) -> Result<SubmissionResponse, AppError> {
        let message = request.sanitized();
        message.validate()?;

        let created = self.contact_repo.create_message(&message).await?;
        tracing::info!(message_id = %created.id, "Contact message received");

        Ok(SubmissionResponse {
            id: created.id,
            message: "Message sent successfully".to_string(),
        })
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.contact_repo.list_messages().await
    }

    pub async fn update(&self, id: &Uuid, changes: UpdateContactMessage) -> Result<ContactMessage, AppError> {
        changes.validate()?;
        self.contact_repo.update_message(id, &changes).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.contact_repo.delete_message(id).await
    }
}

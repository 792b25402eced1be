use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::{
        event::{Event, EventChanges, NewEvent},
        media::{MediaForm, MediaKind},
    },
    errors::AppError,
    repositories::event::EventRepository,
    use_cases::media::MediaLifecycle,
};

pub struct EventHandler<R>
where
    R: EventRepository,
{
    pub event_repo: R,
    pub media: MediaLifecycle,
}

impl<R> EventHandler<R>
where
    R: EventRepository,
{
    pub fn new(event_repo: R, media: MediaLifecycle) -> Self {
        EventHandler { event_repo, media }
    }

    pub async fn list(&self) -> Result<Vec<Event>, AppError> {
        self.event_repo.list_events().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Event, AppError> {
        self.event_repo.get_event_by_id(id).await
    }

    #[instrument(skip(self, form))]
    pub async fn create(&self, form: MediaForm) -> Result<Event, AppError> {
        let event = NewEvent::from_form(&form.fields)?;
        let staged = self.media.stage_new(MediaKind::Events, form.image).await?;

        let written = self.event_repo.create_event(&event, staged.value().unwrap_or_default()).await;
        let created = self.media.complete(&staged, written).await?;

        tracing::info!(event_id = %created.id, "Event created");
        Ok(created)
    }

    #[instrument(skip(self, form))]
    pub async fn update(&self, id: &Uuid, form: MediaForm) -> Result<Event, AppError> {
        // Unknown ids fail here, before anything is uploaded.
        self.event_repo.get_event_by_id(id).await?;
        let changes = EventChanges::from_form(&form.fields)?;
        let staged = self.media.stage_replacement(MediaKind::Events, form.image).await?;

        let written = self.event_repo.update_event(id, &changes, staged.value()).await;
        self.media.complete_replacement(&staged, written).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let removed = self.event_repo.delete_event(id).await?;
        self.media.release(&removed.image).await;

        tracing::info!(event_id = %removed.id, "Event deleted");
        Ok(())
    }
}

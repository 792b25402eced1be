use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::{
        gallery::{GalleryDetails, GalleryItem},
        media::{MediaForm, MediaKind},
    },
    errors::AppError,
    repositories::gallery::GalleryRepository,
    use_cases::media::MediaLifecycle,
};

/// Gallery items always carry an image; creation without one is rejected
/// by the upload gate.
pub struct GalleryHandler<R>
where
    R: GalleryRepository,
{
    pub gallery_repo: R,
    pub media: MediaLifecycle,
}

impl<R> GalleryHandler<R>
where
    R: GalleryRepository,
{
    pub fn new(gallery_repo: R, media: MediaLifecycle) -> Self {
        GalleryHandler { gallery_repo, media }
    }

    pub async fn list(&self) -> Result<Vec<GalleryItem>, AppError> {
        self.gallery_repo.list_items().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<GalleryItem, AppError> {
        self.gallery_repo.get_item_by_id(id).await
    }

    #[instrument(skip(self, form))]
    pub async fn create(&self, form: MediaForm) -> Result<GalleryItem, AppError> {
        let details = GalleryDetails::from_form(&form.fields)?;
        let staged = self.media.stage_new(MediaKind::Gallery, form.image).await?;

        let written = self.gallery_repo.create_item(&details, staged.value().unwrap_or_default()).await;
        let created = self.media.complete(&staged, written).await?;

        tracing::info!(item_id = %created.id, "Gallery image created");
        Ok(created)
    }

    #[instrument(skip(self, form))]
    pub async fn update(&self, id: &Uuid, form: MediaForm) -> Result<GalleryItem, AppError> {
        // Unknown ids fail here, before anything is uploaded.
        self.gallery_repo.get_item_by_id(id).await?;
        let details = GalleryDetails::from_form(&form.fields)?;
        let staged = self.media.stage_replacement(MediaKind::Gallery, form.image).await?;

        let written = self.gallery_repo.update_item(id, &details, staged.value()).await;
        self.media.complete_replacement(&staged, written).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let removed = self.gallery_repo.delete_item(id).await?;
        self.media.release(&removed.image).await;

        tracing::info!(item_id = %removed.id, "Gallery image deleted");
        Ok(())
    }
}

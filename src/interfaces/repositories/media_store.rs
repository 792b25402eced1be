use async_trait::async_trait;

use crate::{entities::media::UploadedImage, errors::MediaError};

/// Remote object store holding uploaded image bytes.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// False when credentials are missing; uploads then fail without a network call.
    fn is_configured(&self) -> bool;

    /// Whether `url` points at a file this store created and may delete.
    fn owns(&self, url: &str) -> bool;

    /// Uploads `image` under `folder` and returns its public URL.
    async fn store(&self, image: &UploadedImage, folder: &str) -> Result<String, MediaError>;

    /// Deletes the file behind `url`. An already missing file is reported as
    /// [`MediaError::NotFound`].
    async fn remove(&self, url: &str) -> Result<(), MediaError>;
}

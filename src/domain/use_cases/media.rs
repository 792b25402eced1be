//! Keeps stored image references and the remote store consistent across
//! creates, edits and deletes.
//!
//! A mutation goes through three steps:
//! 1. [`MediaLifecycle::stage_new`] or [`MediaLifecycle::stage_replacement`] runs the upload gate and uploads a file if
//!    one was sent. Nothing is persisted yet.
//! 2. The caller writes the record with [`StagedImage::value`].
//! 3. [`MediaLifecycle::complete`] (creates) or [`MediaLifecycle::complete_replacement`]
//!    (edits) looks at the write result. On failure the file uploaded in step 1
//!    is deleted; on a successful edit the image the record held right before
//!    the write is deleted if the new value replaced it.
//!
//! Remote deletes never fail the mutation; errors are logged.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    entities::media::{ImageInput, MediaKind, Replaced},
    errors::{AppError, MediaError},
    repositories::media_store::MediaStore,
    use_cases::upload_gate::{evaluate, GateOutcome, Intent, UploadLimits},
};

/// Knobs for the lifecycle, read from `MediaSettings`.
#[derive(Debug, Clone)]
pub struct MediaPolicy {
    pub folder_root: String,
    pub limits: UploadLimits,
    pub purge_replaced_on_url_change: bool,
}

/// An image value chosen for a pending write.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedImage {
    /// Value for the record's `image` column; `None` keeps the stored one.
    value: Option<String>,
    /// Set when `value` was uploaded by this request.
    uploaded: bool,
    /// Whether the previously stored image is dropped once the write succeeds.
    replaces_previous: bool,
}

impl StagedImage {
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn uploaded(&self) -> bool {
        self.uploaded
    }

    pub fn replaces_previous(&self) -> bool {
        self.replaces_previous
    }
}

#[derive(Clone)]
pub struct MediaLifecycle {
    store: Arc<dyn MediaStore>,
    policy: MediaPolicy,
}

impl MediaLifecycle {
    pub fn new(store: Arc<dyn MediaStore>, policy: MediaPolicy) -> Self {
        MediaLifecycle { store, policy }
    }

    pub fn store(&self) -> &Arc<dyn MediaStore> {
        &self.store
    }

    fn folder(&self, kind: MediaKind) -> String {
        let root = self.policy.folder_root.trim_matches('/');
        if root.is_empty() {
            kind.folder().to_string()
        } else {
            format!("{}/{}", root, kind.folder())
        }
    }

    /// Image for a record that does not exist yet. The value is always set.
    pub async fn stage_new(&self, kind: MediaKind, input: ImageInput) -> Result<StagedImage, AppError> {
        self.stage(kind, input, Intent::Create).await
    }

    /// Image for an edit. The current value is not needed here: the write
    /// reports what it replaced.
    pub async fn stage_replacement(&self, kind: MediaKind, input: ImageInput) -> Result<StagedImage, AppError> {
        self.stage(kind, input, Intent::Update).await
    }

    async fn stage(&self, kind: MediaKind, input: ImageInput, intent: Intent) -> Result<StagedImage, AppError> {
        let outcome = evaluate(input, intent, kind.requirement(), self.policy.limits)?;

        let staged = match outcome {
            GateOutcome::Upload(file) => {
                if !self.store.is_configured() {
                    return Err(MediaError::NotConfigured.into());
                }
                let folder = self.folder(kind);
                let url = self.store.store(&file, &folder).await.map_err(|e| {
                    warn!(%kind, error = %e, "Image upload failed");
                    AppError::from(e)
                })?;
                info!(%kind, %url, "Image uploaded");

                StagedImage {
                    value: Some(url),
                    uploaded: true,
                    replaces_previous: true,
                }
            }
            // Known gap: without the purge flag a stored file swapped for a
            // plain URL stays in the remote store.
            GateOutcome::UseUrl(url) => StagedImage {
                value: Some(url),
                uploaded: false,
                replaces_previous: self.policy.purge_replaced_on_url_change,
            },
            GateOutcome::Empty => StagedImage {
                value: Some(String::new()),
                uploaded: false,
                replaces_previous: false,
            },
            GateOutcome::KeepExisting => StagedImage {
                value: None,
                uploaded: false,
                replaces_previous: false,
            },
        };

        Ok(staged)
    }

    /// The record write failed: drop the file this request uploaded.
    pub async fn discard(&self, staged: &StagedImage) {
        if let (true, Some(url)) = (staged.uploaded, staged.value()) {
            warn!(%url, "Record write failed, removing freshly uploaded image");
            self.release(url).await;
        }
    }

    /// Finishes a create: discards the upload if the write failed and passes
    /// the write result through.
    pub async fn complete<T>(&self, staged: &StagedImage, written: Result<T, AppError>) -> Result<T, AppError> {
        if written.is_err() {
            self.discard(staged).await;
        }
        written
    }

    /// Finishes an edit. On success the image the record held just before the
    /// write is released when the staged value replaced it; on failure the
    /// upload is discarded.
    pub async fn complete_replacement<T>(
        &self,
        staged: &StagedImage,
        written: Result<Replaced<T>, AppError>,
    ) -> Result<T, AppError> {
        match written {
            Ok(Replaced { record, previous_image }) => {
                let superseded = staged.replaces_previous
                    && staged.value().is_some_and(|value| value != previous_image);
                if superseded {
                    self.release(&previous_image).await;
                }
                Ok(record)
            }
            Err(e) => {
                self.discard(staged).await;
                Err(e)
            }
        }
    }

    /// Best-effort delete of a stored image. URLs the store does not own are
    /// left alone; a file that is already gone counts as deleted.
    pub async fn release(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() || !self.store.owns(url) {
            debug!(%url, "Skipping remote delete for unowned image");
            return;
        }

        match self.store.remove(url).await {
            Ok(()) => info!(%url, "Image removed from store"),
            Err(MediaError::NotFound(_)) => debug!(%url, "Image already absent from store"),
            Err(e) => warn!(%url, error = %e, "Failed to remove image from store, leaving it behind"),
        }
    }
}

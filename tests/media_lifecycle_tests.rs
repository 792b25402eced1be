mod test_utils;

use std::sync::Arc;

use club_backend::{
    entities::media::{ImageInput, MediaKind, Replaced},
    errors::{AppError, MediaError},
    use_cases::media::{MediaLifecycle, MediaPolicy},
};
use mockall::predicate::always;
use test_utils::*;

const OLD_URL: &str = "https://res.cloudinary.com/demo/image/upload/v1/real-estate-club/events/old.jpg";
const NEW_URL: &str = "https://res.cloudinary.com/demo/image/upload/v2/real-estate-club/events/new.jpg";
const RACED_URL: &str = "https://res.cloudinary.com/demo/image/upload/v3/real-estate-club/events/raced.jpg";

fn owned(url: &str) -> bool {
    url.starts_with(STORE_PREFIX)
}

fn replaced(previous: &str) -> Result<Replaced<&'static str>, AppError> {
    Ok(Replaced {
        record: "record",
        previous_image: previous.to_string(),
    })
}

#[tokio::test]
async fn upload_goes_to_kind_folder_and_replaces_previous() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(true);
    store
        .expect_store()
        .withf(|_, folder: &str| folder == "real-estate-club/events")
        .times(1)
        .returning(|_, _| Ok(NEW_URL.to_string()));
    store.expect_remove().never();

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_replacement(MediaKind::Events, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap();

    assert_eq!(staged.value(), Some(NEW_URL));
    assert!(staged.uploaded());
    assert!(staged.replaces_previous());
}

#[tokio::test]
async fn successful_edit_removes_previous_image_exactly_once() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(true);
    store.expect_owns().returning(owned);
    store.expect_store().times(1).returning(|_, _| Ok(NEW_URL.to_string()));
    store
        .expect_remove()
        .withf(|url: &str| url == OLD_URL)
        .times(1)
        .returning(|_| Ok(()));

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_replacement(MediaKind::Team, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap();

    let record = media.complete_replacement(&staged, replaced(OLD_URL)).await.unwrap();
    assert_eq!(record, "record");
}

#[tokio::test]
async fn removes_the_image_the_write_actually_replaced() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(true);
    store.expect_owns().returning(owned);
    store.expect_store().times(1).returning(|_, _| Ok(NEW_URL.to_string()));
    store
        .expect_remove()
        .withf(|url: &str| url == RACED_URL)
        .times(1)
        .returning(|_| Ok(()));

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_replacement(MediaKind::Events, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap();

    // Another edit landed between staging and this write.
    media.complete_replacement(&staged, replaced(RACED_URL)).await.unwrap();
}

#[tokio::test]
async fn failed_write_removes_fresh_upload_and_keeps_previous() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(true);
    store.expect_owns().returning(owned);
    store.expect_store().times(1).returning(|_, _| Ok(NEW_URL.to_string()));
    store
        .expect_remove()
        .withf(|url: &str| url == NEW_URL)
        .times(1)
        .returning(|_| Ok(()));

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_replacement(MediaKind::Gallery, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap();

    let result = media
        .complete_replacement::<()>(&staged, Err(AppError::DatabaseError("write failed".into())))
        .await;

    assert!(matches!(result, Err(AppError::DatabaseError(_))));
}

#[tokio::test]
async fn failed_create_removes_fresh_upload() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(true);
    store.expect_owns().returning(owned);
    store.expect_store().times(1).returning(|_, _| Ok(NEW_URL.to_string()));
    store
        .expect_remove()
        .withf(|url: &str| url == NEW_URL)
        .times(1)
        .returning(|_| Ok(()));

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_new(MediaKind::Events, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap();

    let result = media
        .complete(&staged, Err::<(), _>(AppError::DatabaseError("write failed".into())))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unconfigured_store_fails_fast_without_upload() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(false);
    store.expect_store().never();
    store.expect_remove().never();

    let media = lifecycle_with(Arc::new(store));
    let err = media
        .stage_new(MediaKind::Events, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UploadError(msg) if msg.contains("not configured")));
}

#[tokio::test]
async fn upload_failure_surfaces_as_upload_error() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(true);
    store
        .expect_store()
        .returning(|_, _| Err(MediaError::Timeout(20)));
    store.expect_remove().never();

    let media = lifecycle_with(Arc::new(store));
    let err = media
        .stage_replacement(MediaKind::Events, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UploadError(msg) if msg.contains("20s")));
}

#[tokio::test]
async fn external_urls_are_never_removed() {
    let mut store = MockStore::new();
    store.expect_is_configured().return_const(true);
    store.expect_owns().returning(owned);
    store.expect_store().times(1).returning(|_, _| Ok(NEW_URL.to_string()));
    store.expect_remove().never();

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_replacement(MediaKind::Events, ImageInput::from_file(jpeg_upload()))
        .await
        .unwrap();

    media.complete_replacement(&staged, replaced(EXTERNAL_URL)).await.unwrap();
    media.complete_replacement(&staged, replaced("")).await.unwrap();
    media.release(EXTERNAL_URL).await;
}

#[tokio::test]
async fn url_replacement_keeps_old_file_by_default() {
    let mut store = MockStore::new();
    store.expect_owns().returning(owned);
    store.expect_store().never();
    store.expect_remove().never();

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_replacement(MediaKind::Events, ImageInput::from_url(EXTERNAL_URL))
        .await
        .unwrap();

    assert_eq!(staged.value(), Some(EXTERNAL_URL));
    assert!(!staged.uploaded());
    assert!(!staged.replaces_previous());
    media.complete_replacement(&staged, replaced(OLD_URL)).await.unwrap();
}

#[tokio::test]
async fn url_replacement_purges_old_file_when_enabled() {
    let mut store = MockStore::new();
    store.expect_owns().returning(owned);
    store.expect_store().never();
    store
        .expect_remove()
        .withf(|url: &str| url == OLD_URL)
        .times(1)
        .returning(|_| Ok(()));

    let policy = MediaPolicy {
        purge_replaced_on_url_change: true,
        ..test_policy()
    };
    let media = MediaLifecycle::new(Arc::new(store), policy);

    let staged = media
        .stage_replacement(MediaKind::Events, ImageInput::from_url(EXTERNAL_URL))
        .await
        .unwrap();
    media.complete_replacement(&staged, replaced(OLD_URL)).await.unwrap();
}

#[tokio::test]
async fn resubmitting_the_stored_url_removes_nothing() {
    let mut store = MockStore::new();
    store.expect_owns().returning(owned);
    store.expect_remove().never();

    let policy = MediaPolicy {
        purge_replaced_on_url_change: true,
        ..test_policy()
    };
    let media = MediaLifecycle::new(Arc::new(store), policy);

    let staged = media
        .stage_replacement(MediaKind::Events, ImageInput::from_url(OLD_URL))
        .await
        .unwrap();
    media.complete_replacement(&staged, replaced(OLD_URL)).await.unwrap();
}

#[tokio::test]
async fn remove_errors_are_swallowed() {
    let mut store = MockStore::new();
    store.expect_owns().returning(owned);
    store
        .expect_remove()
        .with(always())
        .times(2)
        .returning(|url| {
            if url == OLD_URL {
                Err(MediaError::NotFound("old".into()))
            } else {
                Err(MediaError::Unreachable("connection refused".into()))
            }
        });

    let media = lifecycle_with(Arc::new(store));
    media.release(OLD_URL).await;
    media.release(NEW_URL).await;
}

#[tokio::test]
async fn keep_existing_touches_nothing() {
    let mut store = MockStore::new();
    store.expect_is_configured().never();
    store.expect_store().never();
    store.expect_remove().never();
    store.expect_owns().never();

    let media = lifecycle_with(Arc::new(store));
    let staged = media
        .stage_replacement(MediaKind::Gallery, ImageInput::none())
        .await
        .unwrap();

    assert_eq!(staged.value(), None);
    assert!(!staged.replaces_previous());
    media.complete_replacement(&staged, replaced(OLD_URL)).await.unwrap();
}

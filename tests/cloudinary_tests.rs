mod test_utils;

use club_backend::{
    errors::MediaError,
    media::cloudinary::{public_id_from_url, sign, CloudinaryStore},
    repositories::media_store::MediaStore,
    settings::MediaSettings,
};
use mockito::Matcher;
use test_utils::*;

fn settings(api_base_url: &str) -> MediaSettings {
    MediaSettings {
        cloud_name: "demo".to_string(),
        api_key: "123456789".to_string(),
        api_secret: "shhh".to_string(),
        api_base_url: api_base_url.to_string(),
        timeout_secs: 5,
        ..MediaSettings::default()
    }
}

#[test]
fn signature_matches_documented_example() {
    let signature = sign(
        &[
            ("timestamp", "1315060510"),
            ("public_id", "sample_image"),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
        ],
        "abcd",
    );

    assert_eq!(signature, "bfd09f95f331f558cbd1320e67aa8d488770583e");
}

#[test]
fn public_id_drops_version_and_extension() {
    assert_eq!(
        public_id_from_url("https://res.cloudinary.com/demo/image/upload/v1712345678/real-estate-club/events/abc123.jpg"),
        Some("real-estate-club/events/abc123".to_string())
    );
    assert_eq!(
        public_id_from_url("https://res.cloudinary.com/demo/image/upload/real-estate-club/team/xyz.webp"),
        Some("real-estate-club/team/xyz".to_string())
    );
    assert_eq!(public_id_from_url("https://images.example.org/poster.jpg"), None);
    assert_eq!(public_id_from_url("not a url"), None);
}

#[test]
fn owns_only_this_clouds_upload_urls() {
    let store = CloudinaryStore::new(&settings("https://api.cloudinary.com/v1_1")).unwrap();

    assert!(store.owns("https://res.cloudinary.com/demo/image/upload/v1/real-estate-club/gallery/a.png"));
    assert!(!store.owns("https://res.cloudinary.com/other-cloud/image/upload/v1/a.png"));
    assert!(!store.owns("https://evilcloudinary.com/demo/image/upload/v1/a.png"));
    assert!(!store.owns(EXTERNAL_URL));
    assert!(!store.owns(""));
}

#[test]
fn placeholder_credentials_count_as_unconfigured() {
    let mut media = settings("https://api.cloudinary.com/v1_1");
    assert!(media.is_configured());

    media.cloud_name = "your_cloud_name".to_string();
    assert!(!media.is_configured());

    let store = CloudinaryStore::new(&MediaSettings::default()).unwrap();
    assert!(!store.is_configured());
}

#[tokio::test]
async fn store_posts_signed_upload_and_returns_secure_url() {
    let mut server = mockito::Server::new_async().await;
    let secure_url = "https://res.cloudinary.com/demo/image/upload/v1712345678/real-estate-club/events/abc.jpg";

    let mock = server
        .mock("POST", "/demo/image/upload")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("name=\"api_key\"".to_string()),
            Matcher::Regex("name=\"signature\"".to_string()),
            Matcher::Regex("real-estate-club/events".to_string()),
            Matcher::Regex("c_limit,h_800,w_1200/q_auto/f_auto".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"secure_url":"{}","public_id":"real-estate-club/events/abc"}}"#, secure_url))
        .create_async()
        .await;

    let store = CloudinaryStore::new(&settings(&server.url())).unwrap();
    let url = store.store(&jpeg_upload(), "real-estate-club/events").await.unwrap();

    assert_eq!(url, secure_url);
    mock.assert_async().await;
}

#[tokio::test]
async fn store_reports_rejection_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/demo/image/upload")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Invalid Signature"}}"#)
        .create_async()
        .await;

    let store = CloudinaryStore::new(&settings(&server.url())).unwrap();
    let err = store.store(&jpeg_upload(), "real-estate-club/team").await.unwrap_err();

    assert_eq!(err, MediaError::Rejected("Invalid Signature".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn unconfigured_store_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let unconfigured = MediaSettings {
        api_base_url: server.url(),
        ..MediaSettings::default()
    };
    let store = CloudinaryStore::new(&unconfigured).unwrap();

    assert_eq!(
        store.store(&jpeg_upload(), "real-estate-club/events").await,
        Err(MediaError::NotConfigured)
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn remove_sends_public_id_and_accepts_ok() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/demo/image/destroy")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("public_id".to_string(), "real-estate-club/events/abc".to_string()),
            Matcher::UrlEncoded("api_key".to_string(), "123456789".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result":"ok"}"#)
        .create_async()
        .await;

    let store = CloudinaryStore::new(&settings(&server.url())).unwrap();
    store
        .remove("https://res.cloudinary.com/demo/image/upload/v17/real-estate-club/events/abc.jpg")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn remove_maps_not_found_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/demo/image/destroy")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result":"not found"}"#)
        .create_async()
        .await;

    let store = CloudinaryStore::new(&settings(&server.url())).unwrap();
    let err = store
        .remove("https://res.cloudinary.com/demo/image/upload/v17/real-estate-club/events/gone.jpg")
        .await
        .unwrap_err();

    assert_eq!(err, MediaError::NotFound("real-estate-club/events/gone".to_string()));
    mock.assert_async().await;
}

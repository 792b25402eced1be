//! Cloudinary implementation of [`MediaStore`] over its signed REST API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::{debug, instrument};
use url::Url;

use crate::{
    constants::UPLOAD_TRANSFORMATION,
    entities::media::UploadedImage,
    errors::MediaError,
    repositories::media_store::MediaStore,
    settings::MediaSettings,
};

static PUBLIC_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/image/upload/(?:v\d+/)?(.+?)(?:\.[A-Za-z0-9]+)?$").expect("public id pattern is valid")
});

/// Signature over the non-file request parameters: `k=v` pairs sorted by key,
/// joined with `&`, secret appended, SHA-1 hex encoded.
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extracts the public id from a delivery URL, dropping the version segment
/// and the file extension.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    PUBLIC_ID
        .captures(parsed.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct CloudinaryStore {
    client: Client,
    settings: MediaSettings,
}

impl CloudinaryStore {
    pub fn new(settings: &MediaSettings) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| MediaError::Unreachable(format!("HTTP client setup failed: {}", e)))?;

        Ok(CloudinaryStore {
            client,
            settings: settings.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.settings.api_base_url.trim_end_matches('/'),
            self.settings.cloud_name,
            action
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> MediaError {
        if err.is_timeout() {
            MediaError::Timeout(self.settings.timeout_secs)
        } else {
            MediaError::Unreachable(err.to_string())
        }
    }

    async fn rejection(response: reqwest::Response) -> MediaError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => status.to_string(),
        };
        MediaError::Rejected(message)
    }
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    fn owns(&self, url: &str) -> bool {
        let cloud_name = self.settings.cloud_name.trim();
        if cloud_name.is_empty() {
            return false;
        }

        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        let from_cloudinary = parsed
            .host_str()
            .is_some_and(|host| host == "cloudinary.com" || host.ends_with(".cloudinary.com"));

        from_cloudinary && parsed.path().starts_with(&format!("/{}/image/upload/", cloud_name))
    }

    #[instrument(skip(self, image), fields(size = image.len(), folder = %folder))]
    async fn store(&self, image: &UploadedImage, folder: &str) -> Result<String, MediaError> {
        if !self.is_configured() {
            return Err(MediaError::NotConfigured);
        }

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[
                ("folder", folder),
                ("timestamp", timestamp.as_str()),
                ("transformation", UPLOAD_TRANSFORMATION),
            ],
            &self.settings.api_secret,
        );

        let file_name = image.file_name.clone().unwrap_or_else(|| "upload".to_string());
        let mut part = multipart::Part::bytes(image.bytes.to_vec()).file_name(file_name);
        if let Some(mime) = image.sniffed_mime() {
            part = part
                .mime_str(mime)
                .map_err(|e| MediaError::Rejected(e.to_string()))?;
        }

        let form = multipart::Form::new()
            .part("file", part)
            .text("api_key", self.settings.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("transformation", UPLOAD_TRANSFORMATION)
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Rejected(format!("unexpected upload response: {}", e)))?;

        debug!(url = %body.secure_url, "Upload accepted");
        Ok(body.secure_url)
    }

    #[instrument(skip(self))]
    async fn remove(&self, url: &str) -> Result<(), MediaError> {
        if !self.is_configured() {
            return Err(MediaError::NotConfigured);
        }

        let public_id = public_id_from_url(url).ok_or_else(|| MediaError::ForeignUrl(url.to_string()))?;
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id.as_str()), ("timestamp", timestamp.as_str())],
            &self.settings.api_secret,
        );

        let params = [
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.settings.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(MediaError::NotFound(public_id));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Rejected(format!("unexpected destroy response: {}", e)))?;

        match body.result.as_str() {
            "ok" => Ok(()),
            "not found" => Err(MediaError::NotFound(public_id)),
            other => Err(MediaError::Rejected(other.to_string())),
        }
    }
}

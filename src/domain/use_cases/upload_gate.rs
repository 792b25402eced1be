//! Decides the final `image` value of a media-bearing mutation.
//!
//! Precedence is file, then URL, then whatever the intent implies. The rules
//! live in [`decide`] as one flat table so they can be read and tested
//! without any I/O.

use url::Url;

use crate::{
    entities::media::{ImageInput, ImageRequirement, UploadedImage},
    errors::AppError,
};

/// What kind of write the image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Update,
}

/// Which payload, if any, the request carried. URL content is not inspected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    File,
    Url,
    Absent,
}

/// Outcome of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Upload,
    UseUrl,
    Empty,
    KeepExisting,
    RejectMissing,
}

pub fn decide(source: Source, intent: Intent, requirement: ImageRequirement) -> Decision {
    use Decision::*;
    use ImageRequirement::*;

    match (source, intent, requirement) {
        (Source::File, _, _) => Upload,
        (Source::Url, _, _) => UseUrl,
        (Source::Absent, Intent::Create, Required) => RejectMissing,
        (Source::Absent, Intent::Create, Optional) => Empty,
        (Source::Absent, Intent::Update, _) => KeepExisting,
    }
}

/// Validated form of the request payload, ready for the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Upload(UploadedImage),
    UseUrl(String),
    Empty,
    KeepExisting,
}

/// Limits applied to uploaded files.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_bytes: usize,
}

/// Classifies and validates the payload, then applies [`decide`].
pub fn evaluate(
    input: ImageInput,
    intent: Intent,
    requirement: ImageRequirement,
    limits: UploadLimits,
) -> Result<GateOutcome, AppError> {
    let url = input
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    let source = match (&input.file, &url) {
        (Some(_), _) => Source::File,
        (None, Some(_)) => Source::Url,
        (None, None) => Source::Absent,
    };

    match decide(source, intent, requirement) {
        Decision::Upload => {
            let file = input.file.ok_or_else(|| {
                AppError::InternalError("upload decided without a file".into())
            })?;
            check_file(&file, limits)?;
            Ok(GateOutcome::Upload(file))
        }
        Decision::UseUrl => {
            let url = url.unwrap_or_default();
            check_url(&url)?;
            Ok(GateOutcome::UseUrl(url))
        }
        Decision::Empty => Ok(GateOutcome::Empty),
        Decision::KeepExisting => Ok(GateOutcome::KeepExisting),
        Decision::RejectMissing => Err(AppError::invalid_field("image", "image is required")),
    }
}

fn check_file(file: &UploadedImage, limits: UploadLimits) -> Result<(), AppError> {
    if file.is_empty() {
        return Err(AppError::invalid_field("image", "uploaded file is empty"));
    }
    if file.len() > limits.max_bytes {
        return Err(AppError::invalid_field(
            "image",
            format!("uploaded file exceeds the {} byte limit", limits.max_bytes),
        ));
    }
    if file.sniffed_mime().is_none() {
        return Err(AppError::invalid_field("image", "uploaded file is not a recognised image"));
    }
    Ok(())
}

fn check_url(raw: &str) -> Result<(), AppError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(AppError::invalid_field("image", "image must be an absolute http(s) URL")),
    }
}

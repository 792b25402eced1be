use std::{collections::HashMap, fmt, str::FromStr};

use bytes::Bytes;
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::errors::{AppError, FieldError};

/// Resource types that carry an `image` field managed by the upload lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Events,
    Team,
    Gallery,
}

/// Whether a resource can be saved without an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRequirement {
    Required,
    Optional,
}

impl MediaKind {
    /// Sub-folder in the remote store.
    pub fn folder(&self) -> &'static str {
        match self {
            MediaKind::Events => "events",
            MediaKind::Team => "team",
            MediaKind::Gallery => "gallery",
        }
    }

    pub fn requirement(&self) -> ImageRequirement {
        match self {
            MediaKind::Gallery => ImageRequirement::Required,
            MediaKind::Events | MediaKind::Team => ImageRequirement::Optional,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder())
    }
}

/// A binary image part received in a multipart request.
#[derive(Clone, PartialEq)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        UploadedImage {
            bytes: bytes.into(),
            content_type: None,
            file_name: None,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type sniffed from the magic bytes, ignoring what the client declared.
    pub fn sniffed_mime(&self) -> Option<&'static str> {
        infer::get(&self.bytes)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .map(|kind| kind.mime_type())
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}

/// The two ways a request can carry a new image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageInput {
    pub file: Option<UploadedImage>,
    pub url: Option<String>,
}

impl ImageInput {
    pub fn none() -> Self {
        ImageInput::default()
    }

    pub fn from_file(file: UploadedImage) -> Self {
        ImageInput { file: Some(file), url: None }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        ImageInput { file: None, url: Some(url.into()) }
    }
}

/// Text parts of a multipart form, keyed by field name. Later values win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        FormFields(HashMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Like [`FormFields::text`] but records a "required" error when missing.
    pub fn require(&self, name: &str, missing: &mut Vec<FieldError>) -> String {
        self.text(name).unwrap_or_else(|| {
            missing.push(FieldError {
                field: name.to_string(),
                message: format!("{} is required", name),
            });
            String::new()
        })
    }

    pub fn parse<T>(&self, name: &str) -> Result<Option<T>, AppError>
    where
        T: FromStr,
    {
        self.text(name)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|_| AppError::invalid_field(name, format!("Invalid value '{}'", raw)))
            })
            .transpose()
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormFields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A parsed media-bearing request: resource fields plus the image payload.
#[derive(Debug, Clone, Default)]
pub struct MediaForm {
    pub fields: FormFields,
    pub image: ImageInput,
}

/// A record as written by an update, with the image it held just before.
#[derive(Debug, Clone)]
pub struct Replaced<T> {
    pub record: T,
    pub previous_image: String,
}

impl<'r, T> FromRow<'r, PgRow> for Replaced<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Replaced {
            record: T::from_row(row)?,
            previous_image: row.try_get("previous_image")?,
        })
    }
}

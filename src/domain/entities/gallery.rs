use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{entities::media::FormFields, errors::AppError};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: Option<String>,
    pub image: String,
    pub category: Option<String>,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gallery fields other than the image; every one of them is optional.
#[derive(Debug, Clone, Default, Validate)]
pub struct GalleryDetails {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 80))]
    pub category: Option<String>,

    pub display_order: Option<i32>,
}

impl GalleryDetails {
    pub fn from_form(fields: &FormFields) -> Result<Self, AppError> {
        let details = GalleryDetails {
            title: fields.text("title"),
            category: fields.text("category"),
            display_order: fields.parse::<i32>("order")?,
        };
        details.validate()?;
        Ok(details)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::sanitize::{strip_html, strip_html_opt};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewContactMessage {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 150))]
    pub subject: Option<String>,

    #[validate(length(min = 5, max = 5000))]
    pub message: String,
}

impl NewContactMessage {
    pub fn sanitized(self) -> Self {
        NewContactMessage {
            name: strip_html(&self.name),
            email: self.email.trim().to_lowercase(),
            subject: strip_html_opt(self.subject),
            message: strip_html(&self.message),
        }
    }
}

/// Admin edit, typically flipping `status` to `read`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateContactMessage {
    #[validate(length(max = 150))]
    pub subject: Option<String>,

    pub status: Option<ContactStatus>,
}

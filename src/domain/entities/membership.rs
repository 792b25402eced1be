use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{errors::AppError, utils::sanitize::{strip_html, strip_html_opt}};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub year: Option<String>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Approved => "approved",
            MembershipStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MembershipStatus::Pending),
            "approved" => Ok(MembershipStatus::Approved),
            "rejected" => Ok(MembershipStatus::Rejected),
            _ => Err(AppError::invalid_field("status", "must be one of: pending, approved, rejected")),
        }
    }
}

/// Public application form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMembership {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 150))]
    pub college: Option<String>,

    #[validate(length(max = 30))]
    pub year: Option<String>,

    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

impl NewMembership {
    /// Normalised, HTML-free copy ready to be stored.
    pub fn sanitized(self) -> Self {
        NewMembership {
            name: strip_html(&self.name),
            email: self.email.trim().to_lowercase(),
            phone: strip_html_opt(self.phone),
            college: strip_html_opt(self.college),
            year: strip_html_opt(self.year),
            reason: strip_html_opt(self.reason),
        }
    }
}

/// Admin edit; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMembership {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 150))]
    pub college: Option<String>,

    #[validate(length(max = 30))]
    pub year: Option<String>,

    #[validate(length(max = 2000))]
    pub reason: Option<String>,

    pub status: Option<MembershipStatus>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub message: String,
}

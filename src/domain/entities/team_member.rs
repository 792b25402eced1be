use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{entities::media::FormFields, errors::AppError};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub image: String,
    pub linkedin: Option<String>,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewTeamMember {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 1, max = 120))]
    pub role: String,

    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[validate(url(message = "linkedin must be a valid URL"))]
    pub linkedin: Option<String>,

    pub display_order: i32,
}

impl NewTeamMember {
    pub fn from_form(fields: &FormFields) -> Result<Self, AppError> {
        let mut missing = Vec::new();
        let name = fields.require("name", &mut missing);
        let role = fields.require("role", &mut missing);

        if !missing.is_empty() {
            return Err(AppError::ValidationError(missing));
        }

        let member = NewTeamMember {
            name,
            role,
            bio: fields.text("bio"),
            linkedin: fields.text("linkedin"),
            display_order: fields.parse::<i32>("order")?.unwrap_or(0),
        };
        member.validate()?;
        Ok(member)
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct TeamMemberChanges {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 120))]
    pub role: Option<String>,

    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[validate(url(message = "linkedin must be a valid URL"))]
    pub linkedin: Option<String>,

    pub display_order: Option<i32>,
}

impl TeamMemberChanges {
    pub fn from_form(fields: &FormFields) -> Result<Self, AppError> {
        let changes = TeamMemberChanges {
            name: fields.text("name"),
            role: fields.text("role"),
            bio: fields.text("bio"),
            linkedin: fields.text("linkedin"),
            display_order: fields.parse::<i32>("order")?,
        };
        changes.validate()?;
        Ok(changes)
    }
}

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::media::FormFields,
    errors::{AppError, FieldError},
    utils::date::parse_datetime,
};

const MAX_TITLE_LENGTH: u64 = 200;
const MAX_DESCRIPTION_LENGTH: u64 = 5000;
const MAX_SHORT_TEXT: u64 = 200;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub speaker: Option<String>,
    pub image: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Past,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Past => "past",
        }
    }
}

impl FromStr for EventStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(EventStatus::Upcoming),
            "past" => Ok(EventStatus::Past),
            _ => Err(AppError::invalid_field("status", "must be one of: upcoming, past")),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ───── Requests ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Validate)]
pub struct NewEvent {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    pub date: DateTime<Utc>,

    #[validate(length(max = MAX_SHORT_TEXT))]
    pub time: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT))]
    pub location: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT))]
    pub speaker: Option<String>,

    pub status: EventStatus,
}

impl NewEvent {
    pub fn from_form(fields: &FormFields) -> Result<Self, AppError> {
        let mut missing = Vec::new();
        let title = fields.require("title", &mut missing);
        let description = fields.require("description", &mut missing);
        let raw_date = fields.require("date", &mut missing);

        if !missing.is_empty() {
            return Err(AppError::ValidationError(missing));
        }

        let event = NewEvent {
            title,
            description,
            date: parse_event_date(&raw_date)?,
            time: fields.text("time"),
            location: fields.text("location"),
            speaker: fields.text("speaker"),
            status: fields.parse::<EventStatus>("status")?.unwrap_or_default(),
        };
        event.validate()?;
        Ok(event)
    }
}

/// Partial update; `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, Validate)]
pub struct EventChanges {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(length(max = MAX_SHORT_TEXT))]
    pub time: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT))]
    pub location: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT))]
    pub speaker: Option<String>,

    pub status: Option<EventStatus>,
}

impl EventChanges {
    pub fn from_form(fields: &FormFields) -> Result<Self, AppError> {
        let changes = EventChanges {
            title: fields.text("title"),
            description: fields.text("description"),
            date: fields.text("date").map(|raw| parse_event_date(&raw)).transpose()?,
            time: fields.text("time"),
            location: fields.text("location"),
            speaker: fields.text("speaker"),
            status: fields.parse::<EventStatus>("status")?,
        };
        changes.validate()?;
        Ok(changes)
    }
}

fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    parse_datetime(raw).ok_or_else(|| {
        AppError::ValidationError(vec![FieldError {
            field: "date".into(),
            message: format!("'{}' is not a valid date", raw),
        }])
    })
}

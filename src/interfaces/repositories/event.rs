use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        event::{Event, EventChanges, NewEvent},
        media::Replaced,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxEventRepo,
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create_event(&self, event: &NewEvent, image: &str) -> Result<Event, AppError>;
    async fn get_event_by_id(&self, id: &Uuid) -> Result<Event, AppError>;
    async fn list_events(&self) -> Result<Vec<Event>, AppError>;
    /// Applies `changes`, sets the image column unless `image` is `None`, and
    /// reports the image the row held before this statement.
    async fn update_event(
        &self,
        id: &Uuid,
        changes: &EventChanges,
        image: Option<&str>,
    ) -> Result<Replaced<Event>, AppError>;
    /// Removes the row and returns it as it was.
    async fn delete_event(&self, id: &Uuid) -> Result<Event, AppError>;
}

impl SqlxEventRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxEventRepo { pool }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Event not found".into())
}

#[async_trait]
impl EventRepository for SqlxEventRepo {
    async fn create_event(&self, event: &NewEvent, image: &str) -> Result<Event, AppError> {
        let created = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, "date", "time", location, speaker, image, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(&event.speaker)
        .bind(image)
        .bind(event.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_event_by_id(&self, id: &Uuid) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(r#"SELECT * FROM events ORDER BY "date" DESC"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn update_event(
        &self,
        id: &Uuid,
        changes: &EventChanges,
        image: Option<&str>,
    ) -> Result<Replaced<Event>, AppError> {
        sqlx::query_as::<_, Replaced<Event>>(
            r#"
            UPDATE events AS e
            SET
                title = COALESCE($2, e.title),
                description = COALESCE($3, e.description),
                "date" = COALESCE($4, e."date"),
                "time" = COALESCE($5, e."time"),
                location = COALESCE($6, e.location),
                speaker = COALESCE($7, e.speaker),
                status = COALESCE($8, e.status),
                image = COALESCE($9, e.image),
                updated_at = NOW()
            FROM (SELECT id, image FROM events WHERE id = $1 FOR UPDATE) AS previous
            WHERE e.id = previous.id
            RETURNING e.*, previous.image AS previous_image
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.date)
        .bind(&changes.time)
        .bind(&changes.location)
        .bind(&changes.speaker)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(not_found)
    }

    async fn delete_event(&self, id: &Uuid) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(r#"DELETE FROM events WHERE id = $1 RETURNING *"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}

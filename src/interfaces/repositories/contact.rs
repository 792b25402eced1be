use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::contact::{ContactMessage, NewContactMessage, UpdateContactMessage},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage, AppError>;
    async fn list_messages(&self) -> Result<Vec<ContactMessage>, AppError>;
    async fn update_message(&self, id: &Uuid, changes: &UpdateContactMessage) -> Result<ContactMessage, AppError>;
    async fn delete_message(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage, AppError> {
        let created = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let rows = sqlx::query_as::<_, ContactMessage>(
            r#"SELECT * FROM contact_messages ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update_message(&self, id: &Uuid, changes: &UpdateContactMessage) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            UPDATE contact_messages
            SET
                subject = COALESCE($2, subject),
                status = COALESCE($3, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.subject)
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact message not found".into()))
    }

    async fn delete_message(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(r#"DELETE FROM contact_messages WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Contact message not found".into()));
        }

        Ok(())
    }
}

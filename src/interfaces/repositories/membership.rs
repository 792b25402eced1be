use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::membership::{Membership, NewMembership, UpdateMembership},
    errors::AppError,
    repositories::sqlx_repo::SqlxMembershipRepo,
};

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn create_membership(&self, application: &NewMembership) -> Result<Membership, AppError>;
    async fn list_memberships(&self) -> Result<Vec<Membership>, AppError>;
    async fn update_membership(&self, id: &Uuid, changes: &UpdateMembership) -> Result<Membership, AppError>;
    async fn delete_membership(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxMembershipRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxMembershipRepo { pool }
    }
}

#[async_trait]
impl MembershipRepository for SqlxMembershipRepo {
    async fn create_membership(&self, application: &NewMembership) -> Result<Membership, AppError> {
        let created = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (name, email, phone, college, year, reason)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.college)
        .bind(&application.year)
        .bind(&application.reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_memberships(&self) -> Result<Vec<Membership>, AppError> {
        let rows = sqlx::query_as::<_, Membership>(r#"SELECT * FROM memberships ORDER BY created_at DESC"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn update_membership(&self, id: &Uuid, changes: &UpdateMembership) -> Result<Membership, AppError> {
        sqlx::query_as::<_, Membership>(
            r#"
            UPDATE memberships
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                college = COALESCE($5, college),
                year = COALESCE($6, year),
                reason = COALESCE($7, reason),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.college)
        .bind(&changes.year)
        .bind(&changes.reason)
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership not found".into()))
    }

    async fn delete_membership(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(r#"DELETE FROM memberships WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Membership not found".into()));
        }

        Ok(())
    }
}

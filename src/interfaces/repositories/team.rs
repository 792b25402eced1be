use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        media::Replaced,
        team_member::{NewTeamMember, TeamMember, TeamMemberChanges},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxTeamRepo,
};

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create_member(&self, member: &NewTeamMember, image: &str) -> Result<TeamMember, AppError>;
    async fn get_member_by_id(&self, id: &Uuid) -> Result<TeamMember, AppError>;
    async fn list_members(&self) -> Result<Vec<TeamMember>, AppError>;
    /// Same contract as `EventRepository::update_event`.
    async fn update_member(
        &self,
        id: &Uuid,
        changes: &TeamMemberChanges,
        image: Option<&str>,
    ) -> Result<Replaced<TeamMember>, AppError>;
    async fn delete_member(&self, id: &Uuid) -> Result<TeamMember, AppError>;
}

impl SqlxTeamRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxTeamRepo { pool }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Team member not found".into())
}

#[async_trait]
impl TeamRepository for SqlxTeamRepo {
    async fn create_member(&self, member: &NewTeamMember, image: &str) -> Result<TeamMember, AppError> {
        let created = sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (name, role, bio, image, linkedin, display_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&member.name)
        .bind(&member.role)
        .bind(&member.bio)
        .bind(image)
        .bind(&member.linkedin)
        .bind(member.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_member_by_id(&self, id: &Uuid) -> Result<TeamMember, AppError> {
        sqlx::query_as::<_, TeamMember>(r#"SELECT * FROM team_members WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"SELECT * FROM team_members ORDER BY display_order ASC, created_at ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn update_member(
        &self,
        id: &Uuid,
        changes: &TeamMemberChanges,
        image: Option<&str>,
    ) -> Result<Replaced<TeamMember>, AppError> {
        sqlx::query_as::<_, Replaced<TeamMember>>(
            r#"
            UPDATE team_members AS t
            SET
                name = COALESCE($2, t.name),
                role = COALESCE($3, t.role),
                bio = COALESCE($4, t.bio),
                linkedin = COALESCE($5, t.linkedin),
                display_order = COALESCE($6, t.display_order),
                image = COALESCE($7, t.image),
                updated_at = NOW()
            FROM (SELECT id, image FROM team_members WHERE id = $1 FOR UPDATE) AS previous
            WHERE t.id = previous.id
            RETURNING t.*, previous.image AS previous_image
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.role)
        .bind(&changes.bio)
        .bind(&changes.linkedin)
        .bind(changes.display_order)
        .bind(image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(not_found)
    }

    async fn delete_member(&self, id: &Uuid) -> Result<TeamMember, AppError> {
        sqlx::query_as::<_, TeamMember>(r#"DELETE FROM team_members WHERE id = $1 RETURNING *"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}

use async_trait::async_trait;

use crate::{entities::stats::ResourceCounts, errors::AppError, repositories::sqlx_repo::SqlxStatsRepo};

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn resource_counts(&self) -> Result<ResourceCounts, AppError>;
}

impl SqlxStatsRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxStatsRepo { pool }
    }
}

#[async_trait]
impl StatsRepository for SqlxStatsRepo {
    async fn resource_counts(&self) -> Result<ResourceCounts, AppError> {
        let counts = sqlx::query_as::<_, ResourceCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM events) AS events,
                (SELECT COUNT(*) FROM memberships WHERE status = 'approved') AS approved_members,
                (SELECT COUNT(*) FROM team_members) AS team_members,
                (SELECT COUNT(*) FROM gallery_items) AS gallery_images
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}

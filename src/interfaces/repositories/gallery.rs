use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        gallery::{GalleryDetails, GalleryItem},
        media::Replaced,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxGalleryRepo,
};

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn create_item(&self, details: &GalleryDetails, image: &str) -> Result<GalleryItem, AppError>;
    async fn get_item_by_id(&self, id: &Uuid) -> Result<GalleryItem, AppError>;
    async fn list_items(&self) -> Result<Vec<GalleryItem>, AppError>;
    /// Same contract as `EventRepository::update_event`.
    async fn update_item(
        &self,
        id: &Uuid,
        details: &GalleryDetails,
        image: Option<&str>,
    ) -> Result<Replaced<GalleryItem>, AppError>;
    async fn delete_item(&self, id: &Uuid) -> Result<GalleryItem, AppError>;
}

impl SqlxGalleryRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxGalleryRepo { pool }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Gallery image not found".into())
}

#[async_trait]
impl GalleryRepository for SqlxGalleryRepo {
    async fn create_item(&self, details: &GalleryDetails, image: &str) -> Result<GalleryItem, AppError> {
        let created = sqlx::query_as::<_, GalleryItem>(
            r#"
            INSERT INTO gallery_items (title, image, category, display_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&details.title)
        .bind(image)
        .bind(&details.category)
        .bind(details.display_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_item_by_id(&self, id: &Uuid) -> Result<GalleryItem, AppError> {
        sqlx::query_as::<_, GalleryItem>(r#"SELECT * FROM gallery_items WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn list_items(&self) -> Result<Vec<GalleryItem>, AppError> {
        let items = sqlx::query_as::<_, GalleryItem>(
            r#"SELECT * FROM gallery_items ORDER BY display_order ASC, created_at ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn update_item(
        &self,
        id: &Uuid,
        details: &GalleryDetails,
        image: Option<&str>,
    ) -> Result<Replaced<GalleryItem>, AppError> {
        sqlx::query_as::<_, Replaced<GalleryItem>>(
            r#"
            UPDATE gallery_items AS g
            SET
                title = COALESCE($2, g.title),
                category = COALESCE($3, g.category),
                display_order = COALESCE($4, g.display_order),
                image = COALESCE($5, g.image),
                updated_at = NOW()
            FROM (SELECT id, image FROM gallery_items WHERE id = $1 FOR UPDATE) AS previous
            WHERE g.id = previous.id
            RETURNING g.*, previous.image AS previous_image
            "#,
        )
        .bind(id)
        .bind(&details.title)
        .bind(&details.category)
        .bind(details.display_order)
        .bind(image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(not_found)
    }

    async fn delete_item(&self, id: &Uuid) -> Result<GalleryItem, AppError> {
        sqlx::query_as::<_, GalleryItem>(r#"DELETE FROM gallery_items WHERE id = $1 RETURNING *"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}

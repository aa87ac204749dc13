use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    entities::{
        media::{MediaItem, MediaItemInsert},
        product::{Product, ProductInsert, ProductUpdate},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProductRepo,
};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts the product and its media rows atomically.
    async fn create_product(
        &self,
        product: &ProductInsert,
        media: &[MediaItemInsert],
    ) -> Result<Uuid, AppError>;

    async fn get_product_by_id(&self, id: &Uuid) -> Result<Product, AppError>;
    async fn get_all_products(&self) -> Result<Vec<Product>, AppError>;

    /// Ordered gallery for one product; empty when the product has no media.
    async fn get_gallery(&self, product_id: &Uuid) -> Result<Vec<MediaItem>, AppError>;

    /// Galleries for a batch of products, ordered by product then index.
    async fn get_galleries(&self, product_ids: &[Uuid]) -> Result<Vec<MediaItem>, AppError>;

    /// Applies field changes; when `replacement_gallery` is `Some`, the
    /// existing gallery is dropped and reinserted in the same transaction.
    async fn update_product(
        &self,
        id: &Uuid,
        changes: &ProductUpdate,
        replacement_gallery: Option<Vec<MediaItemInsert>>,
    ) -> Result<(), AppError>;

    async fn delete_product(&self, id: &Uuid) -> Result<(), AppError>;

    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxProductRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProductRepo { pool }
    }
}

async fn insert_media_rows(
    tx: &mut Transaction<'_, Postgres>,
    product_id: &Uuid,
    media: &[MediaItemInsert],
) -> Result<(), AppError> {
    for item in media {
        sqlx::query(
            r#"
            INSERT INTO product_media (product_id, media_type, url, order_index)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product_id)
        .bind(item.media_type.as_str())
        .bind(&item.url)
        .bind(item.order_index)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for SqlxProductRepo {
    async fn create_product(
        &self,
        product: &ProductInsert,
        media: &[MediaItemInsert],
    ) -> Result<Uuid, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO products (
                name, description, banner_url, main_video_url,
                access_url, buy_url, price, category, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.banner_url)
        .bind(&product.main_video_url)
        .bind(&product.access_url)
        .bind(&product.buy_url)
        .bind(product.price)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        insert_media_rows(&mut tx, &id, media).await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn get_product_by_id(&self, id: &Uuid) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    async fn get_all_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn get_gallery(&self, product_id: &Uuid) -> Result<Vec<MediaItem>, AppError> {
        let items = sqlx::query_as::<_, MediaItem>(
            r#"
            SELECT * FROM product_media
            WHERE product_id = $1
            ORDER BY order_index ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn get_galleries(&self, product_ids: &[Uuid]) -> Result<Vec<MediaItem>, AppError> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = sqlx::query_as::<_, MediaItem>(
            r#"
            SELECT * FROM product_media
            WHERE product_id = ANY($1)
            ORDER BY product_id, order_index ASC
            "#,
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn update_product(
        &self,
        id: &Uuid,
        changes: &ProductUpdate,
        replacement_gallery: Option<Vec<MediaItemInsert>>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // COALESCE preserves stored values when no replacement was sent
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $1,
                description = COALESCE($2, description),
                banner_url = COALESCE($3, banner_url),
                main_video_url = COALESCE($4, main_video_url),
                access_url = COALESCE($5, access_url),
                buy_url = COALESCE($6, buy_url),
                price = COALESCE($7, price),
                category = COALESCE($8, category),
                updated_at = NOW()
            WHERE id = $9
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.banner_url)
        .bind(&changes.main_video_url)
        .bind(&changes.access_url)
        .bind(&changes.buy_url)
        .bind(changes.price)
        .bind(&changes.category)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".into()));
        }

        if let Some(gallery) = replacement_gallery {
            sqlx::query("DELETE FROM product_media WHERE product_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            insert_media_rows(&mut tx, id, &gallery).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_product(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".into()));
        }

        Ok(())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

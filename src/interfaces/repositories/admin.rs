use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::admin::{AdminUser, AdminUserInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxAdminRepo,
};

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError>;
    async fn create_admin(&self, admin: &AdminUserInsert) -> Result<(), AppError>;
}

impl SqlxAdminRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxAdminRepo { pool }
    }
}

#[async_trait]
impl AdminRepository for SqlxAdminRepo {
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT * FROM admin_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn create_admin(&self, admin: &AdminUserInsert) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO admin_users (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

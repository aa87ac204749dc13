use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::infrastructure::auth::password::hash_password;
use crate::settings::AppConfig;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    description TEXT,
    banner_url TEXT,
    main_video_url TEXT,
    access_url TEXT,
    buy_url TEXT,
    price DOUBLE PRECISION,
    category TEXT NOT NULL DEFAULT 'meus_produtos',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS product_media (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    media_type TEXT NOT NULL CHECK (media_type IN ('image', 'video')),
    url TEXT NOT NULL,
    order_index INT NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS product_media_product_idx
    ON product_media (product_id, order_index);

CREATE TABLE IF NOT EXISTS admin_users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

/// Creates the schema if absent and seeds the initial rows. Runs once at
/// startup; any failure here is fatal to the process.
pub async fn initialize(pool: &PgPool, config: &AppConfig) -> Result<(), AppError> {
    ensure_schema(pool).await?;
    seed_admin(pool, config).await?;
    seed_demo_products(pool).await?;
    Ok(())
}

async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema ensured.");
    Ok(())
}

async fn seed_admin(pool: &PgPool, config: &AppConfig) -> Result<(), AppError> {
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await?;
    if admins > 0 {
        return Ok(());
    }

    let password_hash = hash_password(&config.admin_password)?;
    sqlx::query("INSERT INTO admin_users (username, password_hash) VALUES ($1, $2)")
        .bind(&config.admin_username)
        .bind(&password_hash)
        .execute(pool)
        .await?;

    info!("Seeded admin user '{}'.", config.admin_username);
    Ok(())
}

async fn seed_demo_products(pool: &PgPool) -> Result<(), AppError> {
    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if products > 0 {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO products (name, description, price, category, buy_url)
        VALUES
            ('Pack VIP Premium', 'Acesso completo ao conteúdo VIP', 49.90, 'meus_produtos', 'https://example.com/buy/premium'),
            ('Ensaio Exclusivo', 'Galeria de fotos e vídeos do ensaio', 29.90, 'meus_produtos', 'https://example.com/buy/ensaio')
        "#,
    )
    .execute(pool)
    .await?;

    info!("Seeded demo products.");
    Ok(())
}

use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProductRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxAdminRepo {
    pub pool: PgPool,
}

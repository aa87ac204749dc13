pub mod admin;
pub mod product;
pub mod sqlx_repo;

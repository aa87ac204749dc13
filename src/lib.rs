mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{auth, db, storage};
pub use interfaces::{handlers, repositories, routes};

use infrastructure::storage::local::LocalMediaStore;
use repositories::sqlx_repo::{SqlxAdminRepo, SqlxProductRepo};
use use_cases::{auth::AuthHandler, catalog::CatalogHandler};

pub type AppCatalogHandler = CatalogHandler<SqlxProductRepo, LocalMediaStore>;
pub type AppAuthHandler = AuthHandler<SqlxAdminRepo>;

pub struct AppState {
    pub catalog: AppCatalogHandler,
    pub auth_handler: AppAuthHandler,
    pub app_name: String,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let media_store = LocalMediaStore::new(&config.upload_dir, &config.upload_url_prefix);
        let catalog = CatalogHandler::new(SqlxProductRepo::new(pool.clone()), media_store);
        let auth_handler = AuthHandler::new(SqlxAdminRepo::new(pool));

        AppState {
            catalog,
            auth_handler,
            app_name: config.name.clone(),
        }
    }
}

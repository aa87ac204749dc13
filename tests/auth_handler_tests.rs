use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use vip_catalog_backend::auth::password::hash_password;
use vip_catalog_backend::entities::admin::{AdminUser, AdminUserInsert, LoginRequest};
use vip_catalog_backend::errors::AppError;
use vip_catalog_backend::repositories::admin::AdminRepository;
use vip_catalog_backend::use_cases::auth::AuthHandler;

mock! {
    pub AdminRepo {}

    #[async_trait::async_trait]
    impl AdminRepository for AdminRepo {
        async fn get_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError>;
        async fn create_admin(&self, admin: &AdminUserInsert) -> Result<(), AppError>;
    }
}

fn stored_admin(username: &str, password: &str) -> AdminUser {
    AdminUser {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password_hash: hash_password(password).unwrap(),
        created_at: Utc::now(),
    }
}

fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[actix_rt::test]
async fn login_succeeds_with_correct_credentials() {
    let admin = stored_admin("admin", "admin123");

    let mut repo = MockAdminRepo::new();
    repo.expect_get_admin_by_username()
        .returning(move |_| Ok(Some(admin.clone())));

    let handler = AuthHandler::new(repo);

    let response = handler.login(login("admin", "admin123")).await.unwrap();
    assert!(response.success);
}

#[actix_rt::test]
async fn login_fails_with_wrong_password() {
    let admin = stored_admin("admin", "admin123");

    let mut repo = MockAdminRepo::new();
    repo.expect_get_admin_by_username()
        .returning(move |_| Ok(Some(admin.clone())));

    let handler = AuthHandler::new(repo);

    let result = handler.login(login("admin", "wrong")).await;
    assert!(matches!(result, Err(AppError::UnauthorizedAccess)));
}

#[actix_rt::test]
async fn login_fails_for_unknown_user() {
    let mut repo = MockAdminRepo::new();
    repo.expect_get_admin_by_username().returning(|_| Ok(None));

    let handler = AuthHandler::new(repo);

    let result = handler.login(login("ghost", "admin123")).await;
    assert!(matches!(result, Err(AppError::UnauthorizedAccess)));
}

#[actix_rt::test]
async fn login_rejects_empty_credentials_without_hitting_the_store() {
    let mut repo = MockAdminRepo::new();
    repo.expect_get_admin_by_username().never();

    let handler = AuthHandler::new(repo);

    let result = handler.login(login("", "")).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

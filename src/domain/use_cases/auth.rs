use validator::Validate;

use crate::entities::admin::{LoginRequest, LoginResponse};
use crate::errors::AppError;
use crate::infrastructure::auth::password::verify_password;
use crate::interfaces::repositories::admin::AdminRepository;

pub struct AuthHandler<R>
where
    R: AdminRepository,
{
    pub admin_repo: R,
}

impl<R> AuthHandler<R>
where
    R: AdminRepository,
{
    pub fn new(admin_repo: R) -> Self {
        AuthHandler { admin_repo }
    }

    /// Stateless credential check against the admin_users table. No token
    /// or session is issued; callers re-authenticate per request.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let admin = self
            .admin_repo
            .get_admin_by_username(&request.username)
            .await?
            .ok_or(AppError::UnauthorizedAccess)?;

        let is_password_valid = verify_password(&request.password, &admin.password_hash)
            .map_err(|e| {
                tracing::warn!("Password verification failed for '{}': {}", request.username, e);
                AppError::UnauthorizedAccess
            })?;
        if !is_password_valid {
            return Err(AppError::UnauthorizedAccess);
        }

        tracing::info!("Admin '{}' logged in", admin.username);
        Ok(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
        })
    }
}

use actix_web::{post, web, HttpResponse, Responder};

use crate::{entities::admin::LoginRequest, AppState};

#[post("/admin/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> impl Responder {
    match state.auth_handler.login(credentials.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

use actix_web::{get, web, HttpResponse, Responder};
use humantime::format_duration;
use std::time::Duration;

use crate::{constants::START_TIME, repositories::product::ProductRepository, AppState};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = chrono::Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let db_status = match state.catalog.product_repo.check_connection().await {
        Ok(_) => "OK",
        Err(_) => "Unavailable",
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "uptime": human_uptime.to_string(),
        "timestamp": now_utc.to_rfc3339(),
        "start_at": START_TIME.to_rfc3339(),
        "database": db_status,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

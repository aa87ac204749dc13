use actix_web::{get, http::header::ContentType, web, HttpResponse, Responder};

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const ADMIN_HTML: &str = include_str!("../../../static/admin.html");
const SERVICE_WORKER_JS: &str = include_str!("../../../static/sw.js");

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(INDEX_HTML)
}

#[get("/admin")]
pub async fn admin_shell() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(ADMIN_HTML)
}

#[get("/manifest.json")]
pub async fn manifest(state: web::Data<crate::AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "name": state.app_name,
        "short_name": state.app_name,
        "start_url": "/",
        "display": "standalone",
        "background_color": "#000000",
        "theme_color": "#000000",
        "icons": []
    }))
}

#[get("/sw.js")]
pub async fn service_worker() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Content-Type", "application/javascript"))
        .body(SERVICE_WORKER_JS)
}
